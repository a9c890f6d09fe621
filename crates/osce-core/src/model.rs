//! Wire and domain types. Field names follow the snake_case JSON exchanged
//! with the grading service's callers.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Checklist document metadata. Every field is derivable from the document
/// body; a missing or partial `metadata` section is filled in at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistMetadata {
    pub version: String,
    pub total_blocks: usize,
    pub total_items: usize,
    pub max_points: u32,
    pub min_points_required: u32,
    pub passing_percentage: f64,
}

/// A named grouping of checklist items with a declared point ceiling.
/// `max_points` must equal the sum of `points` over the block's applicable
/// items; this is validated at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistBlock {
    pub id: String,
    pub name: String,
    pub max_points: u32,
}

/// One gradeable behavior.
///
/// `subsection` is present only for items of the systems-review block.
/// `not_applicable` items are evaluated and reported but never contribute
/// points. `negatives` are veto phrases: any occurrence in the examinee's
/// text suppresses the item entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub block_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subsection: Option<String>,
    pub points: u32,
    #[serde(default)]
    pub not_applicable: bool,
    #[serde(default)]
    pub regex: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub negatives: Vec<String>,
    pub label: String,
}

/// One simulated patient case, as supplied per evaluation request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseDescriptor {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub primary_symptoms: Vec<String>,
    #[serde(default)]
    pub chief_complaint: Option<String>,
    #[serde(default)]
    pub narrative: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Examinee,
    Patient,
    Unknown,
}

/// One utterance of a transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

/// How an item was satisfied. `None` means no method matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    Regex,
    Keyword,
    Heuristic,
    None,
}

/// Outcome of evaluating one active item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult {
    pub item_id: String,
    pub label: String,
    pub matched: bool,
    pub points_awarded: u32,
    pub method: MatchMethod,
    pub match_detail: String,
}

/// Rollup over one block or one systems-review subsection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockResult {
    pub max_points: u32,
    pub points_obtained: u32,
    pub items_total: usize,
    pub items_matched: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub items_total: usize,
    pub items_matched: usize,
    pub match_rate: f64,
    pub examinee_turns: usize,
    pub examinee_chars: usize,
}

/// The final grading output. Ordered maps keep serialization stable so two
/// evaluations of identical inputs are byte-identical; the timestamp is
/// caller-supplied metadata and never feeds scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub case_id: String,
    pub timestamp: DateTime<Utc>,
    pub max_points: u32,
    pub min_points: u32,
    pub points_obtained: u32,
    pub percentage: f64,
    pub passed: bool,
    pub active_subsections: Vec<String>,
    pub blocks: BTreeMap<String, BlockResult>,
    pub subsections: BTreeMap<String, BlockResult>,
    pub items: Vec<ItemResult>,
    pub summary: EvaluationSummary,
}
