//! Checklist loading, validation and indexing.
//!
//! A [`ChecklistStore`] is constructed once from a YAML or JSON document,
//! validated fail-fast, and never mutated afterwards. Lookups over unknown
//! keys return empty collections. To pick up an edited document, load a new
//! store and swap the reference; concurrent evaluations share the old one
//! read-only until they finish.

use std::collections::HashMap;
use std::path::Path;

use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use tracing::warn;

use crate::errors::{LoadError, LoadWarning};
use crate::model::{ChecklistBlock, ChecklistItem, ChecklistMetadata};

/// Checklist format version assumed when the document carries none.
const DEFAULT_VERSION: &str = "2.0";

/// Historical master-checklist pass threshold, used when the document does
/// not declare one.
pub const DEFAULT_PASSING_PERCENTAGE: f64 = 57.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

#[derive(Debug, Default, Deserialize)]
struct RawMetadata {
    version: Option<String>,
    passing_percentage: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    metadata: Option<RawMetadata>,
    blocks: Option<Vec<ChecklistBlock>>,
    items: Option<Vec<ChecklistItem>>,
}

/// Minimum points needed to pass `max_points` at the given percentage.
pub(crate) fn min_points_for(max_points: u32, passing_percentage: f64) -> u32 {
    (f64::from(max_points) * passing_percentage / 100.0).ceil() as u32
}

/// Immutable, indexed view of a validated checklist document.
#[derive(Debug)]
pub struct ChecklistStore {
    metadata: ChecklistMetadata,
    blocks: Vec<ChecklistBlock>,
    items: Vec<ChecklistItem>,
    blocks_by_id: HashMap<String, usize>,
    items_by_id: HashMap<String, usize>,
    items_by_block: HashMap<String, Vec<usize>>,
    items_by_subsection: HashMap<String, Vec<usize>>,
    compiled: HashMap<String, Vec<Regex>>,
    warnings: Vec<LoadWarning>,
}

impl ChecklistStore {
    /// Load a checklist from a file, sniffing the format from the
    /// extension (`.json` is JSON, anything else is treated as YAML).
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        };
        Self::load_str(&raw, format)
    }

    /// Parse and validate a checklist document from a string.
    pub fn load_str(source: &str, format: DocumentFormat) -> Result<Self, LoadError> {
        let doc: RawDocument = match format {
            DocumentFormat::Json => {
                serde_json::from_str(source).map_err(|e| LoadError::Parse(e.to_string()))?
            }
            DocumentFormat::Yaml => {
                serde_yaml::from_str(source).map_err(|e| LoadError::Parse(e.to_string()))?
            }
        };
        Self::from_document(doc)
    }

    fn from_document(doc: RawDocument) -> Result<Self, LoadError> {
        let blocks = doc.blocks.ok_or(LoadError::MissingSection("blocks"))?;
        let items = doc.items.ok_or(LoadError::MissingSection("items"))?;

        let mut blocks_by_id = HashMap::with_capacity(blocks.len());
        for (idx, block) in blocks.iter().enumerate() {
            if blocks_by_id.insert(block.id.clone(), idx).is_some() {
                return Err(LoadError::DuplicateBlockId(block.id.clone()));
            }
        }

        let mut items_by_id = HashMap::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if items_by_id.insert(item.id.clone(), idx).is_some() {
                return Err(LoadError::DuplicateItemId(item.id.clone()));
            }
        }

        for item in &items {
            if !blocks_by_id.contains_key(&item.block_id) {
                return Err(LoadError::UnknownBlock {
                    item: item.id.clone(),
                    block: item.block_id.clone(),
                });
            }
        }

        // Declared block ceilings must agree with the item points they own.
        for block in &blocks {
            let actual: u32 = items
                .iter()
                .filter(|it| it.block_id == block.id && !it.not_applicable)
                .map(|it| it.points)
                .sum();
            if actual != block.max_points {
                return Err(LoadError::BlockPointsMismatch {
                    block: block.id.clone(),
                    declared: block.max_points,
                    actual,
                });
            }
        }

        let mut items_by_block: HashMap<String, Vec<usize>> = HashMap::new();
        let mut items_by_subsection: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, item) in items.iter().enumerate() {
            items_by_block
                .entry(item.block_id.clone())
                .or_default()
                .push(idx);
            if let Some(sub) = &item.subsection {
                items_by_subsection.entry(sub.clone()).or_default().push(idx);
            }
        }

        let mut compiled: HashMap<String, Vec<Regex>> = HashMap::new();
        let mut warnings = Vec::new();
        for item in &items {
            let mut patterns = Vec::with_capacity(item.regex.len());
            for pattern in &item.regex {
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(re) => patterns.push(re),
                    Err(e) => {
                        warn!(
                            item_id = %item.id,
                            pattern = %pattern,
                            error = %e,
                            "dropping unparseable regex pattern"
                        );
                        warnings.push(LoadWarning {
                            item_id: item.id.clone(),
                            pattern: pattern.clone(),
                            message: e.to_string(),
                        });
                    }
                }
            }
            compiled.insert(item.id.clone(), patterns);
        }

        let raw_meta = doc.metadata.unwrap_or_default();
        let passing_percentage = raw_meta
            .passing_percentage
            .unwrap_or(DEFAULT_PASSING_PERCENTAGE);
        let max_points: u32 = items
            .iter()
            .filter(|it| !it.not_applicable)
            .map(|it| it.points)
            .sum();
        let metadata = ChecklistMetadata {
            version: raw_meta.version.unwrap_or_else(|| DEFAULT_VERSION.into()),
            total_blocks: blocks.len(),
            total_items: items.len(),
            max_points,
            min_points_required: min_points_for(max_points, passing_percentage),
            passing_percentage,
        };

        Ok(Self {
            metadata,
            blocks,
            items,
            blocks_by_id,
            items_by_id,
            items_by_block,
            items_by_subsection,
            compiled,
            warnings,
        })
    }

    pub fn metadata(&self) -> &ChecklistMetadata {
        &self.metadata
    }

    pub fn blocks(&self) -> &[ChecklistBlock] {
        &self.blocks
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    /// Warnings recorded while loading (dropped regex patterns).
    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    pub fn block(&self, id: &str) -> Option<&ChecklistBlock> {
        self.blocks_by_id.get(id).map(|&idx| &self.blocks[idx])
    }

    pub fn item(&self, id: &str) -> Option<&ChecklistItem> {
        self.items_by_id.get(id).map(|&idx| &self.items[idx])
    }

    pub fn items_for_block(&self, block_id: &str) -> Vec<&ChecklistItem> {
        self.items_by_block
            .get(block_id)
            .map(|idxs| idxs.iter().map(|&i| &self.items[i]).collect())
            .unwrap_or_default()
    }

    pub fn items_for_subsection(&self, subsection: &str) -> Vec<&ChecklistItem> {
        self.items_by_subsection
            .get(subsection)
            .map(|idxs| idxs.iter().map(|&i| &self.items[i]).collect())
            .unwrap_or_default()
    }

    /// All subsection names, sorted.
    pub fn subsections(&self) -> Vec<String> {
        let mut subs: Vec<String> = self.items_by_subsection.keys().cloned().collect();
        subs.sort();
        subs
    }

    /// Subsections owned by one block, sorted.
    pub fn subsections_for_block(&self, block_id: &str) -> Vec<String> {
        let mut subs: Vec<String> = self
            .items_for_block(block_id)
            .iter()
            .filter_map(|it| it.subsection.clone())
            .collect();
        subs.sort();
        subs.dedup();
        subs
    }

    /// The block owning subsectioned items, i.e. the systems-review block.
    /// First by declaration order if a document ever carries more than one.
    pub fn systems_review_block_id(&self) -> Option<&str> {
        self.blocks
            .iter()
            .find(|b| {
                self.items_by_block
                    .get(&b.id)
                    .is_some_and(|idxs| idxs.iter().any(|&i| self.items[i].subsection.is_some()))
            })
            .map(|b| b.id.as_str())
    }

    /// Items that count towards point totals.
    pub fn applicable_items(&self) -> Vec<&ChecklistItem> {
        self.items.iter().filter(|it| !it.not_applicable).collect()
    }

    /// Pre-compiled patterns for one item; empty for unknown ids.
    pub fn compiled_patterns(&self, item_id: &str) -> &[Regex] {
        self.compiled
            .get(item_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
