//! Case adaptation: narrow a checklist to the symptom domain of one case
//! and recompute the pass threshold for the narrowed item set.

pub mod symptoms;

use std::collections::{BTreeMap, BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::checklist::{min_points_for, ChecklistStore};
use crate::model::{CaseDescriptor, ChecklistItem};
use crate::transcript::normalize;

use symptoms::SYMPTOM_SUBSECTIONS;

static SYMPTOM_INDEX: Lazy<HashMap<&'static str, &'static [&'static str]>> =
    Lazy::new(|| SYMPTOM_SUBSECTIONS.iter().copied().collect());

// Word-boundary scanners for free-text symptom mentions: "tos" must not
// fire inside "horas".
static SYMPTOM_SCANNERS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SYMPTOM_SUBSECTIONS
        .iter()
        .map(|(key, _)| {
            let pattern = format!(r"\b{}\b", regex::escape(key));
            (*key, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// The case-specific view of a checklist: active items plus thresholds
/// recomputed from them. Derived once per case, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct AdaptedChecklist {
    pub case_id: String,
    pub active_items: Vec<ChecklistItem>,
    pub max_points: u32,
    pub min_points: u32,
    pub active_block_points: BTreeMap<String, u32>,
    pub active_subsections: Vec<String>,
    pub detected_symptoms: Vec<String>,
}

pub struct CaseAdapter<'a> {
    store: &'a ChecklistStore,
}

impl<'a> CaseAdapter<'a> {
    pub fn new(store: &'a ChecklistStore) -> Self {
        Self { store }
    }

    /// Derive the active item set for a case.
    ///
    /// Universal blocks (those without subsections) activate whole; the
    /// systems-review block activates only the subsections mapped from the
    /// detected symptoms, or all of them when nothing maps (an
    /// under-specified case must not shrink the exam to zero
    /// systems-review content).
    pub fn adapt(&self, case: &CaseDescriptor) -> AdaptedChecklist {
        let detected = self.extract_symptoms(case);
        let active_subsections = self.active_subsections(&detected);

        let mut active_items: Vec<ChecklistItem> = Vec::new();
        let mut active_block_points: BTreeMap<String, u32> = BTreeMap::new();

        for block in self.store.blocks() {
            if !self.store.subsections_for_block(&block.id).is_empty() {
                continue;
            }
            let block_items = self.store.items_for_block(&block.id);
            let points: u32 = block_items
                .iter()
                .filter(|it| !it.not_applicable)
                .map(|it| it.points)
                .sum();
            active_block_points.insert(block.id.clone(), points);
            active_items.extend(block_items.into_iter().cloned());
        }

        if let Some(id) = self.store.systems_review_block_id() {
            active_block_points.insert(id.to_string(), 0);
        }
        for sub in &active_subsections {
            for item in self.store.items_for_subsection(sub) {
                if !item.not_applicable {
                    *active_block_points.entry(item.block_id.clone()).or_default() += item.points;
                }
                active_items.push(item.clone());
            }
        }

        let max_points: u32 = active_items
            .iter()
            .filter(|it| !it.not_applicable)
            .map(|it| it.points)
            .sum();
        let min_points = min_points_for(max_points, self.store.metadata().passing_percentage);

        debug!(
            case_id = %case.id,
            symptoms = detected.len(),
            subsections = active_subsections.len(),
            max_points,
            min_points,
            "adapted checklist to case"
        );

        AdaptedChecklist {
            case_id: case.id.clone(),
            active_items,
            max_points,
            min_points,
            active_block_points,
            active_subsections: active_subsections.into_iter().collect(),
            detected_symptoms: detected.into_iter().collect(),
        }
    }

    /// Normalized `primary_symptoms` plus whole-word mentions of any known
    /// symptom key in the case's free-text fields.
    fn extract_symptoms(&self, case: &CaseDescriptor) -> BTreeSet<String> {
        let mut detected = BTreeSet::new();
        for symptom in &case.primary_symptoms {
            let norm = normalize(symptom);
            if !norm.is_empty() {
                detected.insert(norm);
            }
        }
        for text in [case.chief_complaint.as_deref(), case.narrative.as_deref()]
            .into_iter()
            .flatten()
        {
            let norm = normalize(text);
            if norm.is_empty() {
                continue;
            }
            for (key, scanner) in SYMPTOM_SCANNERS.iter() {
                if scanner.is_match(&norm) {
                    detected.insert((*key).to_string());
                }
            }
        }
        detected
    }

    /// Map detected symptoms through the static table, keeping only
    /// subsections this checklist actually declares. An empty mapping
    /// activates every subsection (fallback).
    fn active_subsections(&self, symptoms: &BTreeSet<String>) -> BTreeSet<String> {
        let declared: BTreeSet<String> = self.store.subsections().into_iter().collect();
        let mut active = BTreeSet::new();
        for symptom in symptoms {
            if let Some(subs) = SYMPTOM_INDEX.get(symptom.as_str()) {
                for sub in *subs {
                    if declared.contains(*sub) {
                        active.insert((*sub).to_string());
                    }
                }
            }
        }
        if active.is_empty() {
            return declared;
        }
        active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::DocumentFormat;

    fn store() -> ChecklistStore {
        let doc = serde_json::json!({
            "metadata": {"passing_percentage": 57.2},
            "blocks": [
                {"id": "B0", "name": "Introduction", "max_points": 2},
                {"id": "B7", "name": "Systems review", "max_points": 2}
            ],
            "items": [
                {"id": "B0_01", "block_id": "B0", "points": 1, "label": "greets"},
                {"id": "B0_02", "block_id": "B0", "points": 1, "label": "introduces self"},
                {"id": "B7_01", "block_id": "B7", "subsection": "Cardiovascular",
                 "points": 1, "label": "asks about palpitations"},
                {"id": "B7_02", "block_id": "B7", "subsection": "Digestive",
                 "points": 1, "label": "asks about nausea"}
            ]
        });
        ChecklistStore::load_str(&doc.to_string(), DocumentFormat::Json).unwrap()
    }

    fn case(symptoms: &[&str]) -> CaseDescriptor {
        CaseDescriptor {
            id: "case-1".into(),
            primary_symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn symptom_narrows_systems_review_to_mapped_subsections() {
        let store = store();
        let adapted = CaseAdapter::new(&store).adapt(&case(&["chest pain"]));
        // "chest pain" maps to Cardiovascular + Respiratory; only
        // Cardiovascular is declared by this checklist.
        assert_eq!(adapted.active_subsections, vec!["Cardiovascular"]);
        assert_eq!(adapted.max_points, 3);
        assert_eq!(adapted.min_points, 2); // ceil(3 * 57.2 / 100)
        assert_eq!(adapted.active_items.len(), 3);
        assert_eq!(adapted.active_block_points["B0"], 2);
        assert_eq!(adapted.active_block_points["B7"], 1);
    }

    #[test]
    fn symptomless_case_falls_back_to_full_activation() {
        let store = store();
        let adapted = CaseAdapter::new(&store).adapt(&case(&[]));
        assert_eq!(adapted.active_subsections, vec!["Cardiovascular", "Digestive"]);
        assert_eq!(adapted.max_points, store.metadata().max_points);
        assert!(adapted.detected_symptoms.is_empty());
    }

    #[test]
    fn unmapped_symptoms_also_fall_back() {
        let store = store();
        let adapted = CaseAdapter::new(&store).adapt(&case(&["hiccups"]));
        assert_eq!(adapted.active_subsections.len(), 2);
        assert_eq!(adapted.max_points, 4);
        assert_eq!(adapted.detected_symptoms, vec!["hiccups"]);
    }

    #[test]
    fn adapted_max_never_exceeds_global_max() {
        let store = store();
        let symptom_sets: [&[&str]; 4] =
            [&["chest pain"], &["nausea"], &["chest pain", "nausea"], &[]];
        for symptoms in symptom_sets {
            let adapted = CaseAdapter::new(&store).adapt(&case(symptoms));
            assert!(adapted.max_points <= store.metadata().max_points);
            assert_eq!(
                adapted.min_points,
                min_points_for(adapted.max_points, store.metadata().passing_percentage)
            );
        }
    }

    #[test]
    fn free_text_scan_requires_whole_words() {
        let store = store();
        // "tos" must not be detected inside "horas".
        let mut c = case(&[]);
        c.chief_complaint = Some("lleva varias horas con molestias".into());
        let adapted = CaseAdapter::new(&store).adapt(&c);
        assert!(adapted.detected_symptoms.is_empty());

        let mut c = case(&[]);
        c.narrative = Some("Refiere tos seca y náuseas desde ayer.".into());
        let adapted = CaseAdapter::new(&store).adapt(&c);
        assert_eq!(adapted.detected_symptoms, vec!["nauseas", "tos"]);
        assert_eq!(adapted.active_subsections, vec!["Digestive"]);
    }

    #[test]
    fn primary_symptoms_are_normalized_before_lookup() {
        let store = store();
        let adapted = CaseAdapter::new(&store).adapt(&case(&["  Dolor Torácico "]));
        assert_eq!(adapted.detected_symptoms, vec!["dolor toracico"]);
        assert_eq!(adapted.active_subsections, vec!["Cardiovascular"]);
    }

    #[test]
    fn checklist_without_systems_review_adapts_to_universal_blocks_only() {
        let doc = serde_json::json!({
            "metadata": {"passing_percentage": 57.2},
            "blocks": [{"id": "B0", "name": "Introduction", "max_points": 10}],
            "items": [{"id": "B0_01", "block_id": "B0", "points": 10, "label": "greets"}]
        });
        let store = ChecklistStore::load_str(&doc.to_string(), DocumentFormat::Json).unwrap();
        let adapted = CaseAdapter::new(&store).adapt(&case(&[]));
        assert!(adapted.active_subsections.is_empty());
        assert_eq!(adapted.max_points, 10);
        assert_eq!(adapted.min_points, 6); // ceil(5.72)
        assert_eq!(adapted.active_block_points.len(), 1);
    }
}
