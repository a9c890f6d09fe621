//! Transcript evaluation: match every active item against the prepared
//! transcript and aggregate item, block, subsection and overall scores.
//!
//! Matching is first-hit-wins per item: negatives veto, then pre-compiled
//! regexes in declared order, then boundary-anchored keywords, then the
//! cross-reference heuristics for explicitly enumerated item ids. Scoring
//! is binary — an item awards its full declared points or nothing.

pub mod heuristics;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use regex::Regex;
use tracing::debug;

use crate::adapter::AdaptedChecklist;
use crate::checklist::ChecklistStore;
use crate::model::{
    BlockResult, ChecklistItem, EvaluationResult, EvaluationSummary, ItemResult, MatchMethod,
};
use crate::transcript::{normalize, PreparedTranscript};

use heuristics::cross_reference_for;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn percentage(obtained: u32, max: u32) -> f64 {
    if max == 0 {
        0.0
    } else {
        round1(f64::from(obtained) / f64::from(max) * 100.0)
    }
}

pub struct Evaluator<'a> {
    store: &'a ChecklistStore,
}

impl<'a> Evaluator<'a> {
    pub fn new(store: &'a ChecklistStore) -> Self {
        Self { store }
    }

    /// Convenience wrapper stamping the current wall-clock time. The
    /// timestamp is result metadata only; use [`Evaluator::evaluate`] with
    /// a fixed instant when byte-identical output matters.
    pub fn evaluate_now(
        &self,
        adapted: &AdaptedChecklist,
        prepared: &PreparedTranscript,
    ) -> EvaluationResult {
        self.evaluate(adapted, prepared, Utc::now())
    }

    /// Score a prepared transcript against an adapted checklist. Pure:
    /// identical inputs produce identical results.
    pub fn evaluate(
        &self,
        adapted: &AdaptedChecklist,
        prepared: &PreparedTranscript,
        evaluated_at: DateTime<Utc>,
    ) -> EvaluationResult {
        let items: Vec<ItemResult> = adapted
            .active_items
            .iter()
            .map(|item| self.evaluate_item(item, prepared))
            .collect();
        let points_obtained: u32 = items.iter().map(|r| r.points_awarded).sum();

        let blocks = block_rollup(adapted, &items);
        let subsections = subsection_rollup(self.store, adapted, &items);

        let items_matched = items.iter().filter(|r| r.matched).count();
        let summary = EvaluationSummary {
            items_total: items.len(),
            items_matched,
            match_rate: if items.is_empty() {
                0.0
            } else {
                round1(items_matched as f64 / items.len() as f64 * 100.0)
            },
            examinee_turns: prepared.examinee_turns.len(),
            examinee_chars: prepared.examinee_turns.iter().map(|t| t.chars().count()).sum(),
        };

        debug!(
            case_id = %adapted.case_id,
            points_obtained,
            max_points = adapted.max_points,
            items_matched,
            "evaluated transcript"
        );

        EvaluationResult {
            case_id: adapted.case_id.clone(),
            timestamp: evaluated_at,
            max_points: adapted.max_points,
            min_points: adapted.min_points,
            points_obtained,
            percentage: percentage(points_obtained, adapted.max_points),
            passed: points_obtained >= adapted.min_points,
            active_subsections: adapted.active_subsections.clone(),
            blocks,
            subsections,
            items,
            summary,
        }
    }

    fn evaluate_item(&self, item: &ChecklistItem, prepared: &PreparedTranscript) -> ItemResult {
        // Negative phrases veto the item outright.
        for negative in &item.negatives {
            let neg = normalize(negative);
            if !neg.is_empty() && prepared.examinee_text.contains(&neg) {
                return miss(item, format!("vetoed by negative phrase '{neg}'"));
            }
        }

        for (i, pattern) in self.store.compiled_patterns(&item.id).iter().enumerate() {
            if let Some(found) = pattern.find(&prepared.examinee_text) {
                return hit(item, MatchMethod::Regex, format!("regex[{i}]: {}", found.as_str()));
            }
        }

        for keyword in &item.keywords {
            let kw = normalize(keyword);
            if kw.is_empty() {
                continue;
            }
            // Whole-phrase match: "ton" must not match inside "tonsure".
            let anchored = format!(r"(?:^|\b){}(?:\b|$)", regex::escape(&kw));
            let Ok(pattern) = Regex::new(&anchored) else {
                continue;
            };
            if pattern.is_match(&prepared.examinee_text) {
                return hit(item, MatchMethod::Keyword, format!("keyword: {kw}"));
            }
        }

        if let Some(rule) = cross_reference_for(&item.id) {
            if rule.matches(&prepared.examinee_text, &prepared.patient_text) {
                return hit(
                    item,
                    MatchMethod::Heuristic,
                    format!("cross-reference: {}", rule.name),
                );
            }
        }

        miss(item, String::new())
    }
}

fn hit(item: &ChecklistItem, method: MatchMethod, detail: String) -> ItemResult {
    ItemResult {
        item_id: item.id.clone(),
        label: item.label.clone(),
        matched: true,
        // Matching is binary; not_applicable items are reported but never
        // contribute points.
        points_awarded: if item.not_applicable { 0 } else { item.points },
        method,
        match_detail: detail,
    }
}

fn miss(item: &ChecklistItem, detail: String) -> ItemResult {
    ItemResult {
        item_id: item.id.clone(),
        label: item.label.clone(),
        matched: false,
        points_awarded: 0,
        method: MatchMethod::None,
        match_detail: detail,
    }
}

#[derive(Default, Clone, Copy)]
struct Tally {
    points: u32,
    total: usize,
    matched: usize,
}

impl Tally {
    fn add(&mut self, result: &ItemResult) {
        self.points += result.points_awarded;
        self.total += 1;
        self.matched += usize::from(result.matched);
    }
}

fn block_rollup(
    adapted: &AdaptedChecklist,
    results: &[ItemResult],
) -> BTreeMap<String, BlockResult> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();
    for (item, result) in adapted.active_items.iter().zip(results) {
        tallies.entry(item.block_id.as_str()).or_default().add(result);
    }

    let mut blocks = BTreeMap::new();
    for (block_id, &max_points) in &adapted.active_block_points {
        let tally = tallies.get(block_id.as_str()).copied().unwrap_or_default();
        blocks.insert(
            block_id.clone(),
            BlockResult {
                max_points,
                points_obtained: tally.points,
                items_total: tally.total,
                items_matched: tally.matched,
                percentage: percentage(tally.points, max_points),
            },
        );
    }
    blocks
}

fn subsection_rollup(
    store: &ChecklistStore,
    adapted: &AdaptedChecklist,
    results: &[ItemResult],
) -> BTreeMap<String, BlockResult> {
    let mut subsections = BTreeMap::new();
    let systems_active = store
        .systems_review_block_id()
        .is_some_and(|id| adapted.active_block_points.contains_key(id));
    if !systems_active {
        return subsections;
    }

    for sub in &adapted.active_subsections {
        let mut max_points = 0u32;
        let mut tally = Tally::default();
        for (item, result) in adapted.active_items.iter().zip(results) {
            if item.subsection.as_deref() != Some(sub.as_str()) {
                continue;
            }
            if !item.not_applicable {
                max_points += item.points;
            }
            tally.add(result);
        }
        subsections.insert(
            sub.clone(),
            BlockResult {
                max_points,
                points_obtained: tally.points,
                items_total: tally.total,
                items_matched: tally.matched,
                percentage: percentage(tally.points, max_points),
            },
        );
    }
    subsections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::CaseAdapter;
    use crate::checklist::DocumentFormat;
    use crate::model::CaseDescriptor;
    use crate::transcript::Transcript;
    use chrono::TimeZone;

    fn store() -> ChecklistStore {
        let doc = serde_json::json!({
            "metadata": {"passing_percentage": 50.0},
            "blocks": [
                {"id": "B5", "name": "Social history", "max_points": 2},
                {"id": "B7", "name": "Systems review", "max_points": 2}
            ],
            "items": [
                {"id": "SOC_SMOKING", "block_id": "B5", "points": 1,
                 "label": "asks about smoking habits", "keywords": ["fumas", "tabaco"]},
                {"id": "SOC_ALCOHOL", "block_id": "B5", "points": 1,
                 "label": "asks about alcohol intake",
                 "regex": ["\\balcohol\\b", "\\bbebes?\\b"]},
                {"id": "B7_01", "block_id": "B7", "subsection": "Cardiovascular",
                 "points": 1, "label": "asks about palpitations", "keywords": ["palpitaciones"]},
                {"id": "B7_02", "block_id": "B7", "subsection": "Digestive",
                 "points": 1, "label": "asks about nausea", "keywords": ["nauseas"]}
            ]
        });
        ChecklistStore::load_str(&doc.to_string(), DocumentFormat::Json).unwrap()
    }

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 10, 0, 0).unwrap()
    }

    fn evaluate(store: &ChecklistStore, transcript: &str) -> EvaluationResult {
        let adapted = CaseAdapter::new(store).adapt(&CaseDescriptor {
            id: "case-1".into(),
            ..Default::default()
        });
        let prepared = Transcript::parse(transcript).prepare();
        Evaluator::new(store).evaluate(&adapted, &prepared, fixed_instant())
    }

    #[test]
    fn keyword_in_examinee_turn_matches() {
        let store = store();
        let result = evaluate(&store, "[ESTUDIANTE]: ¿Fumas?\n[PACIENTE]: Sí, fumo a diario.");
        let item = result.items.iter().find(|r| r.item_id == "SOC_SMOKING").unwrap();
        assert!(item.matched);
        assert_eq!(item.method, MatchMethod::Keyword);
        assert_eq!(item.points_awarded, 1);
    }

    #[test]
    fn patient_text_alone_does_not_match_plain_items() {
        let store = store();
        let result = evaluate(&store, "[PACIENTE]: Fumo mucho.\n[ESTUDIANTE]: Vale.");
        let item = result.items.iter().find(|r| r.item_id == "SOC_SMOKING").unwrap();
        assert!(!item.matched);
        assert_eq!(item.method, MatchMethod::None);
        assert_eq!(result.points_obtained, 0);
    }

    #[test]
    fn regex_wins_over_keywords_and_records_the_matched_substring() {
        let doc = serde_json::json!({
            "blocks": [{"id": "B5", "name": "Social", "max_points": 1}],
            "items": [{
                "id": "X", "block_id": "B5", "points": 1, "label": "x",
                "regex": ["\\btabaco\\b"], "keywords": ["tabaco"]
            }]
        });
        let store = ChecklistStore::load_str(&doc.to_string(), DocumentFormat::Json).unwrap();
        let result = evaluate(&store, "[ESTUDIANTE]: ¿Consumes tabaco?");
        assert_eq!(result.items[0].method, MatchMethod::Regex);
        assert_eq!(result.items[0].match_detail, "regex[0]: tabaco");
    }

    #[test]
    fn keywords_are_phrase_boundary_anchored() {
        let doc = serde_json::json!({
            "blocks": [{"id": "B0", "name": "a", "max_points": 1}],
            "items": [{"id": "X", "block_id": "B0", "points": 1, "label": "x",
                       "keywords": ["ton"]}]
        });
        let store = ChecklistStore::load_str(&doc.to_string(), DocumentFormat::Json).unwrap();
        let miss = evaluate(&store, "[ESTUDIANTE]: the tonsure was visible");
        assert!(!miss.items[0].matched);
        let hit = evaluate(&store, "[ESTUDIANTE]: a ton of bricks");
        assert!(hit.items[0].matched);
    }

    #[test]
    fn heuristic_infers_the_question_from_the_patient_answer() {
        let store = store();
        // "hábitos" normalizes to "habitos", a habit-question lexeme; the
        // keyword list ("fumas", "tabaco") does not contain it, so only the
        // cross-reference can award this item.
        let result = evaluate(
            &store,
            "[ESTUDIANTE]: Háblame de tus hábitos.\n[PACIENTE]: Fumo un paquete al día.",
        );
        let item = result.items.iter().find(|r| r.item_id == "SOC_SMOKING").unwrap();
        assert!(item.matched);
        assert_eq!(item.method, MatchMethod::Heuristic);
        assert_eq!(item.match_detail, "cross-reference: smoking_habits");
    }

    #[test]
    fn negative_phrase_vetoes_every_method() {
        let doc = serde_json::json!({
            "blocks": [{"id": "B0", "name": "a", "max_points": 1}],
            "items": [{
                "id": "X", "block_id": "B0", "points": 1, "label": "x",
                "keywords": ["dolor"], "negatives": ["sin dolor"]
            }]
        });
        let store = ChecklistStore::load_str(&doc.to_string(), DocumentFormat::Json).unwrap();
        let result = evaluate(&store, "[ESTUDIANTE]: Está sin dolor ahora mismo?");
        assert!(!result.items[0].matched);
        assert_eq!(result.items[0].method, MatchMethod::None);
        assert!(result.items[0].match_detail.starts_with("vetoed"));
    }

    #[test]
    fn rollups_cover_blocks_and_active_subsections() {
        let store = store();
        let result = evaluate(
            &store,
            "[ESTUDIANTE]: ¿Fumas? ¿Has notado palpitaciones o náuseas?",
        );
        assert_eq!(result.points_obtained, 3);
        assert_eq!(result.blocks["B5"].points_obtained, 1);
        assert_eq!(result.blocks["B5"].items_total, 2);
        assert_eq!(result.blocks["B5"].items_matched, 1);
        assert_eq!(result.blocks["B5"].percentage, 50.0);
        assert_eq!(result.blocks["B7"].points_obtained, 2);
        assert_eq!(result.subsections["Cardiovascular"].points_obtained, 1);
        assert_eq!(result.subsections["Digestive"].percentage, 100.0);
        assert_eq!(result.summary.items_matched, 3);
        assert_eq!(result.summary.match_rate, 75.0);
    }

    #[test]
    fn empty_transcript_yields_a_well_formed_zero_result() {
        let store = store();
        let result = evaluate(&store, "");
        assert_eq!(result.points_obtained, 0);
        assert_eq!(result.percentage, 0.0);
        assert!(!result.passed);
        assert_eq!(result.summary.items_total, 4);
        assert_eq!(result.summary.examinee_turns, 0);
    }

    #[test]
    fn not_applicable_items_report_but_award_nothing() {
        let doc = serde_json::json!({
            "blocks": [{"id": "B0", "name": "a", "max_points": 1}],
            "items": [
                {"id": "X", "block_id": "B0", "points": 1, "label": "x", "keywords": ["hola"]},
                {"id": "Y", "block_id": "B0", "points": 2, "not_applicable": true,
                 "label": "y", "keywords": ["hola"]}
            ]
        });
        let store = ChecklistStore::load_str(&doc.to_string(), DocumentFormat::Json).unwrap();
        let result = evaluate(&store, "[ESTUDIANTE]: Hola.");
        let na = result.items.iter().find(|r| r.item_id == "Y").unwrap();
        assert!(na.matched);
        assert_eq!(na.points_awarded, 0);
        assert_eq!(result.points_obtained, 1);
        assert_eq!(result.max_points, 1);
    }

    #[test]
    fn evaluation_is_deterministic() {
        let store = store();
        let adapted = CaseAdapter::new(&store).adapt(&CaseDescriptor {
            id: "case-1".into(),
            primary_symptoms: vec!["palpitations".into()],
            ..Default::default()
        });
        let prepared =
            Transcript::parse("[ESTUDIANTE]: ¿Fumas? ¿Palpitaciones?\n[PACIENTE]: Sí.").prepare();
        let evaluator = Evaluator::new(&store);
        let a = evaluator.evaluate(&adapted, &prepared, fixed_instant());
        let b = evaluator.evaluate(&adapted, &prepared, fixed_instant());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
