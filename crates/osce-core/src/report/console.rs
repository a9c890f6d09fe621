//! Human-readable evaluation report.

use std::fmt::Write as _;

use crate::checklist::ChecklistStore;
use crate::model::EvaluationResult;

const RULE: &str = "----------------------------------------------------------------------";
const HEAVY_RULE: &str = "======================================================================";

/// Render the evaluation the way an examiner reads it: overall verdict,
/// per-block breakdown, active subsections, summary counts.
pub fn render(result: &EvaluationResult, store: &ChecklistStore) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out, "EVALUATION REPORT - {}", result.case_id);
    let _ = writeln!(out, "{HEAVY_RULE}");
    let _ = writeln!(out, "Timestamp: {}", result.timestamp.to_rfc3339());
    let _ = writeln!(out);

    let _ = writeln!(out, "OVERALL RESULT:");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  Points obtained: {} / {}",
        result.points_obtained, result.max_points
    );
    let _ = writeln!(out, "  Percentage: {}%", result.percentage);
    let _ = writeln!(out, "  Minimum required: {} pts", result.min_points);
    let verdict = if result.passed { "✅ PASSED" } else { "❌ FAILED" };
    let _ = writeln!(out, "  Verdict: {verdict}");
    let _ = writeln!(out);

    let _ = writeln!(out, "RESULTS BY BLOCK:");
    let _ = writeln!(out, "{RULE}");
    for (block_id, block) in &result.blocks {
        let name = store
            .block(block_id)
            .map(|b| b.name.as_str())
            .unwrap_or(block_id.as_str());
        let _ = writeln!(out, "  {block_id} ({name}):");
        let _ = writeln!(
            out,
            "    Points: {} / {}",
            block.points_obtained, block.max_points
        );
        let _ = writeln!(
            out,
            "    Items: {} / {} ({}%)",
            block.items_matched, block.items_total, block.percentage
        );
    }

    if !result.subsections.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "ACTIVE SYSTEMS-REVIEW SUBSECTIONS:");
        let _ = writeln!(out, "{RULE}");
        for (subsection, sub) in &result.subsections {
            let _ = writeln!(out, "  {subsection}:");
            let _ = writeln!(out, "    Points: {} / {}", sub.points_obtained, sub.max_points);
            let _ = writeln!(
                out,
                "    Items: {} / {} ({}%)",
                sub.items_matched, sub.items_total, sub.percentage
            );
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "SUMMARY:");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  Items evaluated: {}", result.summary.items_total);
    let _ = writeln!(
        out,
        "  Items matched: {} ({}%)",
        result.summary.items_matched, result.summary.match_rate
    );
    let _ = writeln!(out, "  Examinee turns: {}", result.summary.examinee_turns);
    let _ = writeln!(out, "  Examinee characters: {}", result.summary.examinee_chars);
    let _ = writeln!(out, "{HEAVY_RULE}");

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::CaseAdapter;
    use crate::checklist::DocumentFormat;
    use crate::eval::Evaluator;
    use crate::model::CaseDescriptor;
    use crate::transcript::Transcript;
    use chrono::{TimeZone, Utc};

    #[test]
    fn report_names_blocks_and_states_the_verdict() {
        let doc = serde_json::json!({
            "metadata": {"passing_percentage": 50.0},
            "blocks": [{"id": "B0", "name": "Introduction", "max_points": 1}],
            "items": [{"id": "B0_01", "block_id": "B0", "points": 1, "label": "greets",
                       "keywords": ["hola"]}]
        });
        let store = ChecklistStore::load_str(&doc.to_string(), DocumentFormat::Json).unwrap();
        let adapted = CaseAdapter::new(&store).adapt(&CaseDescriptor {
            id: "demo".into(),
            ..Default::default()
        });
        let prepared = Transcript::parse("[ESTUDIANTE]: Hola, buenos días.").prepare();
        let instant = Utc.with_ymd_and_hms(2024, 5, 17, 10, 0, 0).unwrap();
        let result = Evaluator::new(&store).evaluate(&adapted, &prepared, instant);

        let report = render(&result, &store);
        assert!(report.contains("EVALUATION REPORT - demo"));
        assert!(report.contains("B0 (Introduction)"));
        assert!(report.contains("✅ PASSED"));
        assert!(report.contains("Points obtained: 1 / 1"));
    }
}
