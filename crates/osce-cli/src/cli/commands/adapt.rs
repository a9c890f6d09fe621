use anyhow::Context;

use osce_core::{CaseAdapter, ChecklistStore};

use super::{exit_codes, load_case};
use crate::cli::args::AdaptArgs;

pub fn run(args: &AdaptArgs) -> anyhow::Result<i32> {
    let store = ChecklistStore::load(&args.checklist).context("failed to load checklist")?;
    let case = load_case(&args.case)?;
    let adapted = CaseAdapter::new(&store).adapt(&case);

    println!("Case: {}", adapted.case_id);
    println!("Detected symptoms: {}", join_or_none(&adapted.detected_symptoms));
    println!("Active subsections: {}", join_or_none(&adapted.active_subsections));
    println!("Active items: {}", adapted.active_items.len());
    println!(
        "Points: max {} / min to pass {}",
        adapted.max_points, adapted.min_points
    );
    for (block_id, points) in &adapted.active_block_points {
        println!("  {block_id}: {points} pts");
    }
    Ok(exit_codes::OK)
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".into()
    } else {
        values.join(", ")
    }
}
