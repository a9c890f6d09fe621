use osce_core::ChecklistStore;

use super::exit_codes;
use crate::cli::args::ValidateArgs;

pub fn run(args: &ValidateArgs) -> anyhow::Result<i32> {
    let store = match ChecklistStore::load(&args.checklist) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("❌ Checklist validation failed: {e}");
            return Ok(exit_codes::CONFIG_ERROR);
        }
    };

    for warning in store.warnings() {
        eprintln!(
            "⚠️  item {}: dropped pattern {:?} ({})",
            warning.item_id, warning.pattern, warning.message
        );
    }

    let meta = store.metadata();
    println!(
        "✅ Checklist OK (v{}): {} blocks, {} items, {} points, pass at {}% = {} pts",
        meta.version,
        meta.total_blocks,
        meta.total_items,
        meta.max_points,
        meta.passing_percentage,
        meta.min_points_required
    );
    let subsections = store.subsections();
    if !subsections.is_empty() {
        println!("Systems-review subsections: {}", subsections.join(", "));
    }
    Ok(exit_codes::OK)
}
