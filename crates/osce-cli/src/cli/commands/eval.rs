use anyhow::Context;

use osce_core::report;
use osce_core::{CaseAdapter, ChecklistStore, Evaluator, Transcript};

use super::{exit_codes, load_case};
use crate::cli::args::EvalArgs;

pub fn run(args: &EvalArgs) -> anyhow::Result<i32> {
    let store = ChecklistStore::load(&args.checklist).context("failed to load checklist")?;
    let case = load_case(&args.case)?;
    let raw = std::fs::read_to_string(&args.transcript)
        .with_context(|| format!("failed to read transcript {}", args.transcript.display()))?;

    let adapted = CaseAdapter::new(&store).adapt(&case);
    let prepared = Transcript::parse(&raw).prepare();
    let result = Evaluator::new(&store).evaluate_now(&adapted, &prepared);

    if let Some(out) = &args.out {
        report::json::write(&result, out)
            .with_context(|| format!("failed to write result to {}", out.display()))?;
    }
    if args.json {
        println!("{}", report::json::to_pretty_string(&result)?);
    } else {
        print!("{}", report::console::render(&result, &store));
    }

    if args.strict && !result.passed {
        return Ok(exit_codes::EVAL_FAILED);
    }
    Ok(exit_codes::OK)
}
