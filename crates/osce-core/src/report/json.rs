use std::path::Path;

use crate::model::EvaluationResult;

pub fn to_pretty_string(result: &EvaluationResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

pub fn write(result: &EvaluationResult, out: &Path) -> anyhow::Result<()> {
    let mut payload = to_pretty_string(result)?;
    payload.push('\n');
    std::fs::write(out, payload)?;
    Ok(())
}
