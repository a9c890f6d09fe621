pub mod adapt;
pub mod eval;
pub mod validate;

use std::path::Path;

use anyhow::Context;

use osce_core::CaseDescriptor;

use super::args::{Cli, Command};

pub mod exit_codes {
    pub const OK: i32 = 0;
    pub const EVAL_FAILED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Validate(args) => validate::run(&args),
        Command::Adapt(args) => adapt::run(&args),
        Command::Eval(args) => eval::run(&args),
    }
}

/// Case descriptors ride along as YAML or JSON, sniffed by extension.
pub(crate) fn load_case(path: &Path) -> anyhow::Result<CaseDescriptor> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read case {}", path.display()))?;
    let case = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(&raw).context("failed to parse case JSON")?,
        _ => serde_yaml::from_str(&raw).context("failed to parse case YAML")?,
    };
    Ok(case)
}
