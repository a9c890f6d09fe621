use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "osce",
    version,
    about = "Deterministic checklist grading for simulated clinical interviews"
)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a checklist document and report validation results
    Validate(ValidateArgs),
    /// Show how the checklist narrows for one case
    Adapt(AdaptArgs),
    /// Grade a transcript against a case-adapted checklist
    Eval(EvalArgs),
}

#[derive(Parser, Clone)]
pub struct ValidateArgs {
    /// Checklist document (YAML or JSON)
    #[arg(long, env = "OSCE_CHECKLIST", default_value = "data/master-checklist.yaml")]
    pub checklist: PathBuf,
}

#[derive(Parser, Clone)]
pub struct AdaptArgs {
    /// Checklist document (YAML or JSON)
    #[arg(long, env = "OSCE_CHECKLIST", default_value = "data/master-checklist.yaml")]
    pub checklist: PathBuf,

    /// Case descriptor (YAML or JSON)
    #[arg(long)]
    pub case: PathBuf,
}

#[derive(Parser, Clone)]
pub struct EvalArgs {
    /// Checklist document (YAML or JSON)
    #[arg(long, env = "OSCE_CHECKLIST", default_value = "data/master-checklist.yaml")]
    pub checklist: PathBuf,

    /// Case descriptor (YAML or JSON)
    #[arg(long)]
    pub case: PathBuf,

    /// Transcript with [ESTUDIANTE]/[PACIENTE] speaker tags
    #[arg(long)]
    pub transcript: PathBuf,

    /// Emit the result as JSON instead of the console report
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON result to a file
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Exit non-zero when the verdict is a fail
    #[arg(long)]
    pub strict: bool,
}
