use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Fatal checklist-load failures. A document that trips any of these is
/// rejected as a whole; the engine never operates on a partially valid
/// checklist.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("checklist document is missing required section '{0}'")]
    MissingSection(&'static str),

    #[error("duplicate block id '{0}'")]
    DuplicateBlockId(String),

    #[error("duplicate item id '{0}'")]
    DuplicateItemId(String),

    #[error("item '{item}' references unknown block '{block}'")]
    UnknownBlock { item: String, block: String },

    #[error(
        "block '{block}' declares {declared} points but its applicable items sum to {actual}"
    )]
    BlockPointsMismatch {
        block: String,
        declared: u32,
        actual: u32,
    },

    #[error("failed to read checklist {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse checklist document: {0}")]
    Parse(String),
}

/// Non-fatal condition recorded during load. Currently only produced for
/// item regex patterns that fail to compile: the pattern is dropped, the
/// item keeps its remaining patterns and keywords, and loading continues.
#[derive(Debug, Clone, Serialize)]
pub struct LoadWarning {
    pub item_id: String,
    pub pattern: String,
    pub message: String,
}
