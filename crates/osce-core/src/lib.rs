//! Deterministic grading of simulated clinical-interview transcripts.
//!
//! The pipeline is: load a checklist document into a [`ChecklistStore`],
//! narrow it to one case with [`CaseAdapter::adapt`], preprocess the
//! transcript with [`Transcript::prepare`], then score with
//! [`Evaluator::evaluate`]. Every stage is a pure function of its inputs:
//! the loaded store is immutable and safe to share across threads, and
//! evaluating the same adapted checklist against the same prepared
//! transcript twice yields identical results.

pub mod adapter;
pub mod checklist;
pub mod errors;
pub mod eval;
pub mod model;
pub mod report;
pub mod transcript;

pub use adapter::{AdaptedChecklist, CaseAdapter};
pub use checklist::{ChecklistStore, DocumentFormat};
pub use errors::{LoadError, LoadWarning};
pub use eval::Evaluator;
pub use model::{
    BlockResult, CaseDescriptor, ChecklistBlock, ChecklistItem, ChecklistMetadata,
    EvaluationResult, EvaluationSummary, ItemResult, MatchMethod, Speaker, Turn,
};
pub use transcript::{normalize, PreparedTranscript, Transcript};
