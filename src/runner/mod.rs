//! Language runner: per-language handlers plus the prepare/run pipeline.

pub mod languages;
pub mod runner;

pub use languages::LanguageHandler;
pub use runner::{prepare, CaseResultDraft, PreparedSubmission};
