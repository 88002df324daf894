//! Language-specific handlers for compilation and execution

pub mod c;
pub mod javascript;
pub mod julia;
pub mod python;

use crate::{error::AppError, models::Language};

/// Language handler for compilation and execution. `argv` fields are token
/// vectors, not shell strings -- the runner passes them straight to
/// `SandboxBackend::exec`. All languages share the one process-bound
/// sandbox, so a handler carries no container image of its own.
#[derive(Debug, Clone)]
pub struct LanguageHandler {
    pub source_file: String,
    pub compile_argv: Option<Vec<String>>,
    pub run_argv: Vec<String>,
}

impl LanguageHandler {
    /// Get the handler for a language.
    pub fn for_language(language: Language) -> Result<Self, AppError> {
        match language {
            Language::C => Ok(c::handler()),
            Language::Python3 => Ok(python::handler()),
            Language::Javascript => Ok(javascript::handler()),
            Language::Julia => Ok(julia::handler()),
        }
    }

    pub fn run_argv(&self) -> Vec<&str> {
        self.run_argv.iter().map(String::as_str).collect()
    }

    pub fn compile_argv(&self) -> Option<Vec<&str>> {
        self.compile_argv
            .as_ref()
            .map(|argv| argv.iter().map(String::as_str).collect())
    }
}
