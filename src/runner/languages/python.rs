//! Python 3 language handler

use super::LanguageHandler;

pub fn handler() -> LanguageHandler {
    LanguageHandler {
        source_file: "solution.py".to_string(),
        // No preparation step -- a syntax error surfaces as a per-case
        // NonZeroExit/stderr, not a submission-wide compile failure.
        compile_argv: None,
        run_argv: vec!["python3".to_string(), "/workspace/solution.py".to_string()],
    }
}
