//! JavaScript (Node.js) language handler

use super::LanguageHandler;

pub fn handler() -> LanguageHandler {
    LanguageHandler {
        source_file: "solution.js".to_string(),
        // No preparation step -- a syntax error surfaces as a per-case
        // NonZeroExit/stderr, not a submission-wide compile failure.
        compile_argv: None,
        run_argv: vec!["node".to_string(), "/workspace/solution.js".to_string()],
    }
}
