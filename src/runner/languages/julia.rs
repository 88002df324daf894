//! Julia language handler

use super::LanguageHandler;

pub fn handler() -> LanguageHandler {
    LanguageHandler {
        source_file: "solution.jl".to_string(),
        // Julia has no ahead-of-time compile step; the first run already
        // JIT-compiles, so no separate compile_argv is needed.
        compile_argv: None,
        run_argv: vec!["julia".to_string(), "/workspace/solution.jl".to_string()],
    }
}
