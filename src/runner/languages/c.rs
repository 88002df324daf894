//! C language handler

use super::LanguageHandler;

pub fn handler() -> LanguageHandler {
    LanguageHandler {
        source_file: "solution.c".to_string(),
        compile_argv: Some(
            "gcc -O2 -std=c17 -Wall -Wextra -o /workspace/solution /workspace/solution.c -lm"
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        ),
        run_argv: vec!["/workspace/solution".to_string()],
    }
}
