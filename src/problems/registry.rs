//! Problem lookup by normalized key.

use std::collections::HashMap;

use super::{builtin_problems, Problem};

/// A problem key that does not resolve to any registered problem.
#[derive(Debug, thiserror::Error)]
#[error("unknown problem: {0}")]
pub struct ProblemNotFound(pub String);

/// Compile-time table of problem plug-ins, keyed by underscore-normalized
/// name (dashes and underscores are equivalent on lookup).
pub struct ProblemRegistry {
    problems: HashMap<String, Box<dyn Problem>>,
}

impl ProblemRegistry {
    pub fn new() -> Self {
        Self {
            problems: builtin_problems(),
        }
    }

    /// Normalize a problem key as it arrives on the wire: dashes become
    /// underscores.
    pub fn normalize(key: &str) -> String {
        key.replace('-', "_")
    }

    pub fn get(&self, key: &str) -> Result<&dyn Problem, ProblemNotFound> {
        let normalized = Self::normalize(key);
        self.problems
            .get(&normalized)
            .map(|p| p.as_ref())
            .ok_or_else(|| ProblemNotFound(key.to_string()))
    }
}

impl Default for ProblemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_dashes_to_underscores() {
        assert_eq!(ProblemRegistry::normalize("sum-two"), "sum_two");
        assert_eq!(ProblemRegistry::normalize("sum_two"), "sum_two");
    }

    #[test]
    fn looks_up_registered_problem_by_either_spelling() {
        let registry = ProblemRegistry::new();
        assert!(registry.get("sum_two").is_ok());
        assert!(registry.get("sum-two").is_ok());
    }

    #[test]
    fn unknown_key_is_not_found() {
        let registry = ProblemRegistry::new();
        assert!(registry.get("does-not-exist").is_err());
    }
}
