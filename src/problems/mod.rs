//! Problem registry: a compile-time table of problem plug-ins.
//!
//! Replaces dynamic module loading with static registration -- every
//! problem implementation is known at build time and registered into a
//! `HashMap` the first time the registry is constructed.

pub mod registry;
pub mod reverse_string;
pub mod sum_two;

use std::collections::HashMap;

use rand::rngs::StdRng;

use crate::models::TestCase;

pub use registry::{ProblemNotFound, ProblemRegistry};

/// A problem plug-in: declares its test-case type table and resource
/// manifest, generates fresh test cases deterministically given a seeded
/// RNG, and verifies a user's output against the original input.
pub trait Problem: Send + Sync {
    /// Ordered test-case type table; execution order follows this order.
    fn test_case_types(&self) -> &[crate::models::TestCaseType];

    /// Host-side resource filenames staged into the sandbox before any
    /// case runs, resolved relative to `resources/<problem_key>/`.
    fn resources(&self) -> &[&str] {
        &[]
    }

    /// Produce one fresh TestCase of the named type. Must be a pure
    /// function of `(test_type, rng)` so the same seed always reproduces
    /// the same case.
    fn generate_input(&self, test_type: &str, rng: &mut StdRng) -> TestCase;

    /// Decide whether `user_output` is correct for `input`. Must be total
    /// on the declared input shape.
    fn verify(&self, input: &serde_json::Value, user_output: &str) -> bool;
}

/// Build the static registry of every problem shipped with this crate.
pub fn builtin_problems() -> HashMap<String, Box<dyn Problem>> {
    let mut map: HashMap<String, Box<dyn Problem>> = HashMap::new();
    map.insert("sum_two".to_string(), Box::new(sum_two::SumTwo));
    map.insert(
        "reverse_string".to_string(),
        Box::new(reverse_string::ReverseString),
    );
    map
}
