//! Reference problem: read two integers from stdin, print their sum.
//!
//! Grounds the S1/S2 scenarios directly: a generator seeded by the
//! orchestrator, and a verifier with no dependency on floating-point
//! formatting quirks.

use std::sync::OnceLock;

use rand::{rngs::StdRng, Rng};

use crate::models::{TestCase, TestCaseType};

const BASIC: &str = "basic";
const EDGE: &str = "edge";

static TEST_CASE_TYPES: OnceLock<Vec<TestCaseType>> = OnceLock::new();

pub struct SumTwo;

impl super::Problem for SumTwo {
    fn test_case_types(&self) -> &[TestCaseType] {
        TEST_CASE_TYPES.get_or_init(|| vec![TestCaseType::new(BASIC, 5), TestCaseType::new(EDGE, 2)])
    }

    fn generate_input(&self, test_type: &str, rng: &mut StdRng) -> TestCase {
        let (a, b) = match test_type {
            EDGE => {
                let edges = [i32::MIN / 2, i32::MAX / 2, 0];
                let a = edges[rng.random_range(0..edges.len())];
                let b = edges[rng.random_range(0..edges.len())];
                (a, b)
            }
            _ => (rng.random_range(-1_000..1_000), rng.random_range(-1_000..1_000)),
        };

        TestCase {
            test_type: test_type.to_string(),
            input: serde_json::json!({"a": a, "b": b}),
            expected_output: serde_json::json!(a as i64 + b as i64),
            input_serialized: vec![a.to_string(), b.to_string()],
        }
    }

    fn verify(&self, input: &serde_json::Value, user_output: &str) -> bool {
        let a = match input.get("a").and_then(|v| v.as_i64()) {
            Some(a) => a,
            None => return false,
        };
        let b = match input.get("b").and_then(|v| v.as_i64()) {
            Some(b) => b,
            None => return false,
        };
        match user_output.trim().parse::<i64>() {
            Ok(sum) => sum == a + b,
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Problem;
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn generator_is_deterministic_for_a_given_seed() {
        let mut rng_a = StdRng::seed_from_u64(42);
        let mut rng_b = StdRng::seed_from_u64(42);
        let problem = SumTwo;
        let case_a = problem.generate_input(BASIC, &mut rng_a);
        let case_b = problem.generate_input(BASIC, &mut rng_b);
        assert_eq!(case_a.input, case_b.input);
        assert_eq!(case_a.input_serialized, case_b.input_serialized);
    }

    #[test]
    fn verifies_correct_and_incorrect_sums() {
        let problem = SumTwo;
        let input = serde_json::json!({"a": 3, "b": 4});
        assert!(problem.verify(&input, "7"));
        assert!(problem.verify(&input, "  7\n"));
        assert!(!problem.verify(&input, "8"));
        assert!(!problem.verify(&input, "not a number"));
    }

    #[test]
    fn test_case_count_matches_declared_multiplicities() {
        let problem = SumTwo;
        let total: u32 = problem.test_case_types().iter().map(|t| t.multiplicity).sum();
        assert_eq!(total, 7);
    }
}
