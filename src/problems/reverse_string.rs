//! Reference problem: read a line, print it reversed.

use std::sync::OnceLock;

use rand::{rngs::StdRng, Rng};

use crate::models::{TestCase, TestCaseType};

const BASIC: &str = "basic";

static TEST_CASE_TYPES: OnceLock<Vec<TestCaseType>> = OnceLock::new();

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub struct ReverseString;

impl super::Problem for ReverseString {
    fn test_case_types(&self) -> &[TestCaseType] {
        TEST_CASE_TYPES.get_or_init(|| vec![TestCaseType::new(BASIC, 5)])
    }

    fn generate_input(&self, test_type: &str, rng: &mut StdRng) -> TestCase {
        let len = rng.random_range(1..32);
        let s: String = (0..len)
            .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
            .collect();
        let reversed: String = s.chars().rev().collect();

        TestCase {
            test_type: test_type.to_string(),
            input: serde_json::json!({"s": s}),
            expected_output: serde_json::json!(reversed),
            input_serialized: vec![s],
        }
    }

    fn verify(&self, input: &serde_json::Value, user_output: &str) -> bool {
        let s = match input.get("s").and_then(|v| v.as_str()) {
            Some(s) => s,
            None => return false,
        };
        let expected: String = s.chars().rev().collect();
        user_output.trim_end_matches(['\n', '\r']) == expected
    }
}

#[cfg(test)]
mod tests {
    use super::super::Problem;
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn generator_is_deterministic_for_a_given_seed() {
        let mut rng_a = StdRng::seed_from_u64(7);
        let mut rng_b = StdRng::seed_from_u64(7);
        let problem = ReverseString;
        let case_a = problem.generate_input(BASIC, &mut rng_a);
        let case_b = problem.generate_input(BASIC, &mut rng_b);
        assert_eq!(case_a.input, case_b.input);
    }

    #[test]
    fn verifies_reversal() {
        let problem = ReverseString;
        let input = serde_json::json!({"s": "hello"});
        assert!(problem.verify(&input, "olleh"));
        assert!(problem.verify(&input, "olleh\n"));
        assert!(!problem.verify(&input, "hello"));
    }
}
