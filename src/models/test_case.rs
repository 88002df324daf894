//! Test case and test case type models

use serde::{Deserialize, Serialize};

/// A named category of inputs with a declared multiplicity the judge will
/// generate, defined statically by each problem plug-in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseType {
    pub name: String,
    pub multiplicity: u32,
}

impl TestCaseType {
    pub fn new(name: impl Into<String>, multiplicity: u32) -> Self {
        Self {
            name: name.into(),
            multiplicity,
        }
    }
}

/// A single generated test case. Carries both the structured input/output
/// (consumed by verifiers) and the rendered-for-stdin serialized form
/// (consumed by the runner) -- the two are never conflated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub test_type: String,
    pub input: serde_json::Value,
    pub expected_output: serde_json::Value,
    /// Ordered tuple of primitives rendered for the runner, one per stdin line.
    pub input_serialized: Vec<String>,
}

impl TestCase {
    /// Render the serialized input tuple as the stdin payload, one value per line.
    pub fn stdin_payload(&self) -> String {
        self.input_serialized.join("\n")
    }

    /// Render the serialized input tuple as a single display string, used
    /// for the report's `inputString` field.
    pub fn input_string(&self) -> String {
        format!("({})", self.input_serialized.join(", "))
    }
}
