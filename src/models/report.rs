//! Report, CaseResult and ProcessInfo models -- the output side of the
//! evaluation pipeline.

use serde::{Deserialize, Serialize};

/// Why a sandboxed execution didn't run to a clean, on-time, in-budget exit.
/// Surfaced in `ProcessInfo`, never recovered by the sandbox itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum ProcessFlag {
    Timeout,
    OutOfMemory,
    SignalKilled,
    NonZeroExit,
    OutputTruncated,
    CompileFailed,
    VerifierFault,
}

impl ProcessFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Timeout => "Timeout",
            Self::OutOfMemory => "OutOfMemory",
            Self::SignalKilled => "SignalKilled",
            Self::NonZeroExit => "NonZeroExit",
            Self::OutputTruncated => "OutputTruncated",
            Self::CompileFailed => "CompileFailed",
            Self::VerifierFault => "VerifierFault",
        }
    }
}

impl std::fmt::Display for ProcessFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The observable outcome of one sandboxed execution. `stdout` is not part
/// of the wire response -- the verified user output travels separately as
/// `CaseResult::output_string`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessInfo {
    pub exit_status: Option<i32>,
    pub wall_ms: f64,
    pub cpu_ms: f64,
    pub mem_kb: i64,
    #[serde(skip_serializing)]
    pub stdout: String,
    pub stderr: String,
    pub flag: Option<ProcessFlag>,
}

#[cfg(test)]
impl ProcessInfo {
    /// Test fixture for a case that never ran. The orchestrator itself never
    /// constructs this: a submission-level ceiling abort drops the remaining
    /// cases from the report rather than emitting placeholder results for
    /// them (see `orchestrator::run_pipeline`).
    pub fn not_run() -> Self {
        Self {
            exit_status: None,
            wall_ms: 0.0,
            cpu_ms: 0.0,
            mem_kb: 0,
            stdout: String::new(),
            stderr: String::new(),
            flag: Some(ProcessFlag::Timeout),
        }
    }
}

/// Result of one TestCase: the verifier's verdict on (input, user output)
/// plus the observable process outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseResult {
    pub test_case_type: String,
    pub input_string: String,
    /// The user's captured stdout -- the ground truth of what they produced.
    pub output_string: String,
    pub input_dict: serde_json::Value,
    /// Kept for diagnostic parity with the reference solution's output; this
    /// is NOT the user's answer (that's `output_string`). Do not confuse them.
    pub output_dict: serde_json::Value,
    pub passed: bool,
    pub process_info: ProcessInfo,
}

/// The aggregated per-submission result returned to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub success: bool,
    pub num_test_cases: u32,
    pub num_test_cases_passed: u32,
    pub test_case_details: Vec<CaseResult>,
}

impl Report {
    pub fn from_results(num_test_cases: u32, results: Vec<CaseResult>) -> Self {
        let num_test_cases_passed = results.iter().filter(|r| r.passed).count() as u32;
        let success = results.len() as u32 == num_test_cases && results.iter().all(|r| r.passed);
        Self {
            success,
            num_test_cases,
            num_test_cases_passed,
            test_case_details: results,
        }
    }
}
