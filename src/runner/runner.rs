//! Language runner -- prepares a submission's source inside the sandbox and
//! executes it against one test case at a time.

use crate::{
    constants,
    error::AppError,
    models::{CaseResult, Language, ProcessFlag, ProcessInfo, TestCase},
    sandbox::{ResourceLimits, SandboxBackend},
};

use super::languages::LanguageHandler;

/// A submission staged and (for compiled languages) compiled inside the
/// process-bound sandbox, ready to be run against any number of test cases.
pub struct PreparedSubmission {
    handler: LanguageHandler,
    sandbox_name: String,
    sandbox_path: String,
    /// Set once compilation fails; every subsequent `run_case` short-circuits
    /// with the same failure instead of recompiling (fail-fast caching).
    compile_failure: Option<ProcessInfo>,
}

/// Stages source code into the already-running sandbox and, for compiled
/// languages, compiles it once up front. Does not launch the sandbox --
/// that happens once at process startup and is shared across submissions.
pub async fn prepare(
    backend: &dyn SandboxBackend,
    sandbox_name: &str,
    language: Language,
    source: &[u8],
    compile_timeout_secs: u64,
) -> Result<PreparedSubmission, AppError> {
    let handler = LanguageHandler::for_language(language)?;

    let sandbox_path = format!("/workspace/{}", handler.source_file);
    backend
        .push_bytes(sandbox_name, &sandbox_path, source)
        .await
        .map_err(|e| AppError::StagingIoError(e.to_string()))?;

    let compile_failure = if let Some(compile_argv) = handler.compile_argv() {
        let limits = ResourceLimits::new(
            std::time::Duration::from_secs(compile_timeout_secs),
            constants::DEFAULT_MEMORY_LIMIT_MB * 1024,
            constants::DEFAULT_MAX_OUTPUT_BYTES,
        );
        let outcome = backend
            .exec(sandbox_name, &compile_argv, &limits)
            .await
            .map_err(|e| AppError::RunnerInternal(e.to_string()))?;

        if outcome.exit_status != Some(0) {
            Some(ProcessInfo {
                exit_status: outcome.exit_status,
                wall_ms: outcome.wall_ms,
                cpu_ms: outcome.cpu_ms,
                mem_kb: outcome.mem_kb,
                stdout: outcome.stdout,
                stderr: outcome.stderr,
                flag: Some(ProcessFlag::CompileFailed),
            })
        } else {
            None
        }
    } else {
        None
    };

    Ok(PreparedSubmission {
        handler,
        sandbox_name: sandbox_name.to_string(),
        sandbox_path,
        compile_failure,
    })
}

impl PreparedSubmission {
    /// The in-sandbox path the source was staged at, for cleanup bookkeeping.
    pub fn sandbox_path(&self) -> &str {
        &self.sandbox_path
    }

    /// Run the prepared submission against one test case, returning a
    /// `CaseResultDraft` missing only the verifier's verdict.
    pub async fn run_case(
        &self,
        backend: &dyn SandboxBackend,
        case: &TestCase,
        wall_timeout: std::time::Duration,
        memory_limit_kb: u64,
        max_output_bytes: usize,
    ) -> CaseResultDraft {
        if let Some(failure) = &self.compile_failure {
            return CaseResultDraft {
                test_case_type: case.test_type.clone(),
                input_string: case.input_string(),
                input_dict: case.input.clone(),
                process_info: failure.clone(),
            };
        }

        let limits = ResourceLimits::new(wall_timeout, memory_limit_kb, max_output_bytes)
            .with_stdin(case.stdin_payload());

        let outcome = match backend
            .exec(&self.sandbox_name, &self.handler.run_argv(), &limits)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                return CaseResultDraft {
                    test_case_type: case.test_type.clone(),
                    input_string: case.input_string(),
                    input_dict: case.input.clone(),
                    process_info: ProcessInfo {
                        exit_status: None,
                        wall_ms: 0.0,
                        cpu_ms: 0.0,
                        mem_kb: 0,
                        stdout: String::new(),
                        stderr: e.to_string(),
                        flag: Some(ProcessFlag::NonZeroExit),
                    },
                };
            }
        };

        CaseResultDraft {
            test_case_type: case.test_type.clone(),
            input_string: case.input_string(),
            input_dict: case.input.clone(),
            process_info: ProcessInfo {
                exit_status: outcome.exit_status,
                wall_ms: outcome.wall_ms,
                cpu_ms: outcome.cpu_ms,
                mem_kb: outcome.mem_kb,
                stdout: outcome.stdout,
                stderr: outcome.stderr,
                flag: outcome.flag,
            },
        }
    }
}

/// A `CaseResult` missing only `passed`/`output_string`/`output_dict`,
/// filled in by the orchestrator once it has called the problem's verifier.
pub struct CaseResultDraft {
    pub test_case_type: String,
    pub input_string: String,
    pub input_dict: serde_json::Value,
    pub process_info: ProcessInfo,
}

impl CaseResultDraft {
    pub fn into_case_result(
        self,
        passed: bool,
        output_string: String,
        output_dict: serde_json::Value,
    ) -> CaseResult {
        CaseResult {
            test_case_type: self.test_case_type,
            input_string: self.input_string,
            output_string,
            input_dict: self.input_dict,
            output_dict,
            passed,
            process_info: self.process_info,
        }
    }
}
