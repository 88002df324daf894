//! Submission orchestrator
//!
//! Drives one submission through `Received -> Staged -> Generating ->
//! Executing(i) -> Verifying(i) -> ... -> Reporting -> Cleaned`, against
//! the single sandbox owned by the `EvaluationService`. Cleanup always
//! runs, whether the pipeline succeeded, failed, or was aborted partway.

use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::{
    config::LimitsConfig,
    error::AppError,
    models::{CaseResult, ProcessFlag, Report, Submission},
    problems::{Problem, ProblemRegistry},
    runner,
    sandbox::SandboxBackend,
};

/// Run one submission to completion against the shared sandbox.
pub async fn evaluate(
    backend: &dyn SandboxBackend,
    sandbox_name: &str,
    registry: &ProblemRegistry,
    limits: &LimitsConfig,
    submission: Submission,
) -> Result<Report, AppError> {
    // Received: the problem key must resolve before anything is staged.
    let problem = registry
        .get(&submission.problem)
        .map_err(|e| AppError::UnknownProblem(e.0))?;

    let mut cleanup_paths: Vec<String> = Vec::new();
    let result = run_pipeline(
        backend,
        sandbox_name,
        problem,
        limits,
        &submission,
        &mut cleanup_paths,
    )
    .await;

    // Cleaned: unconditional regardless of success, failure, or abort.
    for path in &cleanup_paths {
        if let Err(e) = backend.remove(sandbox_name, path).await {
            tracing::warn!(path = %path, error = %e, "failed to clean up staged path");
        }
    }

    result
}

async fn run_pipeline(
    backend: &dyn SandboxBackend,
    sandbox_name: &str,
    problem: &dyn Problem,
    limits: &LimitsConfig,
    submission: &Submission,
    cleanup_paths: &mut Vec<String>,
) -> Result<Report, AppError> {
    // Staged: source code, then every declared resource.
    let compile_timeout_secs = limits.wall_timeout_seconds * 5;
    let prepared = runner::prepare(
        backend,
        sandbox_name,
        submission.language,
        &submission.source,
        compile_timeout_secs,
    )
    .await?;
    cleanup_paths.push(prepared.sandbox_path().to_string());

    let submission_id = Uuid::new_v4();
    for resource in problem.resources() {
        let host_path =
            std::path::PathBuf::from("resources").join(submission.problem.replace('-', "_")).join(resource);
        let sandbox_path = format!("/workspace/{submission_id}-{resource}");
        backend
            .push(sandbox_name, &host_path, &sandbox_path)
            .await
            .map_err(|e| AppError::StagingIoError(e.to_string()))?;
        cleanup_paths.push(sandbox_path);
    }

    // Generating: traverse TEST_CASE_TYPES in declared order, expanding by
    // multiplicity, with a fresh seed so repeated submissions aren't
    // bitwise-identical while each generator call stays pure/reproducible.
    let mut rng = rand::rngs::StdRng::seed_from_u64(rand::rng().random());
    let mut cases = Vec::new();
    for test_case_type in problem.test_case_types() {
        for _ in 0..test_case_type.multiplicity {
            cases.push(problem.generate_input(&test_case_type.name, &mut rng));
        }
    }
    let num_test_cases = cases.len() as u32;

    // Executing / Verifying: strict generation order, with a submission-wide
    // ceiling that aborts remaining cases and reports a partial result.
    let wall_timeout = Duration::from_secs(limits.wall_timeout_seconds);
    let memory_limit_kb = limits.memory_limit_mb * 1024;
    let ceiling = wall_timeout
        .saturating_mul(num_test_cases.max(1))
        .saturating_add(Duration::from_secs(5));
    let deadline = Instant::now() + ceiling;

    let mut results: Vec<CaseResult> = Vec::with_capacity(cases.len());
    for case in &cases {
        if Instant::now() >= deadline {
            tracing::warn!(
                problem = %submission.problem,
                ran = results.len(),
                total = num_test_cases,
                "submission-level ceiling reached, aborting remaining cases"
            );
            break;
        }

        let mut draft = prepared
            .run_case(backend, case, wall_timeout, memory_limit_kb, limits.max_output_bytes)
            .await;

        let output_string = draft.process_info.stdout.clone();
        // A verifier exception counts as a case failure, not a propagated error.
        let verdict = std::panic::catch_unwind(AssertUnwindSafe(|| {
            problem.verify(&case.input, &output_string)
        }));
        let passed = match verdict {
            Ok(passed) => passed,
            Err(_) => {
                tracing::error!(
                    problem = %submission.problem,
                    test_case_type = %case.test_type,
                    "verifier panicked, treating case as failed"
                );
                // §4.4 tie-break: a sound process outcome shouldn't be
                // reported alongside a verifier crash without noting it.
                if draft.process_info.flag.is_none() {
                    draft.process_info.flag = Some(ProcessFlag::VerifierFault);
                }
                false
            }
        };
        let output_dict = case.expected_output.clone();

        results.push(draft.into_case_result(passed, output_string, output_dict));
    }

    // Reporting
    Ok(Report::from_results(num_test_cases, results))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Language, sandbox::MockSandboxBackend, sandbox::ExecOutcome};

    fn limits() -> LimitsConfig {
        LimitsConfig {
            wall_timeout_seconds: 2,
            memory_limit_mb: 256,
            max_output_bytes: 64 * 1024,
        }
    }

    #[tokio::test]
    async fn runs_every_generated_case_and_cleans_up() {
        let mut backend = MockSandboxBackend::new();
        backend.expect_push_bytes().returning(|_, _, _| Ok(()));
        backend.expect_exec().returning(|_, _, _| {
            Ok(ExecOutcome {
                stdout: "0".to_string(),
                stderr: String::new(),
                exit_status: Some(0),
                wall_ms: 1.0,
                cpu_ms: 1.0,
                mem_kb: 128,
                flag: None,
            })
        });
        backend.expect_remove().returning(|_, _| Ok(()));

        let registry = ProblemRegistry::new();
        let submission = Submission {
            language: Language::Julia,
            source: b"println(readline())".to_vec(),
            problem: "sum_two".to_string(),
        };

        let report = evaluate(&backend, "test-sandbox", &registry, &limits(), submission)
            .await
            .expect("evaluation should succeed");

        assert_eq!(report.num_test_cases, 7);
        assert_eq!(report.test_case_details.len(), 7);
    }

    struct PanickingVerifier;

    impl Problem for PanickingVerifier {
        fn test_case_types(&self) -> &[crate::models::TestCaseType] {
            use std::sync::OnceLock;
            static TYPES: OnceLock<Vec<crate::models::TestCaseType>> = OnceLock::new();
            TYPES.get_or_init(|| vec![crate::models::TestCaseType::new("basic", 1)])
        }

        fn generate_input(&self, test_type: &str, _rng: &mut rand::rngs::StdRng) -> crate::models::TestCase {
            crate::models::TestCase {
                test_type: test_type.to_string(),
                input: serde_json::json!({}),
                expected_output: serde_json::json!(null),
                input_serialized: vec![],
            }
        }

        fn verify(&self, _input: &serde_json::Value, _user_output: &str) -> bool {
            panic!("verifier exploded")
        }
    }

    #[tokio::test]
    async fn verifier_panic_fails_the_case_and_flags_the_process_info() {
        let mut backend = MockSandboxBackend::new();
        backend.expect_push_bytes().returning(|_, _, _| Ok(()));
        backend.expect_exec().returning(|_, _, _| {
            Ok(ExecOutcome {
                stdout: "anything".to_string(),
                stderr: String::new(),
                exit_status: Some(0),
                wall_ms: 1.0,
                cpu_ms: 1.0,
                mem_kb: 64,
                flag: None,
            })
        });
        backend.expect_remove().returning(|_, _| Ok(()));

        let submission = Submission {
            language: Language::Python3,
            source: b"print('anything')".to_vec(),
            problem: "panicking".to_string(),
        };
        let mut cleanup_paths = Vec::new();
        let report = run_pipeline(
            &backend,
            "test-sandbox",
            &PanickingVerifier,
            &limits(),
            &submission,
            &mut cleanup_paths,
        )
        .await
        .expect("a verifier panic should not abort the submission");

        assert_eq!(report.test_case_details.len(), 1);
        let case = &report.test_case_details[0];
        assert!(!case.passed);
        assert_eq!(case.process_info.flag, Some(ProcessFlag::VerifierFault));
    }

    #[tokio::test]
    async fn unknown_problem_is_rejected_before_anything_is_staged() {
        let mut backend = MockSandboxBackend::new();
        backend.expect_push_bytes().times(0);
        backend.expect_exec().times(0);

        let registry = ProblemRegistry::new();
        let submission = Submission {
            language: Language::Python3,
            source: b"print(1)".to_vec(),
            problem: "does-not-exist".to_string(),
        };

        let err = evaluate(&backend, "test-sandbox", &registry, &limits(), submission)
            .await
            .expect_err("unknown problem should be rejected");

        assert!(matches!(err, AppError::UnknownProblem(_)));
    }
}
