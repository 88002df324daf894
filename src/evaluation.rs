//! Evaluation service: the process-wide façade owning the one sandbox bound
//! to the judge process.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Config,
    error::AppError,
    models::{Report, Submission},
    orchestrator,
    problems::ProblemRegistry,
    sandbox::{SandboxBackend, SandboxProfile},
};

const SANDBOX_NAME: &str = "judgecore-sandbox";

/// Owns one `Sandbox` for the lifetime of the process and serializes every
/// submission through it via a mutex -- the judge process is single-writer
/// with respect to the sandbox.
pub struct EvaluationService {
    backend: Arc<dyn SandboxBackend>,
    registry: ProblemRegistry,
    limits: crate::config::LimitsConfig,
    lock: Mutex<()>,
}

impl EvaluationService {
    /// Launch the sandbox and block until it is ready. The HTTP surface
    /// should not accept traffic until this returns `Ok`.
    pub async fn new(backend: Arc<dyn SandboxBackend>, config: &Config) -> Result<Self, AppError> {
        let profile = SandboxProfile {
            image: config.sandbox.image.clone(),
            memory_limit_mb: config.limits.memory_limit_mb,
            cpu_quota: config.sandbox.cpu_quota,
        };
        backend
            .launch(SANDBOX_NAME, &profile)
            .await
            .map_err(|e| AppError::SandboxLaunchFailed(e.to_string()))?;

        Ok(Self {
            backend,
            registry: ProblemRegistry::new(),
            limits: config.limits.clone(),
            lock: Mutex::new(()),
        })
    }

    /// Evaluate one submission. Waits for the sandbox mutex, then runs the
    /// full orchestrator pipeline against the shared sandbox.
    pub async fn evaluate(&self, submission: Submission) -> Result<Report, AppError> {
        let _guard = self.lock.lock().await;
        orchestrator::evaluate(
            self.backend.as_ref(),
            SANDBOX_NAME,
            &self.registry,
            &self.limits,
            submission,
        )
        .await
    }

    /// Stop and delete the sandbox. Idempotent; errors are logged and
    /// swallowed rather than propagated, and do not depend on the logging
    /// subsystem being live.
    pub async fn shutdown(&self) {
        if let Err(e) = self.backend.stop(SANDBOX_NAME).await {
            tracing::warn!(error = %e, "failed to stop sandbox during shutdown");
        }
        if let Err(e) = self.backend.delete(SANDBOX_NAME).await {
            tracing::warn!(error = %e, "failed to delete sandbox during shutdown");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, models::Language, sandbox::ExecOutcome, sandbox::MockSandboxBackend};

    #[tokio::test]
    async fn new_blocks_until_launch_succeeds_then_evaluate_runs_the_pipeline() {
        let mut backend = MockSandboxBackend::new();
        backend.expect_launch().returning(|_, _| Ok(()));
        backend.expect_push_bytes().returning(|_, _, _| Ok(()));
        backend.expect_exec().returning(|_, _, _| {
            Ok(ExecOutcome {
                stdout: "hello".to_string(),
                stderr: String::new(),
                exit_status: Some(0),
                wall_ms: 1.0,
                cpu_ms: 1.0,
                mem_kb: 64,
                flag: None,
            })
        });
        backend.expect_remove().returning(|_, _| Ok(()));
        backend.expect_stop().returning(|_| Ok(()));
        backend.expect_delete().returning(|_| Ok(()));

        let config = Config {
            server: crate::config::ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
            sandbox: crate::config::SandboxConfig {
                docker_socket: "/var/run/docker.sock".to_string(),
                image: "judgecore/sandbox:latest".to_string(),
                cpu_quota: 1.0,
            },
            limits: crate::config::LimitsConfig {
                wall_timeout_seconds: 2,
                memory_limit_mb: 256,
                max_output_bytes: 65536,
            },
        };

        let service = EvaluationService::new(Arc::new(backend), &config)
            .await
            .expect("sandbox launch should succeed");

        let submission = Submission {
            language: Language::Julia,
            source: b"println(readline())".to_vec(),
            problem: "reverse_string".to_string(),
        };
        let report = service.evaluate(submission).await.expect("evaluate should succeed");
        assert_eq!(report.num_test_cases, 5);

        service.shutdown().await;
    }

    #[tokio::test]
    async fn new_propagates_launch_failure() {
        let mut backend = MockSandboxBackend::new();
        backend
            .expect_launch()
            .returning(|_, _| Err(crate::sandbox::SandboxError::BackendUnavailable("down".to_string())));

        let config = Config {
            server: crate::config::ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                rust_log: "info".to_string(),
            },
            sandbox: crate::config::SandboxConfig {
                docker_socket: "/var/run/docker.sock".to_string(),
                image: "judgecore/sandbox:latest".to_string(),
                cpu_quota: 1.0,
            },
            limits: crate::config::LimitsConfig {
                wall_timeout_seconds: 2,
                memory_limit_mb: 256,
                max_output_bytes: 65536,
            },
        };

        let err = EvaluationService::new(Arc::new(backend), &config)
            .await
            .expect_err("launch failure should propagate");
        assert!(matches!(err, AppError::SandboxLaunchFailed(_)));
    }
}
