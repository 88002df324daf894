//! Sandbox capability interface
//!
//! The manager is the only component allowed to touch the container
//! backend. Any backend providing equivalent process isolation can
//! implement `SandboxBackend` -- the rest of the crate never depends on
//! bollard or any other concrete technology directly.

use std::time::Duration;

use async_trait::async_trait;

use crate::models::ProcessFlag;

/// Resource limits accepted by `exec`.
#[derive(Debug, Clone)]
pub struct ResourceLimits {
    pub wall_timeout: Duration,
    pub cpu_limit: Duration,
    pub memory_limit_kb: u64,
    pub max_output_bytes: usize,
    pub stdin: Option<String>,
}

impl ResourceLimits {
    pub fn new(wall_timeout: Duration, memory_limit_kb: u64, max_output_bytes: usize) -> Self {
        Self {
            wall_timeout,
            cpu_limit: wall_timeout,
            memory_limit_kb,
            max_output_bytes,
            stdin: None,
        }
    }

    pub fn with_stdin(mut self, stdin: impl Into<String>) -> Self {
        self.stdin = Some(stdin.into());
        self
    }
}

/// A backend-agnostic resource profile used when launching a sandbox
/// (image name plus CPU/memory/network posture). Backend-specific; the
/// profile *name* is configuration, the interpretation is up to the
/// backend implementation.
#[derive(Debug, Clone)]
pub struct SandboxProfile {
    pub image: String,
    pub memory_limit_mb: u64,
    pub cpu_quota: f64,
}

/// Observable outcome of one `exec` call.
#[derive(Debug, Clone)]
pub struct ExecOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: Option<i32>,
    pub wall_ms: f64,
    pub cpu_ms: f64,
    pub mem_kb: i64,
    pub flag: Option<ProcessFlag>,
}

/// Failures surfaced by the sandbox backend. None of these are recovered
/// here -- they propagate into `ProcessInfo`/`CaseResult` for per-case
/// failures, or abort the submission for launch-time failures.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    #[error("container backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("sandbox image missing: {0}")]
    ImageMissing(String),

    #[error("sandbox path escapes the workspace: {0}")]
    PathTraversal(String),

    #[error("sandbox I/O error: {0}")]
    Io(String),
}

/// Capability interface wrapping a container backend: launch/exec/stop/
/// delete plus file push/pull, exactly as specified. Implementors own all
/// interaction with the concrete container technology.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SandboxBackend: Send + Sync {
    /// Launch a sandbox instance under the given stable name and profile.
    async fn launch(&self, name: &str, profile: &SandboxProfile) -> Result<(), SandboxError>;

    /// Execute `argv` inside the sandbox under the given resource limits.
    /// Never returns an `Err` for a timeout/OOM/signal/non-zero-exit/
    /// truncation -- those are reported via `ExecOutcome::flag`.
    async fn exec(
        &self,
        name: &str,
        argv: &[&str],
        limits: &ResourceLimits,
    ) -> Result<ExecOutcome, SandboxError>;

    /// Push a host-side file into the sandbox at `sandbox_path`.
    async fn push(
        &self,
        name: &str,
        host_path: &std::path::Path,
        sandbox_path: &str,
    ) -> Result<(), SandboxError>;

    /// Push raw bytes into the sandbox at `sandbox_path` without requiring
    /// a host-side file to exist first.
    async fn push_bytes(
        &self,
        name: &str,
        sandbox_path: &str,
        content: &[u8],
    ) -> Result<(), SandboxError>;

    /// Remove a single staged path from the sandbox.
    async fn remove(&self, name: &str, sandbox_path: &str) -> Result<(), SandboxError>;

    /// Stop the sandbox instance (reversible; `launch` may restart it).
    async fn stop(&self, name: &str) -> Result<(), SandboxError>;

    /// Permanently delete the sandbox instance.
    async fn delete(&self, name: &str) -> Result<(), SandboxError>;
}

/// Reject any sandbox-bound path that tries to escape the workspace via
/// `..` components or an absolute path outside of it.
pub fn validate_sandbox_path(path: &str) -> Result<(), SandboxError> {
    if path.split('/').any(|component| component == "..") {
        return Err(SandboxError::PathTraversal(path.to_string()));
    }
    if path.starts_with('/') && !path.starts_with("/workspace") {
        return Err(SandboxError::PathTraversal(path.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_parent_traversal() {
        assert!(validate_sandbox_path("../../etc/passwd").is_err());
        assert!(validate_sandbox_path("data/../../etc/passwd").is_err());
    }

    #[test]
    fn rejects_absolute_escape() {
        assert!(validate_sandbox_path("/etc/passwd").is_err());
    }

    #[test]
    fn accepts_workspace_relative_paths() {
        assert!(validate_sandbox_path("dataset.txt").is_ok());
        assert!(validate_sandbox_path("/workspace/solution.py").is_ok());
    }
}
