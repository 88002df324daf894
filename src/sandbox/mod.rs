//! Sandbox backend abstraction
//!
//! `backend` defines the capability interface; `bollard_backend` is the
//! concrete Docker-compatible implementation the runner uses by default.

pub mod backend;
pub mod bollard_backend;

pub use backend::{
    validate_sandbox_path, ExecOutcome, ResourceLimits, SandboxBackend, SandboxError,
    SandboxProfile,
};
pub use bollard_backend::BollardSandbox;

#[cfg(test)]
pub use backend::MockSandboxBackend;
