//! judgecore - evaluation core of an online programming judge
//!
//! Given a submission (source code, language, problem key), generates a
//! problem-specific battery of test cases, executes the submitted code once
//! per case inside an isolated sandbox, verifies each result against a
//! reference solution, and returns a per-case report.
//!
//! # Architecture
//!
//! - **Sandbox** (`sandbox`): a capability interface wrapping a container
//!   backend (`BollardSandbox`), the only component allowed to touch it.
//! - **Problems** (`problems`): a compile-time registry of problem plug-ins,
//!   each contributing test-case generators and a verifier.
//! - **Runner** (`runner`): per-language prepare/compile/run handling inside
//!   a sandbox.
//! - **Orchestrator** (`orchestrator`): the per-submission state machine
//!   tying the above together.
//! - **Evaluation** (`evaluation`): the process-wide façade owning the one
//!   sandbox bound to the judge process.
//! - **Handlers**/**state**/**main**: the HTTP shell exposing `/submit`.

pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod orchestrator;
pub mod problems;
pub mod runner;
pub mod sandbox;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
