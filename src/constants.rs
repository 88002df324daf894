//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// SANDBOX DEFAULTS
// =============================================================================

/// Default wall-clock timeout in seconds for a single case execution
pub const DEFAULT_WALL_TIMEOUT_SECONDS: u64 = 2;

/// Default memory limit in megabytes for a sandboxed execution
pub const DEFAULT_MEMORY_LIMIT_MB: u64 = 256;

/// Grace multiplier applied to the wall-clock timeout before the sandbox is
/// forced to return control (design ceiling from the spec: 2x).
pub const TIMEOUT_GRACE_MULTIPLIER: f64 = 2.0;

/// Default cap on captured stdout/stderr bytes before truncation
pub const DEFAULT_MAX_OUTPUT_BYTES: usize = 64 * 1024;

/// Sandbox process-group pid limit
pub const SANDBOX_PIDS_LIMIT: i64 = 64;

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers as they appear on the wire
pub mod languages {
    pub const PYTHON3: &str = "python3";
    pub const JAVASCRIPT: &str = "javascript";
    pub const JULIA: &str = "julia";
    pub const C: &str = "c";

    /// All supported language identifiers
    pub const ALL: &[&str] = &[PYTHON3, JAVASCRIPT, JULIA, C];
}

/// Container image backing the single process-bound sandbox. One image
/// bundles every supported language's interpreter/compiler so the sandbox
/// never needs to be relaunched on a per-language basis.
pub mod container_images {
    pub const DEFAULT_SANDBOX_IMAGE: &str = "judgecore/sandbox:latest";
}

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum source code size in bytes (1 MB)
pub const MAX_SOURCE_CODE_SIZE: usize = 1024 * 1024;
