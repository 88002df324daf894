//! Input validation utilities

use crate::constants;

/// Validate submitted source code size
pub fn validate_source_code(code: &[u8]) -> Result<(), &'static str> {
    if code.is_empty() {
        return Err("Source code cannot be empty");
    }
    if code.len() > constants::MAX_SOURCE_CODE_SIZE {
        return Err("Source code exceeds maximum size");
    }
    Ok(())
}
