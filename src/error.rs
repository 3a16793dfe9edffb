//! Sandbox error types
//!
//! Only construction and configuration can fail. Steady-state ticking never
//! returns an error: degenerate geometry is skipped locally and stale drag
//! calls are no-ops.

use std::fmt;

/// Convenience alias for results in this crate
pub type Result<T> = std::result::Result<T, SandboxError>;

/// Top-level error enum for the sandbox
#[derive(Debug)]
pub enum SandboxError {
    /// A physical parameter is outside its valid range.
    InvalidParameter {
        /// Name of the parameter (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the valid range.
        expected: &'static str,
    },

    /// Settings file could not be read.
    Io(std::io::Error),

    /// Settings file is not valid JSON for [`crate::SandboxSettings`].
    Settings(serde_json::Error),
}

impl fmt::Display for SandboxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SandboxError::InvalidParameter {
                name,
                value,
                expected,
            } => write!(f, "invalid {}: got {}, expected {}", name, value, expected),
            SandboxError::Io(err) => write!(f, "failed to read settings: {}", err),
            SandboxError::Settings(err) => write!(f, "malformed settings: {}", err),
        }
    }
}

impl std::error::Error for SandboxError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SandboxError::Io(err) => Some(err),
            SandboxError::Settings(err) => Some(err),
            SandboxError::InvalidParameter { .. } => None,
        }
    }
}

impl From<std::io::Error> for SandboxError {
    fn from(err: std::io::Error) -> Self {
        SandboxError::Io(err)
    }
}

impl From<serde_json::Error> for SandboxError {
    fn from(err: serde_json::Error) -> Self {
        SandboxError::Settings(err)
    }
}
