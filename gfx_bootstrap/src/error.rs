//! Error types for the graphics context bootstrapper
//!
//! This module defines the error type used throughout the crate and by backend
//! implementations. Every fallible driver call maps its failure into this type,
//! and the bootstrapper wraps it with the step that was running.

use std::fmt;

use crate::bootstrap::BootstrapStep;
use crate::device::Format;

/// Result type for bootstrap operations
pub type Result<T> = std::result::Result<T, Error>;

/// Bootstrap errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (Direct3D 12, mock, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (heap slot, back buffer index, etc.)
    InvalidResource(String),

    /// Initialization failed (factory, device, window)
    InitializationFailed(String),

    /// Configuration rejected before any driver call was made
    InvalidConfig(String),

    /// Object used in a state that does not allow the operation
    InvalidState(String),

    /// The device reports zero quality levels for this format/sample count
    UnsupportedMultisample {
        format: Format,
        sample_count: u32,
    },

    /// A driver entry point returned a failure code
    DriverError {
        /// Name of the failing entry point (e.g. "D3D12CreateDevice")
        call: String,
        /// Driver diagnostic code (HRESULT on Windows)
        code: i32,
        /// Driver diagnostic message
        message: String,
    },

    /// A bootstrap step failed; startup was aborted at this step
    StepFailed {
        step: BootstrapStep,
        cause: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with the bootstrap step it occurred in
    pub fn in_step(self, step: BootstrapStep) -> Self {
        Error::StepFailed {
            step,
            cause: Box::new(self),
        }
    }

    /// Step that aborted startup, if this error came out of the bootstrapper
    pub fn step(&self) -> Option<BootstrapStep> {
        match self {
            Error::StepFailed { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// Innermost error, with every `StepFailed` layer removed
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Error::StepFailed { cause, .. } = current {
            current = cause;
        }
        current
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::InvalidState(msg) => write!(f, "Invalid state: {}", msg),
            Error::UnsupportedMultisample { format, sample_count } => write!(
                f,
                "Unsupported multisampling: {}x is not supported for {:?}",
                sample_count, format
            ),
            Error::DriverError { call, code, message } => write!(
                f,
                "Driver error: {} failed with 0x{:08X}: {}",
                call, *code as u32, message
            ),
            Error::StepFailed { step, cause } => write!(f, "{} failed: {}", step, cause),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::StepFailed { cause, .. } => Some(cause.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
