//! Driver error type.
//!
//! Failures detected by the driver itself are [`AxError`]s; failures reported
//! by the low-level control layer or the device framework are carried as raw
//! codes and handed back to the caller unchanged.

use axerrno::AxError;

/// Signed error code as used by the low-level control layer.
pub type ErrorCode = i32;

/// Parameter error.
pub const E_PAR: ErrorCode = -17;
/// Insufficient memory.
pub const E_NOMEM: ErrorCode = -33;
/// Unsupported function.
pub const E_NOSPT: ErrorCode = -9;
/// System error.
pub const E_SYS: ErrorCode = -5;

/// Error returned by every driver entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cError {
    /// Rejected by the driver before any hardware access.
    Driver(AxError),
    /// Propagated verbatim from the low-level layer or the device framework.
    Propagated(ErrorCode),
}

/// Result type of the driver.
pub type I2cResult<T = ()> = Result<T, I2cError>;

impl I2cError {
    /// Flattens the error into the signed code space of the device framework.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Driver(AxError::InvalidInput) => E_PAR,
            Self::Driver(AxError::NoMemory) => E_NOMEM,
            Self::Driver(AxError::Unsupported) => E_NOSPT,
            Self::Driver(_) => E_SYS,
            Self::Propagated(code) => *code,
        }
    }

    /// Returns the driver-level error kind, if this error was raised here.
    pub fn as_ax_error(&self) -> Option<AxError> {
        match self {
            Self::Driver(err) => Some(*err),
            Self::Propagated(_) => None,
        }
    }
}

impl From<AxError> for I2cError {
    fn from(err: AxError) -> Self {
        Self::Driver(err)
    }
}

impl core::fmt::Display for I2cError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Driver(err) => write!(f, "{:?}", err),
            Self::Propagated(code) => write!(f, "propagated error {}", code),
        }
    }
}
