//! Boundary to the unit-specific low-level control layer.
//!
//! The low-level layer drives the bus itself. Its control entry returns a
//! single signed value: a positive transferred size, or a non-positive error
//! code. That value is turned into a [`Completion`] right here, so the request
//! handlers never look at raw signs.

use core::num::NonZeroUsize;

use crate::dcb::Dcb;
use crate::error::{E_SYS, ErrorCode};
use crate::request::{Address, ExecCmd};

/// Operation requested from the low-level layer.
#[derive(Debug)]
pub enum LlCmd<'a, 'b> {
    /// Prepare the unit for transfers.
    Open,
    /// Release the unit.
    Close,
    /// Read `buf.len()` bytes at `address`.
    Read { address: Address, buf: &'a mut [u8] },
    /// Write `buf` at `address`.
    Write { address: Address, buf: &'a [u8] },
    /// Run a combined send and receive transaction.
    Exec {
        address: Address,
        size: usize,
        cmd: &'a mut ExecCmd<'b>,
    },
}

/// Unit-specific low-level I2C control routines.
pub trait I2cLowLevel {
    /// One-time hardware initialization of the unit owning `dcb`.
    fn init(&self, dcb: &Dcb) -> Result<(), ErrorCode>;

    /// Executes `cmd` on `unit`.
    ///
    /// Returns the number of bytes transferred (positive), or an error code
    /// (zero or negative).
    fn control(&self, unit: usize, cmd: LlCmd<'_, '_>) -> isize;
}

/// Outcome of a low-level control call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The call transferred this many bytes.
    Transferred(NonZeroUsize),
    /// The call returned exactly zero: success with no size reported.
    Nothing,
    /// The call failed with this code.
    Failed(ErrorCode),
}

impl Completion {
    /// Decodes the raw return value of [`I2cLowLevel::control`].
    pub fn from_raw(rtn: isize) -> Self {
        match usize::try_from(rtn).ok().and_then(NonZeroUsize::new) {
            Some(size) => Self::Transferred(size),
            None if rtn == 0 => Self::Nothing,
            None => Self::Failed(ErrorCode::try_from(rtn).unwrap_or(E_SYS)),
        }
    }
}

/// Calls the low-level layer and decodes its result.
pub(crate) fn llctl<L: I2cLowLevel + ?Sized>(ll: &L, unit: usize, cmd: LlCmd<'_, '_>) -> Completion {
    let rtn = ll.control(unit, cmd);
    trace!("i2c{}: low-level returned {}", unit, rtn);
    Completion::from_raw(rtn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_from_raw() {
        assert_eq!(
            Completion::from_raw(5),
            Completion::Transferred(NonZeroUsize::new(5).unwrap())
        );
        assert_eq!(Completion::from_raw(0), Completion::Nothing);
        assert_eq!(Completion::from_raw(-3), Completion::Failed(-3));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_completion_out_of_range_error() {
        assert_eq!(
            Completion::from_raw(isize::MIN),
            Completion::Failed(E_SYS)
        );
    }
}
