//! Read/write requests delivered by the device framework.
//!
//! A request addresses either the attribute space (negative address, see
//! [`Attr`]) or the data space (non-negative address, an offset forwarded to
//! the bus). `actual_size` is filled in by the driver and is only meaningful
//! when the request succeeded.

use crate::dcb::EventChannelId;
use crate::error::{I2cError, I2cResult};
use crate::lowlevel::Completion;

/// Signed request address.
pub type Address = i32;

/// Driver attributes reachable through negative addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    /// Event-notification channel, readable and writable.
    EventChannel,
    /// Combined send and receive transaction, write only.
    Execute,
}

impl Attr {
    /// Address of the event-notification channel attribute.
    pub const EVENT_CHANNEL: Address = -1;
    /// Address of the combined transaction attribute.
    pub const EXECUTE: Address = -100;

    /// Decodes an attribute-space address.
    pub fn from_address(address: Address) -> Option<Self> {
        match address {
            Self::EVENT_CHANNEL => Some(Self::EventChannel),
            Self::EXECUTE => Some(Self::Execute),
            _ => None,
        }
    }

    /// The address this attribute is reached at.
    pub const fn address(self) -> Address {
        match self {
            Self::EventChannel => Self::EVENT_CHANNEL,
            Self::Execute => Self::EXECUTE,
        }
    }
}

/// Size in bytes of an event channel id in a caller buffer.
pub const EVENT_CHANNEL_SIZE: usize = core::mem::size_of::<EventChannelId>();

/// Payload of a combined transaction: send `send`, then receive into `receive`.
#[derive(Debug)]
pub struct ExecCmd<'a> {
    /// Target slave address.
    pub sadr: u16,
    /// Bytes sent first.
    pub send: &'a [u8],
    /// Buffer filled by the response.
    pub receive: &'a mut [u8],
}

impl<'a> ExecCmd<'a> {
    /// Creates a combined transaction command.
    pub fn new(sadr: u16, send: &'a [u8], receive: &'a mut [u8]) -> Self {
        Self {
            sadr,
            send,
            receive,
        }
    }

    /// Number of bytes to send.
    #[inline]
    pub fn send_size(&self) -> usize {
        self.send.len()
    }

    /// Number of bytes to receive.
    #[inline]
    pub fn receive_size(&self) -> usize {
        self.receive.len()
    }
}

/// Payload of a write request.
#[derive(Debug)]
pub enum WriteBuf<'a> {
    /// Raw bytes: device data, or an attribute value.
    Bytes(&'a [u8]),
    /// A combined transaction, only valid for [`Attr::Execute`].
    Exec(ExecCmd<'a>),
}

/// A single read or write request.
#[derive(Debug)]
pub struct DevReq<B> {
    /// Attribute code (negative) or data offset (non-negative).
    pub address: Address,
    /// Requested size in units of the device block size.
    pub requested_size: usize,
    /// Caller-owned payload.
    pub buffer: B,
    /// Size actually transferred; set by the driver.
    pub actual_size: Option<usize>,
}

/// Read request: the driver fills `buffer`.
pub type ReadReq<'a> = DevReq<&'a mut [u8]>;

/// Write request: the driver consumes `buffer`.
pub type WriteReq<'a> = DevReq<WriteBuf<'a>>;

impl<B> DevReq<B> {
    /// Creates a request that has not been served yet.
    pub fn new(address: Address, requested_size: usize, buffer: B) -> Self {
        Self {
            address,
            requested_size,
            buffer,
            actual_size: None,
        }
    }

    /// Whether the request targets the attribute space.
    #[inline]
    pub fn is_attribute(&self) -> bool {
        self.address < 0
    }

    /// Records the outcome of a low-level transfer.
    ///
    /// A zero-byte completion succeeds but leaves `actual_size` untouched.
    pub(crate) fn complete(&mut self, completion: Completion) -> I2cResult {
        match completion {
            Completion::Transferred(size) => {
                self.actual_size = Some(size.get());
                Ok(())
            }
            Completion::Nothing => Ok(()),
            Completion::Failed(code) => Err(I2cError::Propagated(code)),
        }
    }
}

impl<'a> ReadReq<'a> {
    /// Creates a data read of `buffer.len()` bytes at `address`.
    pub fn data(address: Address, buffer: &'a mut [u8]) -> Self {
        Self::new(address, buffer.len(), buffer)
    }
}

impl<'a> WriteReq<'a> {
    /// Creates a data write of `bytes` at `address`.
    pub fn data(address: Address, bytes: &'a [u8]) -> Self {
        Self::new(address, bytes.len(), WriteBuf::Bytes(bytes))
    }

    /// Creates an [`Attr::Execute`] request for `cmd`.
    pub fn execute(cmd: ExecCmd<'a>) -> Self {
        Self::new(Attr::EXECUTE, 1, WriteBuf::Exec(cmd))
    }
}
