//! Device control block: the per-unit state of the driver.

use core::sync::atomic::{AtomicI32, AtomicU8, AtomicU32, Ordering};

/// Identifier of the event-notification channel (a message buffer ID).
pub type EventChannelId = i32;

/// Open mode passed by the device framework on open.
pub type OpenMode = u32;

/// Logical state of a registered unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DcbState {
    /// Registered with the device framework, not open.
    Registered = 0,
    /// Opened through the device framework.
    Opened = 1,
}

impl DcbState {
    fn from_raw(raw: u8) -> Self {
        match raw {
            1 => Self::Opened,
            _ => Self::Registered,
        }
    }
}

/// Per-unit driver state.
///
/// `unit` never changes once the block is allocated; the other fields are
/// atomics so that request handlers only need a shared reference.
#[derive(Debug)]
pub struct Dcb {
    unit: usize,
    open_mode: AtomicU32,
    event_channel: AtomicI32,
    state: AtomicU8,
}

impl Dcb {
    /// Creates an empty control block bound to `unit`.
    pub const fn new(unit: usize) -> Self {
        Self {
            unit,
            open_mode: AtomicU32::new(0),
            event_channel: AtomicI32::new(0),
            state: AtomicU8::new(DcbState::Registered as u8),
        }
    }

    /// Unit index of this block.
    #[inline]
    pub fn unit(&self) -> usize {
        self.unit
    }

    /// Mode of the most recent open request.
    #[inline]
    pub fn open_mode(&self) -> OpenMode {
        self.open_mode.load(Ordering::Acquire)
    }

    pub(crate) fn set_open_mode(&self, mode: OpenMode) {
        self.open_mode.store(mode, Ordering::Release);
    }

    /// Current event-notification channel.
    #[inline]
    pub fn event_channel(&self) -> EventChannelId {
        self.event_channel.load(Ordering::Acquire)
    }

    /// Replaces the event-notification channel.
    #[inline]
    pub fn set_event_channel(&self, id: EventChannelId) {
        self.event_channel.store(id, Ordering::Release);
    }

    /// Current logical state.
    #[inline]
    pub fn state(&self) -> DcbState {
        DcbState::from_raw(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: DcbState) {
        self.state.store(state as u8, Ordering::Release);
    }
}
