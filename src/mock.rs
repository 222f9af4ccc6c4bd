//! Test doubles for the low-level layer, the device framework and storage.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use axerrno::{AxError, AxResult};

use crate::dcb::{Dcb, EventChannelId};
use crate::error::ErrorCode;
use crate::framework::{DevCtx, DeviceDef, DeviceFramework, DeviceOps, Registration};
use crate::lowlevel::{I2cLowLevel, LlCmd};
use crate::request::Address;
use crate::storage::DcbStorage;

/// Storage that never has memory left.
pub struct NoMemoryStorage;

impl DcbStorage for NoMemoryStorage {
    type Slot = Box<Dcb>;

    fn alloc(_dcb: Dcb) -> AxResult<Box<Dcb>> {
        Err(AxError::NoMemory)
    }
}

/// A low-level call as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlCall {
    Open(usize),
    Close(usize),
    Read { unit: usize, address: Address, size: usize },
    Write { unit: usize, address: Address, data: Vec<u8> },
    Exec { unit: usize, address: Address, size: usize, sadr: u16, send: Vec<u8> },
}

/// Records every call and answers with a scripted return value.
pub struct MockLowLevel {
    pub calls: RefCell<Vec<LlCall>>,
    pub ret: Cell<isize>,
    pub init_result: Cell<Result<(), ErrorCode>>,
    pub inits: RefCell<Vec<usize>>,
}

impl MockLowLevel {
    pub const FILL: u8 = 0xa5;

    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            ret: Cell::new(0),
            init_result: Cell::new(Ok(())),
            inits: RefCell::new(Vec::new()),
        }
    }

    pub fn returning(ret: isize) -> Self {
        let ll = Self::new();
        ll.ret.set(ret);
        ll
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl I2cLowLevel for MockLowLevel {
    fn init(&self, dcb: &Dcb) -> Result<(), ErrorCode> {
        self.inits.borrow_mut().push(dcb.unit());
        self.init_result.get()
    }

    fn control(&self, unit: usize, cmd: LlCmd<'_, '_>) -> isize {
        let call = match cmd {
            LlCmd::Open => LlCall::Open(unit),
            LlCmd::Close => LlCall::Close(unit),
            LlCmd::Read { address, buf } => {
                buf.fill(Self::FILL);
                LlCall::Read {
                    unit,
                    address,
                    size: buf.len(),
                }
            }
            LlCmd::Write { address, buf } => LlCall::Write {
                unit,
                address,
                data: buf.to_vec(),
            },
            LlCmd::Exec { address, size, cmd } => {
                cmd.receive.fill(Self::FILL);
                LlCall::Exec {
                    unit,
                    address,
                    size,
                    sadr: cmd.sadr,
                    send: cmd.send.to_vec(),
                }
            }
        };
        self.calls.borrow_mut().push(call);
        self.ret.get()
    }
}

/// Hands out sequential handles and event channels, and keeps the entry
/// points of every live device.
pub struct MockFramework {
    pub registered: RefCell<Vec<(u32, alloc::string::String, usize, i32)>>,
    pub unregistered: RefCell<Vec<u32>>,
    pub fail_with: Cell<Option<ErrorCode>>,
    devices: RefCell<Vec<(u32, DevCtx, Arc<dyn DeviceOps>)>>,
    next: Cell<u32>,
}

impl MockFramework {
    pub const EVENT_BASE: EventChannelId = 100;

    pub fn new() -> Self {
        Self {
            registered: RefCell::new(Vec::new()),
            unregistered: RefCell::new(Vec::new()),
            fail_with: Cell::new(None),
            devices: RefCell::new(Vec::new()),
            next: Cell::new(1),
        }
    }

    /// Context and entry points of a live device.
    pub fn device(&self, handle: u32) -> Option<(DevCtx, Arc<dyn DeviceOps>)> {
        self.devices
            .borrow()
            .iter()
            .find(|(h, ..)| *h == handle)
            .map(|(_, ctx, ops)| (*ctx, ops.clone()))
    }
}

impl DeviceFramework for MockFramework {
    type Handle = u32;

    fn register(&self, def: &DeviceDef) -> Result<Registration<u32>, ErrorCode> {
        if let Some(code) = self.fail_with.get() {
            return Err(code);
        }
        let handle = self.next.get();
        self.next.set(handle + 1);
        self.registered.borrow_mut().push((
            handle,
            alloc::string::String::from(def.name.as_str()),
            def.ctx.unit(),
            def.block_size,
        ));
        self.devices
            .borrow_mut()
            .push((handle, def.ctx, def.ops.clone()));
        Ok(Registration {
            handle,
            event_channel: Self::EVENT_BASE + handle as EventChannelId,
        })
    }

    fn unregister(&self, handle: u32) {
        self.devices.borrow_mut().retain(|(h, ..)| *h != handle);
        self.unregistered.borrow_mut().push(handle);
    }
}
