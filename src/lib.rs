#![no_std]

//! # I2C Character-Device Driver
//!
//! This crate turns generic read/write device requests into I2C operations
//! and forwards them to a unit-specific low-level control layer.
//! It is designed for `no_std` environments and uses the `alloc` crate for
//! the shared driver handle and, optionally, heap-backed control blocks.
//!
//! ## Architecture
//!
//! ### Control Blocks
//! - [`Dcb`]: Per-unit driver state (unit, open mode, event channel)
//! - [`DcbRegistry`]: Fixed-capacity, bounds-checked table of control blocks
//! - [`DcbStorage`]: Static or heap backing, chosen by the `heap-dcb` feature
//!
//! ### Request Handling
//! - [`DeviceOps`]: The five entry points called by the device framework
//! - [`ReadReq`] / [`WriteReq`]: Requests routed on the sign of their address
//! - [`Attr`]: Attribute space (event channel, combined transactions)
//!
//! ### Collaborators
//! - [`I2cLowLevel`]: Bus control routines, results decoded into [`Completion`]
//! - [`DeviceFramework`]: Device registration contract
//!
//! ## Example
//!
//! ```rust,ignore
//! use alloc::sync::Arc;
//! use i2cdev::{DeviceOps, I2cConfig, I2cDriver, WriteReq};
//!
//! let driver: Arc<I2cDriver<_, _>> =
//!     Arc::new(I2cDriver::new(I2cConfig::DEFAULT, framework, lowlevel));
//! driver.initialize(0)?;
//!
//! // The framework kept `def.ops` and `def.ctx` from the registration.
//! let (ops, ctx) = framework_lookup("iica");
//! ops.open(ctx, 0)?;
//!
//! let mut req = WriteReq::data(0x50, &[0x00, 0x10]);
//! ops.write(&mut req, ctx)?;
//! assert_eq!(req.actual_size, Some(2));
//! ```
//!
//! ## Concurrency
//!
//! The driver takes no locks. The device framework must deliver at most one
//! call per unit at a time; low-level calls block until the transfer is done.

extern crate alloc;
#[macro_use]
extern crate log;

mod attr;
mod config;
mod data;
mod dcb;
mod dispatch;
mod error;
mod framework;
mod lifecycle;
mod lowlevel;
#[cfg(test)]
mod mock;
mod registry;
mod request;
mod storage;

pub use config::{DEVNAME_LEN, DevName, I2cConfig, UNIT_COUNT};
pub use dcb::{Dcb, DcbState, EventChannelId, OpenMode};
pub use error::{E_NOMEM, E_NOSPT, E_PAR, E_SYS, ErrorCode, I2cError, I2cResult};
pub use framework::{DEVATR_UNDEFINED, DevCtx, DeviceDef, DeviceFramework, DeviceOps, Registration};
pub use lifecycle::I2cDriver;
pub use lowlevel::{Completion, I2cLowLevel, LlCmd};
pub use registry::DcbRegistry;
pub use request::{
    Address, Attr, DevReq, EVENT_CHANNEL_SIZE, ExecCmd, ReadReq, WriteBuf, WriteReq,
};
pub use storage::{DcbStorage, DefaultStorage, Embedded, HeapStorage, StaticStorage};
