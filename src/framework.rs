//! Contract with the generic device-management framework.
//!
//! The framework owns device naming and handle allocation. The driver only
//! hands it a [`DeviceDef`] and later receives calls through [`DeviceOps`],
//! each carrying back the opaque [`DevCtx`] it was registered with.

use alloc::sync::Arc;

use crate::config::DevName;
use crate::dcb::{EventChannelId, OpenMode};
use crate::error::{ErrorCode, I2cResult};
use crate::request::{ReadReq, WriteReq};

/// Opaque per-device context passed back by the framework on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DevCtx(usize);

impl DevCtx {
    /// Context of the device registered for `unit`.
    #[inline]
    pub const fn for_unit(unit: usize) -> Self {
        Self(unit)
    }

    /// Unit this context belongs to.
    #[inline]
    pub const fn unit(&self) -> usize {
        self.0
    }
}

/// Entry points the framework calls on a registered device.
pub trait DeviceOps {
    /// Opens the device.
    fn open(&self, ctx: DevCtx, mode: OpenMode) -> I2cResult;

    /// Closes the device.
    fn close(&self, ctx: DevCtx, option: u32) -> I2cResult;

    /// Serves a read request.
    fn read(&self, req: &mut ReadReq<'_>, ctx: DevCtx) -> I2cResult;

    /// Serves a write request.
    fn write(&self, req: &mut WriteReq<'_>, ctx: DevCtx) -> I2cResult;

    /// Handles a framework event (suspend, resume, ...).
    fn event(&self, evttyp: i32, info: usize, ctx: DevCtx) -> I2cResult;
}

/// Device attributes are left undefined by the driver.
pub const DEVATR_UNDEFINED: u32 = 0xffff_ffff;

/// Registration record for one device.
pub struct DeviceDef {
    /// Device name, e.g. `iica`.
    pub name: DevName,
    /// Context handed back on every entry point call.
    pub ctx: DevCtx,
    /// Driver attributes.
    pub driver_attr: u32,
    /// Device attributes.
    pub device_attr: u32,
    /// Number of sub units.
    pub sub_units: u32,
    /// Size of one data block in bytes.
    pub block_size: i32,
    /// Entry points of the device, kept by the framework until the device is
    /// unregistered.
    pub ops: Arc<dyn DeviceOps>,
}

impl core::fmt::Debug for DeviceDef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceDef")
            .field("name", &self.name)
            .field("ctx", &self.ctx)
            .field("driver_attr", &self.driver_attr)
            .field("device_attr", &format_args!("{:#x}", self.device_attr))
            .field("sub_units", &self.sub_units)
            .field("block_size", &self.block_size)
            .finish()
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration<H> {
    /// Handle used to unregister the device.
    pub handle: H,
    /// Event channel assigned by the framework.
    pub event_channel: EventChannelId,
}

/// The device framework as seen by the driver.
///
/// A framework keeps `def.ops` and `def.ctx` from [`DeviceFramework::register`]
/// and routes every later call for the device through them.
pub trait DeviceFramework {
    /// Handle identifying a registered device.
    type Handle: Copy;

    /// Registers a device.
    ///
    /// # Errors
    ///
    /// Returns the framework's own error code, which the driver propagates.
    fn register(&self, def: &DeviceDef) -> Result<Registration<Self::Handle>, ErrorCode>;

    /// Removes a device registered with [`DeviceFramework::register`] and
    /// drops its entry points.
    fn unregister(&self, handle: Self::Handle);
}
