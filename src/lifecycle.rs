//! Per-unit lifecycle: initialization and registration, open and close.
//!
//! # State Transitions
//!
//! ```text
//! ┌───────────────┐  initialize()  ┌────────────┐  open()   ┌────────┐
//! │ Uninitialized │ ─────────────> │ Registered │ ────────> │ Opened │
//! └───────────────┘                └────────────┘ <──────── └────────┘
//!                                                   close()
//! ```
//!
//! A failure inside `initialize()` rolls the unit back to `Uninitialized`:
//! the framework registration is removed and the control block dropped
//! before it ever becomes visible.
//! Failed opens and closes leave the state as it was.

use alloc::sync::Arc;

use axerrno::{AxResult, ax_err_type};

use crate::config::{DevName, I2cConfig, UNIT_COUNT};
use crate::dcb::{Dcb, DcbState, OpenMode};
use crate::error::{I2cError, I2cResult};
use crate::framework::{DEVATR_UNDEFINED, DevCtx, DeviceDef, DeviceFramework, DeviceOps};
use crate::lowlevel::{Completion, I2cLowLevel, LlCmd, llctl};
use crate::registry::DcbRegistry;
use crate::storage::{DcbStorage, DefaultStorage};

/// I2C character-device driver managing up to `N` units.
pub struct I2cDriver<F, L, const N: usize = UNIT_COUNT, S = DefaultStorage>
where
    F: DeviceFramework,
    L: I2cLowLevel,
    S: DcbStorage,
{
    pub(crate) config: I2cConfig,
    pub(crate) registry: DcbRegistry<N, S>,
    pub(crate) ll: L,
    framework: F,
}

impl<F, L, const N: usize, S> I2cDriver<F, L, N, S>
where
    F: DeviceFramework,
    L: I2cLowLevel,
    S: DcbStorage,
{
    /// Creates a driver with no unit initialized.
    pub fn new(config: I2cConfig, framework: F, ll: L) -> Self {
        Self {
            config,
            registry: DcbRegistry::new(),
            ll,
            framework,
        }
    }

    /// Gets the driver configuration.
    #[inline]
    pub fn config(&self) -> &I2cConfig {
        &self.config
    }

    /// Gets the device framework the units are registered with.
    #[inline]
    pub fn framework(&self) -> &F {
        &self.framework
    }

    /// Gets the low-level control layer.
    #[inline]
    pub fn lowlevel(&self) -> &L {
        &self.ll
    }

    /// Gets the control block of an initialized unit.
    pub fn dcb(&self, unit: usize) -> AxResult<&Dcb> {
        self.registry.lookup(unit)
    }

    /// Initializes `unit` and registers its device with the framework.
    ///
    /// The framework receives a clone of `self` as the device's entry points.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `unit` is out of range or its name does not fit
    /// - `AlreadyExists` if the unit was already initialized
    /// - `NoMemory` if no control block can be allocated
    /// - the framework's or the low-level layer's code, propagated as is
    pub fn initialize(self: &Arc<Self>, unit: usize) -> I2cResult
    where
        F: 'static,
        L: 'static,
        S: 'static,
    {
        if unit >= N {
            return Err(ax_err_type!(InvalidInput, "unit out of range").into());
        }
        let Some(name) = self.config.device_name(unit) else {
            return Err(ax_err_type!(InvalidInput, "device name too long").into());
        };

        let ops: Arc<dyn DeviceOps> = self.clone();
        self.registry
            .allocate_with(unit, |dcb| self.register_unit(dcb, name, ops))?;
        Ok(())
    }

    /// Registers a freshly allocated unit and brings up its hardware.
    ///
    /// On failure everything acquired here is given back; the caller drops
    /// the control block.
    fn register_unit(&self, dcb: &Dcb, name: DevName, ops: Arc<dyn DeviceOps>) -> I2cResult {
        let unit = dcb.unit();
        let def = DeviceDef {
            name,
            ctx: DevCtx::for_unit(unit),
            driver_attr: 0,
            device_attr: DEVATR_UNDEFINED,
            sub_units: 0,
            block_size: 1,
            ops,
        };
        let registration = self.framework.register(&def).map_err(|code| {
            error!("i2c{}: registering {} failed ({})", unit, name, code);
            I2cError::Propagated(code)
        })?;
        dcb.set_event_channel(registration.event_channel);

        if let Err(code) = self.ll.init(dcb) {
            error!("i2c{}: hardware init failed ({})", unit, code);
            self.framework.unregister(registration.handle);
            return Err(I2cError::Propagated(code));
        }

        debug!(
            "i2c{}: registered as {}, event channel {}",
            unit, name, registration.event_channel
        );
        Ok(())
    }

    /// Records the open mode and opens the unit's bus.
    pub(crate) fn open_unit(&self, ctx: DevCtx, mode: OpenMode) -> I2cResult {
        let dcb = self.registry.lookup(ctx.unit())?;
        dcb.set_open_mode(mode);

        if let Completion::Failed(code) = llctl(&self.ll, dcb.unit(), LlCmd::Open) {
            return Err(I2cError::Propagated(code));
        }
        dcb.set_state(DcbState::Opened);
        debug!("i2c{}: opened, mode {:#x}", dcb.unit(), mode);
        Ok(())
    }

    /// Closes the unit's bus.
    pub(crate) fn close_unit(&self, ctx: DevCtx, option: u32) -> I2cResult {
        let dcb = self.registry.lookup(ctx.unit())?;

        if let Completion::Failed(code) = llctl(&self.ll, dcb.unit(), LlCmd::Close) {
            return Err(I2cError::Propagated(code));
        }
        dcb.set_state(DcbState::Registered);
        debug!("i2c{}: closed, option {:#x}", dcb.unit(), option);
        Ok(())
    }
}
