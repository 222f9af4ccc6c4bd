//! Entry points called by the device framework.
//!
//! Reads and writes are routed on the sign of the request address: negative
//! addresses go to the attribute handlers, everything else to the data
//! handlers. Bounds checking is left entirely to the handlers.

use axerrno::ax_err_type;

use crate::attr::{read_attr, write_attr};
use crate::data::{read_data, write_data};
use crate::dcb::OpenMode;
use crate::error::I2cResult;
use crate::framework::{DevCtx, DeviceFramework, DeviceOps};
use crate::lifecycle::I2cDriver;
use crate::lowlevel::I2cLowLevel;
use crate::request::{ReadReq, WriteReq};
use crate::storage::DcbStorage;

impl<F, L, const N: usize, S> DeviceOps for I2cDriver<F, L, N, S>
where
    F: DeviceFramework,
    L: I2cLowLevel,
    S: DcbStorage,
{
    fn open(&self, ctx: DevCtx, mode: OpenMode) -> I2cResult {
        self.open_unit(ctx, mode)
    }

    fn close(&self, ctx: DevCtx, option: u32) -> I2cResult {
        self.close_unit(ctx, option)
    }

    fn read(&self, req: &mut ReadReq<'_>, ctx: DevCtx) -> I2cResult {
        let dcb = self.registry.lookup(ctx.unit())?;
        trace!(
            "i2c{}: read address {} size {}",
            dcb.unit(),
            req.address,
            req.requested_size
        );

        if req.is_attribute() {
            read_attr(dcb, req)
        } else {
            read_data(dcb, req, &self.ll, &self.config)
        }
    }

    fn write(&self, req: &mut WriteReq<'_>, ctx: DevCtx) -> I2cResult {
        let dcb = self.registry.lookup(ctx.unit())?;
        trace!(
            "i2c{}: write address {} size {}",
            dcb.unit(),
            req.address,
            req.requested_size
        );

        if req.is_attribute() {
            write_attr(dcb, req, &self.ll, &self.config)
        } else {
            write_data(dcb, req, &self.ll, &self.config)
        }
    }

    fn event(&self, evttyp: i32, _info: usize, ctx: DevCtx) -> I2cResult {
        trace!("i2c{}: event {}", ctx.unit(), evttyp);
        Err(ax_err_type!(Unsupported, "i2c devices take no events").into())
    }
}
