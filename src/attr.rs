//! Attribute-space requests: driver-level settings and combined transactions.
//!
//! Every attribute is exactly one unit wide, so any request whose
//! `requested_size` is not 1 is rejected before the attribute is decoded.

use axerrno::ax_err_type;

use crate::config::I2cConfig;
use crate::dcb::{Dcb, EventChannelId};
use crate::error::I2cResult;
use crate::lowlevel::{I2cLowLevel, LlCmd, llctl};
use crate::request::{Attr, EVENT_CHANNEL_SIZE, ReadReq, WriteBuf, WriteReq};

/// Reads a driver attribute into the caller's buffer.
pub(crate) fn read_attr(dcb: &Dcb, req: &mut ReadReq<'_>) -> I2cResult {
    if req.requested_size != 1 {
        return Err(ax_err_type!(InvalidInput, "attribute size must be 1").into());
    }

    match Attr::from_address(req.address) {
        Some(Attr::EventChannel) => {
            let Some(dst) = req.buffer.get_mut(..EVENT_CHANNEL_SIZE) else {
                return Err(ax_err_type!(InvalidInput, "buffer too small for event channel").into());
            };
            dst.copy_from_slice(&dcb.event_channel().to_ne_bytes());
            req.actual_size = Some(EVENT_CHANNEL_SIZE);
            Ok(())
        }
        _ => Err(ax_err_type!(InvalidInput, "unknown readable attribute").into()),
    }
}

/// Applies a driver attribute, or runs a combined transaction.
pub(crate) fn write_attr<L: I2cLowLevel + ?Sized>(
    dcb: &Dcb,
    req: &mut WriteReq<'_>,
    ll: &L,
    config: &I2cConfig,
) -> I2cResult {
    if req.requested_size != 1 {
        return Err(ax_err_type!(InvalidInput, "attribute size must be 1").into());
    }

    match Attr::from_address(req.address) {
        Some(Attr::EventChannel) => {
            let id = match &req.buffer {
                WriteBuf::Bytes(bytes) => bytes
                    .get(..EVENT_CHANNEL_SIZE)
                    .and_then(|src| src.try_into().ok())
                    .map(EventChannelId::from_ne_bytes),
                WriteBuf::Exec(_) => None,
            };
            let Some(id) = id else {
                return Err(ax_err_type!(InvalidInput, "malformed event channel").into());
            };
            dcb.set_event_channel(id);
            req.actual_size = Some(EVENT_CHANNEL_SIZE);
            Ok(())
        }
        Some(Attr::Execute) => {
            let WriteBuf::Exec(cmd) = &mut req.buffer else {
                return Err(ax_err_type!(InvalidInput, "execute needs a command").into());
            };
            if cmd.send_size() == 0 || cmd.send_size() > config.max_send {
                return Err(ax_err_type!(InvalidInput, "execute send size out of range").into());
            }
            if cmd.receive_size() == 0 || cmd.receive_size() > config.max_receive {
                return Err(ax_err_type!(InvalidInput, "execute receive size out of range").into());
            }

            let completion = llctl(
                ll,
                dcb.unit(),
                LlCmd::Exec {
                    address: req.address,
                    size: req.requested_size,
                    cmd,
                },
            );
            req.complete(completion)
        }
        None => Err(ax_err_type!(InvalidInput, "unknown writable attribute").into()),
    }
}
