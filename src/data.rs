//! Data-space requests: bytes moved over the bus by the low-level layer.

use axerrno::ax_err_type;

use crate::config::I2cConfig;
use crate::dcb::Dcb;
use crate::error::I2cResult;
use crate::lowlevel::{I2cLowLevel, LlCmd, llctl};
use crate::request::{ReadReq, WriteBuf, WriteReq};

/// Reads device data at the request address.
pub(crate) fn read_data<L: I2cLowLevel + ?Sized>(
    dcb: &Dcb,
    req: &mut ReadReq<'_>,
    ll: &L,
    config: &I2cConfig,
) -> I2cResult {
    let size = req.requested_size;
    if size > config.max_receive {
        return Err(ax_err_type!(InvalidInput, "read size exceeds maximum").into());
    }
    if size == 0 {
        req.actual_size = Some(0);
        return Ok(());
    }
    let Some(buf) = req.buffer.get_mut(..size) else {
        return Err(ax_err_type!(InvalidInput, "read buffer shorter than request").into());
    };

    let completion = llctl(
        ll,
        dcb.unit(),
        LlCmd::Read {
            address: req.address,
            buf,
        },
    );
    req.complete(completion)
}

/// Writes device data at the request address.
pub(crate) fn write_data<L: I2cLowLevel + ?Sized>(
    dcb: &Dcb,
    req: &mut WriteReq<'_>,
    ll: &L,
    config: &I2cConfig,
) -> I2cResult {
    let size = req.requested_size;
    if size > config.max_send {
        return Err(ax_err_type!(InvalidInput, "write size exceeds maximum").into());
    }
    if size == 0 {
        req.actual_size = Some(0);
        return Ok(());
    }
    let buf = match &req.buffer {
        WriteBuf::Bytes(bytes) => bytes.get(..size),
        WriteBuf::Exec(_) => None,
    };
    let Some(buf) = buf else {
        return Err(ax_err_type!(InvalidInput, "write buffer does not hold the request").into());
    };

    let completion = llctl(
        ll,
        dcb.unit(),
        LlCmd::Write {
            address: req.address,
            buf,
        },
    );
    req.complete(completion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::I2cError;
    use crate::mock::{LlCall, MockLowLevel};
    use crate::request::ExecCmd;
    use alloc::vec;
    use axerrno::AxError;

    const INVALID: I2cError = I2cError::Driver(AxError::InvalidInput);

    #[test]
    fn test_write_forwards_bytes() {
        let dcb = Dcb::new(2);
        let ll = MockLowLevel::returning(5);

        let mut req = WriteReq::data(0x10, &[1, 2, 3, 4, 5]);
        write_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT).unwrap();
        assert_eq!(req.actual_size, Some(5));
        assert_eq!(
            *ll.calls.borrow(),
            vec![LlCall::Write {
                unit: 2,
                address: 0x10,
                data: vec![1, 2, 3, 4, 5],
            }]
        );
    }

    #[test]
    fn test_read_fills_buffer() {
        let dcb = Dcb::new(0);
        let ll = MockLowLevel::returning(4);

        let mut buf = [0u8; 6];
        let mut req = ReadReq::new(3, 4, &mut buf[..]);
        read_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT).unwrap();
        assert_eq!(req.actual_size, Some(4));
        assert_eq!(buf, [0xa5, 0xa5, 0xa5, 0xa5, 0, 0]);
        assert_eq!(
            *ll.calls.borrow(),
            vec![LlCall::Read {
                unit: 0,
                address: 3,
                size: 4,
            }]
        );
    }

    #[test]
    fn test_read_error_propagated() {
        let dcb = Dcb::new(0);
        let ll = MockLowLevel::returning(-3);

        let mut buf = [0u8; 2];
        let mut req = ReadReq::data(0, &mut buf);
        assert_eq!(
            read_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT),
            Err(I2cError::Propagated(-3))
        );
    }

    #[test]
    fn test_zero_size_is_a_no_op() {
        let dcb = Dcb::new(0);
        let ll = MockLowLevel::returning(-1);

        let mut req = WriteReq::data(0, &[]);
        assert_eq!(write_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT), Ok(()));
        assert_eq!(req.actual_size, Some(0));

        let mut req = ReadReq::data(0, &mut []);
        assert_eq!(read_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT), Ok(()));
        assert_eq!(req.actual_size, Some(0));

        assert_eq!(ll.call_count(), 0);
    }

    #[test]
    fn test_size_bounds() {
        let dcb = Dcb::new(0);
        let ll = MockLowLevel::returning(1);
        let config = I2cConfig {
            max_send: 4,
            max_receive: 2,
            ..I2cConfig::DEFAULT
        };

        let bytes = [0u8; 5];
        let mut req = WriteReq::data(0, &bytes);
        assert_eq!(write_data(&dcb, &mut req, &ll, &config), Err(INVALID));

        let mut buf = [0u8; 3];
        let mut req = ReadReq::data(0, &mut buf);
        assert_eq!(read_data(&dcb, &mut req, &ll, &config), Err(INVALID));
        assert_eq!(ll.call_count(), 0);

        let mut req = WriteReq::data(0, &bytes[..4]);
        assert!(write_data(&dcb, &mut req, &ll, &config).is_ok());
        let mut req = ReadReq::data(0, &mut buf[..2]);
        assert!(read_data(&dcb, &mut req, &ll, &config).is_ok());
        assert_eq!(ll.call_count(), 2);
    }

    #[test]
    fn test_buffer_must_hold_request() {
        let dcb = Dcb::new(0);
        let ll = MockLowLevel::returning(1);

        let mut buf = [0u8; 2];
        let mut req = ReadReq::new(0, 3, &mut buf[..]);
        assert_eq!(read_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT), Err(INVALID));

        let mut req = WriteReq::new(0, 3, WriteBuf::Bytes(&[1, 2]));
        assert_eq!(write_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT), Err(INVALID));

        let send = [1u8];
        let mut recv = [0u8; 1];
        let mut req = WriteReq::new(0, 1, WriteBuf::Exec(ExecCmd::new(0x50, &send, &mut recv)));
        assert_eq!(write_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT), Err(INVALID));
        assert_eq!(ll.call_count(), 0);
    }

    #[test]
    fn test_zero_return_leaves_size_unset() {
        let dcb = Dcb::new(0);
        let ll = MockLowLevel::returning(0);

        let mut req = WriteReq::data(0, &[7]);
        assert_eq!(write_data(&dcb, &mut req, &ll, &I2cConfig::DEFAULT), Ok(()));
        assert_eq!(req.actual_size, None);
    }
}
