//! Build-time driver configuration and device naming.
//!
//! Each unit is registered as the base name followed by one letter, so unit 0
//! of the default configuration is `iica`.

use arrayvec::ArrayString;

/// Maximum length of a registered device name.
pub const DEVNAME_LEN: usize = 8;

/// Device name as handed to the device framework.
pub type DevName = ArrayString<DEVNAME_LEN>;

/// Default number of I2C units managed by the driver.
pub const UNIT_COUNT: usize = 3;

/// Build-time configuration of the I2C driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct I2cConfig {
    /// Base device name; each unit appends one letter (`'a' + unit`).
    pub devname: &'static str,
    /// Maximum number of bytes sent in one request.
    pub max_send: usize,
    /// Maximum number of bytes received in one request.
    pub max_receive: usize,
}

impl I2cConfig {
    /// The configuration used when none is given.
    pub const DEFAULT: Self = Self {
        devname: "iic",
        max_send: 100,
        max_receive: 100,
    };

    /// Builds the device name of `unit`, or `None` if it does not fit.
    pub fn device_name(&self, unit: usize) -> Option<DevName> {
        let letter = u8::try_from(unit).ok()?.checked_add(b'a')?;
        if !letter.is_ascii_lowercase() {
            return None;
        }
        let mut name = DevName::new();
        name.try_push_str(self.devname).ok()?;
        name.try_push(letter as char).ok()?;
        Some(name)
    }
}

impl Default for I2cConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
