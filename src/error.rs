//! Unified error type for mediaboard.
//!
//! We avoid `alloc` - all error variants carry no data.
//! Implements `defmt::Format` for efficient on-target logging.

/// Top-level error type used across the firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Reading a key or encoder pin failed.
    Gpio,

    /// USB stack refused a HID report (endpoint disabled, bus suspended).
    Usb,

    /// I²C transaction to the OLED failed.
    Display,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let what = match self {
            Error::Gpio => "gpio read failed",
            Error::Usb => "usb hid write failed",
            Error::Display => "display write failed",
        };
        f.write_str(what)
    }
}
