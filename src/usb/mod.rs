//! USB Device subsystem - presents a composite HID device to the host.
//!
//! The RP2040's built-in USB 1.1 Full-Speed controller is driven by
//! `embassy-usb`. We create a **composite device** with two HID
//! interfaces:
//!
//! - Interface 0: Keyboard (boot protocol) - scroll arrows
//! - Interface 1: Consumer Control - media keys and volume

pub mod hid_device;
