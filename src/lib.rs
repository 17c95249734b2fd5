//! Host-testable core of the mediaboard firmware.
//!
//! Everything between the pins and the output drivers lives here:
//! debouncing, encoder decoding, action priority, the virtual volume,
//! feedback timing and HID report layout. None of it touches hardware,
//! so it runs under `cargo test --lib` on the host.
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and plugs the real USB, LED and OLED drivers into the sink traits
//! defined here.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod control_loop;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod feedback;
pub mod hid;
pub mod input;

pub use control_loop::ControlLoop;
pub use controller::Controller;
pub use dispatch::{Action, Edges};
pub use error::Error;
