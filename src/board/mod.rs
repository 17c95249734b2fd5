//! Board-level drivers for the XIAO RP2040 media board.
//!
//! These are the thin collaborators the control loop writes to: the
//! OLED, the RGBW strip and the encoder edge watcher. Pin choices are
//! documented in `mediaboard::config`.

pub mod display;
pub mod encoder;
pub mod leds;

use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::{PIO0, USB};

bind_interrupts!(pub struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
    PIO0_IRQ_0 => embassy_rp::pio::InterruptHandler<PIO0>;
});
