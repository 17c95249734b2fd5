//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, colours and protocol
//! constants live here so they can be tuned in one place. Nothing here is
//! changeable at runtime.

use crate::feedback::led::Rgbw;

// Timing

/// Pause between two control-loop iterations (ms). 8 ms ≈ 120 Hz.
pub const POLL_INTERVAL_MS: u64 = 8;

/// A raw button level must hold this long before it becomes the stable state (ms).
pub const DEBOUNCE_MS: u64 = 10;

/// How long an action stays on the LEDs and display before reverting to idle (ms).
pub const ACTION_TTL_MS: u64 = 1500;

/// Boot splash hold time before the first idle frame (ms).
pub const BOOT_SPLASH_MS: u64 = 800;

// Encoder

/// Valid Gray-code transitions per mechanical detent.
pub const ENCODER_TRANSITIONS_PER_DETENT: i8 = 4;

// Volume tracking

/// Virtual volume at power-up (percent).
pub const VOLUME_INITIAL: u8 = 50;

/// Upper clamp for the virtual volume (percent).
pub const VOLUME_MAX: u8 = 100;

/// Number of cells in the on-screen volume bar.
pub const VOLUME_BAR_CELLS: usize = 16;

// LEDs

/// SK6812MINI-E pixels on the board.
pub const LED_COUNT: usize = 4;

/// Global brightness applied at present time (of 255). 64 ≈ 25 %.
pub const LED_BRIGHTNESS: u8 = 64;

// Display (SSD1306 128×32, 6×10 font)

pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;
pub const DISPLAY_I2C_FREQUENCY_HZ: u32 = 400_000;

/// Characters that fit on one line of the OLED.
pub const DISPLAY_COLUMNS: usize = 21;

pub const IDLE_TITLE: &str = "Media Control";
pub const IDLE_STATUS: &str = "Ready";
pub const MUTED_SUFFIX: &str = " [MUTED]";
pub const SPLASH_STATUS: &str = "    Ready";

// Colour palette (R, G, B, W)

pub const COLOR_IDLE: Rgbw = Rgbw::new(0, 0, 0, 20);
pub const COLOR_PLAY: Rgbw = Rgbw::new(0, 80, 0, 0);
pub const COLOR_PREV: Rgbw = Rgbw::new(0, 0, 100, 0);
pub const COLOR_NEXT: Rgbw = Rgbw::new(0, 80, 80, 0);
pub const COLOR_MUTE: Rgbw = Rgbw::new(100, 0, 0, 0);
pub const COLOR_UNMUTE: Rgbw = Rgbw::new(0, 0, 0, 20);
pub const COLOR_VOLUME: Rgbw = Rgbw::new(80, 40, 0, 0);
pub const COLOR_SCROLL: Rgbw = Rgbw::new(60, 0, 100, 0);

// USB

/// USB VID/PID - use the "pid.codes" open-source test VID.
/// Replace with your own allocated VID/PID for production.
pub const USB_VID: u16 = 0x1209;
pub const USB_PID: u16 = 0x0002;

/// USB device strings.
pub const USB_MANUFACTURER: &str = "mediaboard";
pub const USB_PRODUCT: &str = "Media Control Board";
pub const USB_SERIAL_NUMBER: &str = "000001";

/// USB HID polling interval (ms).
pub const USB_HID_POLL_MS: u8 = 1;

// GPIO pin assignments (Seeed XIAO RP2040)
//
// Concrete `embassy_rp::peripherals::*` are picked in `main.rs`.
//
//   LED data (SK6812, GRBW)  → GP27 (D1)
//   OLED SDA (I2C0)          → GP28 (D2)
//   OLED SCL (I2C0)          → GP29 (D3)
//   Encoder A (CLK)          → GP6  (D4)
//   Encoder B (DT)           → GP7  (D5)
//   Mute (encoder push)      → GP0  (D6)
//   Scroll right             → GP1  (D7)
//   Next track               → GP2  (D8)
//   Play / pause             → GP4  (D9)
//   Previous track           → GP3  (D10)
//   Scroll left              → GP11 (no silkscreen label)
//
// All keys are active-low with the internal pull-up enabled.
