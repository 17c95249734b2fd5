//! mediaboard firmware entry point (XIAO RP2040).
//!
//! Brings up USB, the LED strip, the OLED and the encoder watcher, shows
//! the boot splash, then runs the control loop at ~120 Hz forever.

#![no_std]
#![no_main]

mod board;
mod usb;

use board::display::Oled;
use board::leds::PixelStrip;
use defmt::{info, warn};
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pio::Pio;
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_time::{Instant, Timer};
use mediaboard::config;
use mediaboard::feedback::led::LedSink;
use mediaboard::feedback::DisplaySink;
use mediaboard::input::ButtonPins;
use mediaboard::{ControlLoop, Controller};
use {defmt_rtt as _, panic_probe as _};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("mediaboard starting");

    // USB HID
    let usb = usb::hid_device::init(p.USB);
    spawner.must_spawn(usb::hid_device::run_usb_device(usb.device));

    // Encoder (A = GP6, B = GP7)
    let enc_a = Input::new(p.PIN_6, Pull::Up);
    let enc_b = Input::new(p.PIN_7, Pull::Up);
    spawner.must_spawn(board::encoder::encoder_task(enc_a, enc_b));

    // LEDs (GP27)
    let Pio {
        mut common, sm0, ..
    } = Pio::new(p.PIO0, board::Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_27, &program);
    let mut leds = PixelStrip::new(ws2812);

    // OLED on I2C0 (SCL = GP29, SDA = GP28)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config::DISPLAY_I2C_FREQUENCY_HZ;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_29, p.PIN_28, i2c_config);
    let mut display = match Oled::init(i2c) {
        Ok(display) => display,
        Err(e) => defmt::panic!("display init failed: {}", e),
    };
    info!("display ready");

    // Boot splash
    leds.fill(config::COLOR_IDLE);
    if let Err(e) = leds.present().await {
        warn!("splash leds: {}", e);
    }
    if let Err(e) = display.show(config::IDLE_TITLE, config::SPLASH_STATUS) {
        warn!("splash display: {}", e);
    }
    Timer::after_millis(config::BOOT_SPLASH_MS).await;

    let pins = ButtonPins {
        previous_track: Input::new(p.PIN_3, Pull::Up),
        next_track: Input::new(p.PIN_2, Pull::Up),
        play_pause: Input::new(p.PIN_4, Pull::Up),
        scroll_right: Input::new(p.PIN_1, Pull::Up),
        scroll_left: Input::new(p.PIN_11, Pull::Up),
        mute: Input::new(p.PIN_0, Pull::Up),
    };
    let controller = Controller::new(usb.hid, leds, display);
    let mut control = match ControlLoop::new(pins, board::encoder::position(), controller) {
        Ok(control) => control,
        Err(e) => defmt::panic!("key init failed: {}", e),
    };

    if let Err(e) = control.start().await {
        warn!("idle frame: {}", e);
    }
    info!("entering control loop");

    loop {
        let now = Instant::now().as_millis();
        match control.iterate(board::encoder::position(), now).await {
            Ok(Some(action)) => info!("action: {}", action),
            Ok(None) => {}
            Err(e) => warn!("iteration failed: {}", e),
        }
        Timer::after_millis(config::POLL_INTERVAL_MS).await;
    }
}
