//! SK6812MINI-E strip on PIO0.

use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use mediaboard::config::LED_BRIGHTNESS;
use mediaboard::feedback::led::{pack_grbw, LedSink, Rgbw, PACKED_WORDS};
use mediaboard::Error;

pub type Ws2812 = PioWs2812<'static, PIO0, 0, PACKED_WORDS>;

pub struct PixelStrip {
    driver: Ws2812,
    color: Rgbw,
}

impl PixelStrip {
    pub fn new(driver: Ws2812) -> Self {
        Self {
            driver,
            color: Rgbw::default(),
        }
    }
}

impl LedSink for PixelStrip {
    fn fill(&mut self, color: Rgbw) {
        self.color = color;
    }

    async fn present(&mut self) -> Result<(), Error> {
        let frame = pack_grbw(self.color.scale(LED_BRIGHTNESS));
        self.driver.write(&frame).await;
        Ok(())
    }
}
