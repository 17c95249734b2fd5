//! SSD1306 OLED display wrapper (128×32, two text lines).

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use mediaboard::config::DISPLAY_I2C_ADDRESS;
use mediaboard::feedback::DisplaySink;
use mediaboard::Error;
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// Vertical centres of the two lines.
const TOP_LINE: Point = Point::new(4, 8);
const BOTTOM_LINE: Point = Point::new(4, 22);

pub struct Oled<I2C> {
    display: Display<I2C>,
}

impl<I2C> Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Initialise the SSD1306 display and clear the screen.
    pub fn init(i2c: I2C) -> Result<Self, Error> {
        let interface = I2CDisplayInterface::new_custom_address(i2c, DISPLAY_I2C_ADDRESS);
        let mut display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        display.init().map_err(|_| Error::Display)?;
        display.clear_buffer();
        display.flush().map_err(|_| Error::Display)?;
        Ok(Self { display })
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

impl<I2C> DisplaySink for Oled<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn show(&mut self, top: &str, bottom: &str) -> Result<(), Error> {
        self.display.clear_buffer();

        for (text, at) in [(top, TOP_LINE), (bottom, BOTTOM_LINE)] {
            Text::with_baseline(text, at, text_style(), Baseline::Middle)
                .draw(&mut self.display)
                .map_err(|_| Error::Display)?;
        }

        self.display.flush().map_err(|_| Error::Display)
    }
}
