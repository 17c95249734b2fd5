//! RGBW colour handling for the SK6812MINI-E strip.
//!
//! The strip takes 32 bits per pixel in G, R, B, W order. The PIO
//! program on the RP2040 shifts out 24-bit words (G, R, B), so the GRBW
//! byte stream is re-chunked into 3-byte words. The padding at the end
//! of the last word clocks past the final pixel and is ignored.

use smart_leds::RGB8;

use crate::config::LED_COUNT;
use crate::error::Error;

/// Bytes per SK6812 RGBW pixel.
const BYTES_PER_PIXEL: usize = 4;

/// 24-bit words needed to carry one frame for the whole strip.
pub const PACKED_WORDS: usize = (LED_COUNT * BYTES_PER_PIXEL).div_ceil(3);

/// One RGBW colour, each channel 0-255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgbw {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub w: u8,
}

impl Rgbw {
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Scale every channel by `brightness / 255`.
    pub fn scale(self, brightness: u8) -> Self {
        let dim = |c: u8| ((u16::from(c) * u16::from(brightness)) / 255) as u8;
        Self::new(dim(self.r), dim(self.g), dim(self.b), dim(self.w))
    }
}

/// Fill every pixel with `color` and pack the frame into 24-bit words.
pub fn pack_grbw(color: Rgbw) -> [RGB8; PACKED_WORDS] {
    let mut bytes = [0u8; PACKED_WORDS * 3];
    for pixel in bytes[..LED_COUNT * BYTES_PER_PIXEL].chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel.copy_from_slice(&[color.g, color.r, color.b, color.w]);
    }

    let mut words = [RGB8::default(); PACKED_WORDS];
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(3)) {
        // The PIO program sends g, then r, then b.
        *word = RGB8 {
            g: chunk[0],
            r: chunk[1],
            b: chunk[2],
        };
    }
    words
}

/// Write-only sink for the LED strip.
///
/// `fill` only stages the colour; nothing reaches the pixels until
/// `present` runs.
#[allow(async_fn_in_trait)]
pub trait LedSink {
    fn fill(&mut self, color: Rgbw);
    async fn present(&mut self) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_full_and_zero() {
        let c = Rgbw::new(100, 80, 255, 20);
        assert_eq!(c.scale(255), c);
        assert_eq!(c.scale(0), Rgbw::default());
    }

    #[test]
    fn scale_quarter_brightness() {
        let c = Rgbw::new(100, 0, 255, 20).scale(64);
        assert_eq!(c, Rgbw::new(25, 0, 64, 5));
    }

    #[test]
    fn four_pixels_fit_in_six_words() {
        assert_eq!(PACKED_WORDS, 6);
    }

    #[test]
    fn packed_stream_is_grbw_per_pixel() {
        let words = pack_grbw(Rgbw::new(1, 2, 3, 4));

        let mut stream = [0u8; PACKED_WORDS * 3];
        for (chunk, word) in stream.chunks_exact_mut(3).zip(words.iter()) {
            chunk.copy_from_slice(&[word.g, word.r, word.b]);
        }

        for pixel in stream[..16].chunks_exact(4) {
            assert_eq!(pixel, &[2, 1, 3, 4]);
        }
        assert_eq!(&stream[16..], &[0, 0]);
    }
}
