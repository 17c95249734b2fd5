//! Physical inputs: six debounced keys and the volume encoder.
//!
//! ## Components
//!
//! - **Keys**: active-low tactile switches, time-debounced
//! - **Encoder**: quadrature knob, one volume step per detent

pub mod debounce;
pub mod encoder;

use embedded_hal::digital::InputPin;

use crate::dispatch::Edges;
use crate::error::Error;
use debounce::Button;

/// Pins for the six keys, by function.
pub struct ButtonPins<P> {
    pub previous_track: P,
    pub next_track: P,
    pub play_pause: P,
    pub scroll_right: P,
    pub scroll_left: P,
    pub mute: P,
}

/// All six keys, sampled together once per poll.
pub struct ButtonBank<P> {
    previous_track: Button<P>,
    next_track: Button<P>,
    play_pause: Button<P>,
    scroll_right: Button<P>,
    scroll_left: Button<P>,
    mute: Button<P>,
}

impl<P: InputPin> ButtonBank<P> {
    pub fn new(pins: ButtonPins<P>) -> Result<Self, Error> {
        Ok(Self {
            previous_track: Button::new(pins.previous_track)?,
            next_track: Button::new(pins.next_track)?,
            play_pause: Button::new(pins.play_pause)?,
            scroll_right: Button::new(pins.scroll_right)?,
            scroll_left: Button::new(pins.scroll_left)?,
            mute: Button::new(pins.mute)?,
        })
    }

    /// Update every key and collect this poll's press edges.
    ///
    /// The encoder delta is left at zero; the control loop fills it in.
    pub fn poll(&mut self, now_ms: u64) -> Result<Edges, Error> {
        for button in [
            &mut self.previous_track,
            &mut self.next_track,
            &mut self.play_pause,
            &mut self.scroll_right,
            &mut self.scroll_left,
            &mut self.mute,
        ] {
            button.update(now_ms)?;
        }

        Ok(Edges {
            previous_track: self.previous_track.fell(),
            next_track: self.next_track.fell(),
            play_pause: self.play_pause.fell(),
            scroll_right: self.scroll_right.fell(),
            scroll_left: self.scroll_left.fell(),
            mute: self.mute.fell(),
            encoder_delta: 0,
        })
    }
}
