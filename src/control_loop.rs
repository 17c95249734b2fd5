//! One iteration of the board's main loop.
//!
//! Phase 1 polls every key and the encoder and dispatches at most one
//! action. Phase 2 checks the feedback deadline. The pacing delay between
//! iterations belongs to the caller (`Timer::after` on target).

use embedded_hal::digital::InputPin;

use crate::controller::Controller;
use crate::dispatch::Action;
use crate::error::Error;
use crate::feedback::led::LedSink;
use crate::feedback::DisplaySink;
use crate::hid::HidSink;
use crate::input::encoder::EncoderTracker;
use crate::input::{ButtonBank, ButtonPins};

pub struct ControlLoop<P, H, L, D> {
    buttons: ButtonBank<P>,
    encoder: EncoderTracker,
    controller: Controller<H, L, D>,
}

impl<P, H, L, D> ControlLoop<P, H, L, D>
where
    P: InputPin,
    H: HidSink,
    L: LedSink,
    D: DisplaySink,
{
    /// Bind the keys and remember where the encoder currently sits.
    pub fn new(
        pins: ButtonPins<P>,
        encoder_position: i32,
        controller: Controller<H, L, D>,
    ) -> Result<Self, Error> {
        Ok(Self {
            buttons: ButtonBank::new(pins)?,
            encoder: EncoderTracker::new(encoder_position),
            controller,
        })
    }

    /// Show the idle frame.
    pub async fn start(&mut self) -> Result<(), Error> {
        self.controller.render().await
    }

    /// Run one poll → dispatch → revert pass.
    ///
    /// The encoder delta is consumed every iteration, even when a key wins
    /// the poll, so dropped detents are not replayed later. The revert check
    /// runs even when dispatch fails; the dispatch error is returned after it.
    pub async fn iterate(&mut self, encoder_position: i32, now_ms: u64) -> Result<Option<Action>, Error> {
        let mut edges = self.buttons.poll(now_ms)?;
        edges.encoder_delta = self.encoder.take_delta(encoder_position);

        let action = self.controller.dispatch(&edges, now_ms).await;
        self.controller.revert_if_expired(now_ms).await?;
        action
    }

    pub fn controller(&self) -> &Controller<H, L, D> {
        &self.controller
    }
}
