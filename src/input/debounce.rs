//! Time-based debouncing for the six active-low keys.
//!
//! A raw level has to stay unchanged for [`DEBOUNCE_MS`] before it is
//! accepted as the new stable state. The poll that accepts it is the
//! one (and only one) that reports the edge.
//!
//! [`DEBOUNCE_MS`]: crate::config::DEBOUNCE_MS

use embedded_hal::digital::InputPin;

use crate::config::DEBOUNCE_MS;
use crate::error::Error;

/// Debounce filter for a single input, independent of any pin.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    raw_active: bool,
    raw_since_ms: u64,
    stable_active: bool,
    previous_stable_active: bool,
    window_ms: u64,
}

impl Debouncer {
    /// Start already settled on `active`; no edge is reported for the initial level.
    pub const fn new(active: bool, window_ms: u64) -> Self {
        Self {
            raw_active: active,
            raw_since_ms: 0,
            stable_active: active,
            previous_stable_active: active,
            window_ms,
        }
    }

    /// Feed one raw sample taken at `now_ms`.
    pub fn update(&mut self, raw_active: bool, now_ms: u64) {
        self.previous_stable_active = self.stable_active;

        if raw_active != self.raw_active {
            // Level moved: restart the stabilisation window.
            self.raw_active = raw_active;
            self.raw_since_ms = now_ms;
        } else if raw_active != self.stable_active
            && now_ms.saturating_sub(self.raw_since_ms) >= self.window_ms
        {
            self.stable_active = raw_active;
        }
    }

    /// Debounced level.
    pub fn is_active(&self) -> bool {
        self.stable_active
    }

    /// Press edge accepted by the last [`update`](Self::update).
    pub fn fell(&self) -> bool {
        self.stable_active && !self.previous_stable_active
    }

    /// Release edge accepted by the last [`update`](Self::update).
    pub fn rose(&self) -> bool {
        !self.stable_active && self.previous_stable_active
    }
}

/// One physical key bound to its pin.
///
/// Keys are wired active-low with pull-ups, so a pressed key reads low.
pub struct Button<P> {
    pin: P,
    filter: Debouncer,
}

impl<P: InputPin> Button<P> {
    /// Bind a key to `pin`, seeding the filter with the level it reads now.
    pub fn new(mut pin: P) -> Result<Self, Error> {
        let pressed = pin.is_low().map_err(|_| Error::Gpio)?;
        Ok(Self {
            pin,
            filter: Debouncer::new(pressed, DEBOUNCE_MS),
        })
    }

    /// Sample the pin and advance the filter.
    pub fn update(&mut self, now_ms: u64) -> Result<(), Error> {
        let pressed = self.pin.is_low().map_err(|_| Error::Gpio)?;
        self.filter.update(pressed, now_ms);
        Ok(())
    }

    /// Key went down on the last `update`.
    pub fn fell(&self) -> bool {
        self.filter.fell()
    }
}
