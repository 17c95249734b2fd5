//! Quadrature rotary encoder: decoding and per-poll step deltas.
//!
//! [`QuadratureDecoder`] turns A/B level changes into an absolute detent
//! count. It is fed from the firmware's edge watcher, not from the control
//! loop. [`EncoderTracker`] is the control loop's side: it turns that
//! absolute count into a signed delta once per poll.

use crate::config::ENCODER_TRANSITIONS_PER_DETENT;

/// Quarter-step movement for `(previous << 2) | next`, with states `(a << 1) | b`.
///
/// Sequence 00 → 10 → 11 → 01 counts up. Double transitions (both lines
/// flipped between samples) carry no direction and count as 0.
const TRANSITIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Gray-code decoder producing an absolute detent position.
#[derive(Clone, Copy, Debug)]
pub struct QuadratureDecoder {
    state: u8,
    quarter_steps: i8,
    position: i32,
}

impl QuadratureDecoder {
    /// Start at position 0 with the lines at their current levels.
    pub const fn new(a: bool, b: bool) -> Self {
        Self {
            state: encode(a, b),
            quarter_steps: 0,
            position: 0,
        }
    }

    /// Consume the current line levels and return the updated position.
    pub fn update(&mut self, a: bool, b: bool) -> i32 {
        let next = encode(a, b);
        let index = usize::from((self.state << 2) | next);
        self.state = next;
        self.quarter_steps += TRANSITIONS[index];

        if self.quarter_steps >= ENCODER_TRANSITIONS_PER_DETENT {
            self.quarter_steps -= ENCODER_TRANSITIONS_PER_DETENT;
            self.position = self.position.wrapping_add(1);
        } else if self.quarter_steps <= -ENCODER_TRANSITIONS_PER_DETENT {
            self.quarter_steps += ENCODER_TRANSITIONS_PER_DETENT;
            self.position = self.position.wrapping_sub(1);
        }

        self.position
    }

    pub fn position(&self) -> i32 {
        self.position
    }
}

const fn encode(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | b as u8
}

/// Remembers the position consumed by the last poll.
#[derive(Clone, Copy, Debug)]
pub struct EncoderTracker {
    last_position: i32,
}

impl EncoderTracker {
    pub const fn new(position: i32) -> Self {
        Self {
            last_position: position,
        }
    }

    /// Steps since the previous call; the full magnitude is kept.
    pub fn take_delta(&mut self, position: i32) -> i32 {
        let delta = position.wrapping_sub(self.last_position);
        self.last_position = position;
        delta
    }
}
