//! Outbound HID commands and the report types that carry them.
//!
//! Every [`Command`] is delivered as a "tap": a press report immediately
//! followed by a release report on the matching interface.

pub mod consumer;
pub mod keyboard;


use crate::error::Error;
use consumer::{ConsumerReport, ConsumerUsage};
use keyboard::{KeyboardReport, KEY_LEFT_ARROW, KEY_RIGHT_ARROW};

/// The fixed set of codes the board ever sends to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    PreviousTrack,
    NextTrack,
    PlayPause,
    Mute,
    VolumeIncrement,
    VolumeDecrement,
    LeftArrow,
    RightArrow,
}

impl Command {
    /// Report that presses the key behind this command.
    pub fn press(self) -> HidReport {
        match self {
            Command::PreviousTrack => consumer(ConsumerUsage::PrevTrack),
            Command::NextTrack => consumer(ConsumerUsage::NextTrack),
            Command::PlayPause => consumer(ConsumerUsage::PlayPause),
            Command::Mute => consumer(ConsumerUsage::Mute),
            Command::VolumeIncrement => consumer(ConsumerUsage::VolumeUp),
            Command::VolumeDecrement => consumer(ConsumerUsage::VolumeDown),
            Command::LeftArrow => HidReport::Keyboard(KeyboardReport::single(KEY_LEFT_ARROW)),
            Command::RightArrow => HidReport::Keyboard(KeyboardReport::single(KEY_RIGHT_ARROW)),
        }
    }

    /// Report that releases everything on the same interface as [`Command::press`].
    pub fn release(self) -> HidReport {
        match self.press() {
            HidReport::Keyboard(_) => HidReport::Keyboard(KeyboardReport::empty()),
            HidReport::Consumer(_) => HidReport::Consumer(ConsumerReport::empty()),
        }
    }
}

fn consumer(usage: ConsumerUsage) -> HidReport {
    HidReport::Consumer(ConsumerReport::new(usage))
}

/// A report for one of the two HID interfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Keyboard(KeyboardReport),
    Consumer(ConsumerReport),
}

impl HidReport {
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        match self {
            HidReport::Keyboard(k) => k.serialize(buf),
            HidReport::Consumer(c) => c.serialize(buf),
        }
    }

    #[cfg(test)]
    pub fn is_keyboard(&self) -> bool {
        matches!(self, HidReport::Keyboard(_))
    }

    #[cfg(test)]
    pub fn is_consumer(&self) -> bool {
        matches!(self, HidReport::Consumer(_))
    }
}

/// Write-only sink for outbound commands (the USB HID transport).
///
/// `send` returns once the whole tap has been handed to the transport.
#[allow(async_fn_in_trait)]
pub trait HidSink {
    async fn send(&mut self, command: Command) -> Result<(), Error>;
}
