//! Action execution and feedback timing.
//!
//! The controller owns the virtual volume, the mute flag and the
//! feedback state, plus the three output sinks. It runs whatever
//! [`Edges::select`] picks and reverts the feedback once it expires.

use crate::config::{
    COLOR_MUTE, COLOR_NEXT, COLOR_PLAY, COLOR_PREV, COLOR_SCROLL, COLOR_UNMUTE, COLOR_VOLUME,
    VOLUME_INITIAL, VOLUME_MAX,
};
use crate::dispatch::{Action, Edges};
use crate::error::Error;
use crate::feedback::led::LedSink;
use crate::feedback::{volume_bar, volume_title, Content, DisplaySink, Feedback};
use crate::hid::{Command, HidSink};

/// Locally tracked volume, 0-100. Never read back from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Volume(u8);

impl Volume {
    pub const fn new(level: u8) -> Self {
        Self(if level > VOLUME_MAX { VOLUME_MAX } else { level })
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Move by `steps` and clamp to 0..=100.
    pub fn adjust(&mut self, steps: i32) -> u8 {
        let level = i32::from(self.0)
            .saturating_add(steps)
            .clamp(0, i32::from(VOLUME_MAX));
        self.0 = level as u8;
        self.0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(VOLUME_INITIAL)
    }
}

pub struct Controller<H, L, D> {
    hid: H,
    leds: L,
    display: D,
    volume: Volume,
    muted: bool,
    feedback: Feedback,
}

impl<H, L, D> Controller<H, L, D>
where
    H: HidSink,
    L: LedSink,
    D: DisplaySink,
{
    /// Power-up state: idle frame, unmuted, volume at 50 %.
    pub fn new(hid: H, leds: L, display: D) -> Self {
        Self {
            hid,
            leds,
            display,
            volume: Volume::default(),
            muted: false,
            feedback: Feedback::idle(false),
        }
    }

    /// Push the current frame to the LEDs and display.
    pub async fn render(&mut self) -> Result<(), Error> {
        let content = self.feedback.content();
        self.leds.fill(content.color);
        self.leds.present().await?;
        self.display.show(&content.top, &content.bottom)
    }

    /// Run the highest-priority action in `edges`, if any.
    pub async fn dispatch(&mut self, edges: &Edges, now_ms: u64) -> Result<Option<Action>, Error> {
        let Some(action) = edges.select() else {
            return Ok(None);
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("dispatch: {}", action);

        let content = match action {
            Action::PreviousTrack => {
                self.hid.send(Command::PreviousTrack).await?;
                Content::new(COLOR_PREV, "Previous Track", " |<< ")
            }
            Action::NextTrack => {
                self.hid.send(Command::NextTrack).await?;
                Content::new(COLOR_NEXT, "Next Track", "  >>|")
            }
            Action::PlayPause => {
                self.hid.send(Command::PlayPause).await?;
                Content::new(COLOR_PLAY, "Play / Pause", "   > / ||")
            }
            Action::ScrollRight => {
                self.hid.send(Command::RightArrow).await?;
                Content::new(COLOR_SCROLL, "Scroll", "   Right >>")
            }
            Action::ScrollLeft => {
                self.hid.send(Command::LeftArrow).await?;
                Content::new(COLOR_SCROLL, "Scroll", "  << Left")
            }
            Action::ToggleMute => {
                self.muted = !self.muted;
                self.hid.send(Command::Mute).await?;
                if self.muted {
                    Content::new(COLOR_MUTE, "Audio", "  Muted")
                } else {
                    Content::new(COLOR_UNMUTE, "Audio", "  Unmuted")
                }
            }
            Action::Volume(delta) => self.change_volume(delta).await?,
        };

        self.feedback.trigger(content, now_ms);
        self.render().await?;
        Ok(Some(action))
    }

    /// One volume command per detent, then the bar.
    ///
    /// The level follows each accepted command, so a batch cut short by a
    /// transport error leaves it matching what the host received.
    async fn change_volume(&mut self, delta: i32) -> Result<Content, Error> {
        let increased = delta > 0;
        let command = if increased {
            Command::VolumeIncrement
        } else {
            Command::VolumeDecrement
        };
        let step = delta.signum();
        for _ in 0..delta.unsigned_abs() {
            self.hid.send(command).await?;
            self.volume.adjust(step);
        }

        let level = self.volume.level();
        Ok(Content {
            color: COLOR_VOLUME,
            top: volume_title(increased, level),
            bottom: volume_bar(level),
        })
    }

    /// Go back to the idle frame once the action deadline has passed.
    ///
    /// Returns whether a revert happened.
    pub async fn revert_if_expired(&mut self, now_ms: u64) -> Result<bool, Error> {
        if !self.feedback.revert_due(now_ms) {
            return Ok(false);
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("feedback expired, back to idle (muted={})", self.muted);

        self.feedback.revert(self.muted);
        self.render().await?;
        Ok(true)
    }

    pub fn volume(&self) -> u8 {
        self.volume.level()
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn hid(&self) -> &H {
        &self.hid
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn display(&self) -> &D {
        &self.display
    }
}
