//! Visual feedback: LED colour plus two lines of text, with expiry.
//!
//! An action puts its content on screen and arms a single deadline.
//! Once the deadline passes, the next [`Feedback::revert_due`] check
//! reports it and the owner switches back to the idle frame.

pub mod led;

use core::fmt::Write;

use heapless::String;

use crate::config::{
    ACTION_TTL_MS, COLOR_IDLE, DISPLAY_COLUMNS, IDLE_STATUS, IDLE_TITLE, MUTED_SUFFIX,
    VOLUME_BAR_CELLS, VOLUME_MAX,
};
use crate::error::Error;
use led::Rgbw;

/// One display line, sized to the OLED width.
pub type Line = String<DISPLAY_COLUMNS>;

/// Write-only sink for the two-line display.
pub trait DisplaySink {
    /// Replace both lines.
    fn show(&mut self, top: &str, bottom: &str) -> Result<(), Error>;
}

/// Everything shown for one state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Content {
    pub color: Rgbw,
    pub top: Line,
    pub bottom: Line,
}

impl Content {
    /// Build from text; anything past the display width is cut off.
    pub fn new(color: Rgbw, top: &str, bottom: &str) -> Self {
        Self {
            color,
            top: line(top),
            bottom: line(bottom),
        }
    }

    /// The resting frame, with a mute marker when muted.
    pub fn idle(muted: bool) -> Self {
        let mut status = line(IDLE_STATUS);
        if muted {
            let _ = status.push_str(MUTED_SUFFIX);
        }
        Self {
            color: COLOR_IDLE,
            top: line(IDLE_TITLE),
            bottom: status,
        }
    }
}

/// What is currently on the LEDs and display, and when it expires.
#[derive(Clone, Debug)]
pub struct Feedback {
    content: Content,
    expires_at: Option<u64>,
}

impl Feedback {
    pub fn idle(muted: bool) -> Self {
        Self {
            content: Content::idle(muted),
            expires_at: None,
        }
    }

    /// Show `content` until `now_ms + ACTION_TTL_MS`, replacing any pending deadline.
    pub fn trigger(&mut self, content: Content, now_ms: u64) {
        self.content = content;
        self.expires_at = Some(now_ms.saturating_add(ACTION_TTL_MS));
    }

    /// True when a deadline is armed and `now_ms` has reached it.
    pub fn revert_due(&self, now_ms: u64) -> bool {
        self.expires_at.is_some_and(|deadline| now_ms >= deadline)
    }

    /// Drop the deadline and go back to the idle frame.
    pub fn revert(&mut self, muted: bool) {
        self.content = Content::idle(muted);
        self.expires_at = None;
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    pub fn is_idle(&self) -> bool {
        self.expires_at.is_none()
    }
}

fn line(text: &str) -> Line {
    let mut out = Line::new();
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Filled cells for `level`: `round(level / 100 * cells)`.
pub fn volume_bar_filled(level: u8) -> usize {
    let level = usize::from(level.min(VOLUME_MAX));
    let max = usize::from(VOLUME_MAX);
    (level * VOLUME_BAR_CELLS + max / 2) / max
}

/// `[####----]` style bar, `VOLUME_BAR_CELLS` wide inside the brackets.
pub fn volume_bar(level: u8) -> Line {
    let filled = volume_bar_filled(level);
    let mut bar = Line::new();
    let _ = bar.push('[');
    for cell in 0..VOLUME_BAR_CELLS {
        let _ = bar.push(if cell < filled { '#' } else { '-' });
    }
    let _ = bar.push(']');
    bar
}

/// Title line for a volume change, e.g. `Volume ^ 53%`.
pub fn volume_title(increased: bool, level: u8) -> Line {
    let direction = if increased { '^' } else { 'v' };
    let mut title = Line::new();
    let _ = write!(title, "Volume {} {}%", direction, level);
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_frame_text() {
        let idle = Content::idle(false);
        assert_eq!(idle.top.as_str(), "Media Control");
        assert_eq!(idle.bottom.as_str(), "Ready");
        assert_eq!(idle.color, COLOR_IDLE);

        assert_eq!(Content::idle(true).bottom.as_str(), "Ready [MUTED]");
    }

    #[test]
    fn trigger_arms_deadline_and_revert_clears_it() {
        let mut feedback = Feedback::idle(false);
        assert!(feedback.is_idle());
        assert!(!feedback.revert_due(u64::MAX));

        feedback.trigger(Content::new(Rgbw::new(1, 2, 3, 4), "A", "B"), 1_000);
        assert_eq!(feedback.expires_at(), Some(2_500));
        assert!(!feedback.revert_due(2_499));
        assert!(feedback.revert_due(2_500));

        feedback.revert(true);
        assert!(feedback.is_idle());
        assert_eq!(feedback.content(), &Content::idle(true));
    }

    #[test]
    fn retrigger_replaces_deadline() {
        let mut feedback = Feedback::idle(false);
        feedback.trigger(Content::idle(false), 0);
        feedback.trigger(Content::idle(false), 1_000);
        assert!(!feedback.revert_due(1_500));
        assert!(feedback.revert_due(2_500));
    }

    #[test]
    fn bar_rounding() {
        assert_eq!(volume_bar_filled(0), 0);
        assert_eq!(volume_bar_filled(3), 0);
        assert_eq!(volume_bar_filled(4), 1);
        assert_eq!(volume_bar_filled(50), 8);
        assert_eq!(volume_bar_filled(53), 8);
        assert_eq!(volume_bar_filled(97), 16);
        assert_eq!(volume_bar_filled(100), 16);
    }

    #[test]
    fn bar_text() {
        assert_eq!(volume_bar(53).as_str(), "[########--------]");
        assert_eq!(volume_bar(0).as_str(), "[----------------]");
        assert_eq!(volume_bar(100).as_str(), "[################]");
    }

    #[test]
    fn title_text() {
        assert_eq!(volume_title(true, 53).as_str(), "Volume ^ 53%");
        assert_eq!(volume_title(false, 0).as_str(), "Volume v 0%");
    }

    #[test]
    fn long_text_is_truncated_to_display_width() {
        let content = Content::new(COLOR_IDLE, "0123456789012345678901234", "");
        assert_eq!(content.top.len(), DISPLAY_COLUMNS);
    }
}
