//! Priority selection between the inputs that changed in one poll.
//!
//! At most one action runs per poll. Candidates are checked in a fixed
//! order and the first one wins; the rest are dropped, not queued.

/// Press edges and encoder movement observed in one poll.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edges {
    pub previous_track: bool,
    pub next_track: bool,
    pub play_pause: bool,
    pub scroll_right: bool,
    pub scroll_left: bool,
    pub mute: bool,
    /// Detents since the previous poll; positive is clockwise.
    pub encoder_delta: i32,
}

/// The single thing a poll may do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    PreviousTrack,
    NextTrack,
    PlayPause,
    ScrollRight,
    ScrollLeft,
    ToggleMute,
    /// Signed detent count.
    Volume(i32),
}

impl Edges {
    /// Candidate actions, highest priority first.
    pub fn candidates(&self) -> [Option<Action>; 7] {
        [
            self.previous_track.then_some(Action::PreviousTrack),
            self.next_track.then_some(Action::NextTrack),
            self.play_pause.then_some(Action::PlayPause),
            self.scroll_right.then_some(Action::ScrollRight),
            self.scroll_left.then_some(Action::ScrollLeft),
            self.mute.then_some(Action::ToggleMute),
            (self.encoder_delta != 0).then_some(Action::Volume(self.encoder_delta)),
        ]
    }

    /// The winning action for this poll, if anything happened.
    pub fn select(&self) -> Option<Action> {
        self.candidates().into_iter().flatten().next()
    }
}
