//! Integration tests for the mediaboard control loop.
//!
//! Drives `ControlLoop` the way the firmware does - one iteration every
//! 8 ms - with fake key pins and recording output sinks.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embassy_futures::block_on;
use embedded_hal::digital::{ErrorType, InputPin};
use mediaboard::config::{ACTION_TTL_MS, COLOR_IDLE, COLOR_VOLUME, POLL_INTERVAL_MS};
use mediaboard::feedback::led::{LedSink, Rgbw};
use mediaboard::feedback::DisplaySink;
use mediaboard::hid::{Command, HidSink};
use mediaboard::input::ButtonPins;
use mediaboard::{Action, ControlLoop, Controller, Error};

// ═══════════════════════════════════════════════════════════════════════════
// Fakes
// ═══════════════════════════════════════════════════════════════════════════

/// Active-low key: `true` in the cell means the key is held down.
#[derive(Clone, Default)]
struct FakePin(Rc<Cell<bool>>);

impl FakePin {
    fn set_pressed(&self, pressed: bool) {
        self.0.set(pressed);
    }
}

impl ErrorType for FakePin {
    type Error = Infallible;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }
}

#[derive(Debug)]
struct BrokenPinError;

impl embedded_hal::digital::Error for BrokenPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

struct BrokenPin;

impl ErrorType for BrokenPin {
    type Error = BrokenPinError;
}

impl InputPin for BrokenPin {
    fn is_high(&mut self) -> Result<bool, BrokenPinError> {
        Err(BrokenPinError)
    }

    fn is_low(&mut self) -> Result<bool, BrokenPinError> {
        Err(BrokenPinError)
    }
}

/// Records accepted commands; rejects everything while `offline` is set.
#[derive(Default)]
struct RecordingHid {
    sent: Vec<Command>,
    offline: Rc<Cell<bool>>,
}

impl HidSink for RecordingHid {
    async fn send(&mut self, command: Command) -> Result<(), Error> {
        if self.offline.get() {
            return Err(Error::Usb);
        }
        self.sent.push(command);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingLeds {
    staged: Rgbw,
    shown: Vec<Rgbw>,
}

impl LedSink for RecordingLeds {
    fn fill(&mut self, color: Rgbw) {
        self.staged = color;
    }

    async fn present(&mut self) -> Result<(), Error> {
        self.shown.push(self.staged);
        Ok(())
    }
}

#[derive(Default)]
struct RecordingDisplay(Vec<(String, String)>);

impl DisplaySink for RecordingDisplay {
    fn show(&mut self, top: &str, bottom: &str) -> Result<(), Error> {
        self.0.push((top.to_string(), bottom.to_string()));
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Rig
// ═══════════════════════════════════════════════════════════════════════════

struct Keys {
    previous_track: FakePin,
    next_track: FakePin,
    play_pause: FakePin,
    mute: FakePin,
}

struct Rig {
    keys: Keys,
    host_offline: Rc<Cell<bool>>,
    control: ControlLoop<FakePin, RecordingHid, RecordingLeds, RecordingDisplay>,
    now: u64,
    position: i32,
}

impl Rig {
    fn new() -> Self {
        let pins = ButtonPins {
            previous_track: FakePin::default(),
            next_track: FakePin::default(),
            play_pause: FakePin::default(),
            scroll_right: FakePin::default(),
            scroll_left: FakePin::default(),
            mute: FakePin::default(),
        };
        let keys = Keys {
            previous_track: pins.previous_track.clone(),
            next_track: pins.next_track.clone(),
            play_pause: pins.play_pause.clone(),
            mute: pins.mute.clone(),
        };
        let hid = RecordingHid::default();
        let host_offline = hid.offline.clone();
        let controller = Controller::new(
            hid,
            RecordingLeds::default(),
            RecordingDisplay::default(),
        );
        let mut control = ControlLoop::new(pins, 0, controller).expect("fake pins never fail");
        block_on(control.start()).unwrap();

        Self {
            keys,
            host_offline,
            control,
            now: 0,
            position: 0,
        }
    }

    /// One loop iteration, then advance the clock by the poll interval.
    fn step(&mut self) -> Option<Action> {
        self.try_step().unwrap()
    }

    /// Like [`Rig::step`], but hands back the iteration's error.
    fn try_step(&mut self) -> Result<Option<Action>, Error> {
        let result = block_on(self.control.iterate(self.position, self.now));
        self.now += POLL_INTERVAL_MS;
        result
    }

    /// Run iterations for `ms` and collect every action fired.
    fn run_for(&mut self, ms: u64) -> Vec<Action> {
        let until = self.now + ms;
        let mut actions = Vec::new();
        while self.now < until {
            actions.extend(self.step());
        }
        actions
    }

    fn sent(&self) -> &[Command] {
        &self.control.controller().hid().sent
    }

    fn last_display(&self) -> (&str, &str) {
        let (top, bottom) = self
            .control
            .controller()
            .display()
            .0
            .last()
            .expect("something was drawn");
        (top.as_str(), bottom.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn starts_idle() {
    let rig = Rig::new();
    let controller = rig.control.controller();
    assert_eq!(controller.volume(), 50);
    assert!(!controller.is_muted());
    assert!(controller.feedback().is_idle());
    assert_eq!(rig.last_display(), ("Media Control", "Ready"));
    assert_eq!(controller.leds().shown, [COLOR_IDLE]);
}

#[test]
fn held_press_fires_once() {
    let mut rig = Rig::new();
    rig.keys.play_pause.set_pressed(true);
    let actions = rig.run_for(500);

    assert_eq!(actions, [Action::PlayPause]);
    assert_eq!(rig.sent(), [Command::PlayPause]);
}

#[test]
fn press_release_press_fires_twice() {
    let mut rig = Rig::new();
    rig.keys.previous_track.set_pressed(true);
    let mut actions = rig.run_for(50);
    rig.keys.previous_track.set_pressed(false);
    actions.extend(rig.run_for(50));
    rig.keys.previous_track.set_pressed(true);
    actions.extend(rig.run_for(50));

    assert_eq!(actions, [Action::PreviousTrack, Action::PreviousTrack]);
}

#[test]
fn contact_bounce_is_absorbed() {
    let mut rig = Rig::new();
    // Toggle every poll: no level lasts long enough to be accepted.
    for i in 0..20 {
        rig.keys.next_track.set_pressed(i % 2 == 0);
        assert_eq!(rig.step(), None);
    }
    assert!(rig.sent().is_empty());
}

#[test]
fn simultaneous_next_and_mute_only_fires_next() {
    let mut rig = Rig::new();
    rig.keys.next_track.set_pressed(true);
    rig.keys.mute.set_pressed(true);
    let actions = rig.run_for(500);

    assert_eq!(actions, [Action::NextTrack]);
    assert_eq!(rig.sent(), [Command::NextTrack]);
    assert!(!rig.control.controller().is_muted());
}

#[test]
fn encoder_plus_three() {
    let mut rig = Rig::new();
    rig.position = 3;
    assert_eq!(rig.step(), Some(Action::Volume(3)));

    assert_eq!(rig.control.controller().volume(), 53);
    assert_eq!(rig.sent(), [Command::VolumeIncrement; 3]);
    assert_eq!(rig.last_display(), ("Volume ^ 53%", "[########--------]"));
    assert_eq!(
        rig.control.controller().leds().shown.last(),
        Some(&COLOR_VOLUME)
    );

    // Position unchanged: no further commands.
    assert_eq!(rig.step(), None);
    assert_eq!(rig.sent().len(), 3);
}

#[test]
fn encoder_steps_across_polls_accumulate() {
    let mut rig = Rig::new();
    for target in [-2, -5, -4] {
        rig.position = target;
        rig.step();
    }
    // -2, then -3, then +1
    assert_eq!(rig.control.controller().volume(), 46);
    let up = rig
        .sent()
        .iter()
        .filter(|&&c| c == Command::VolumeIncrement)
        .count();
    let down = rig
        .sent()
        .iter()
        .filter(|&&c| c == Command::VolumeDecrement)
        .count();
    assert_eq!((up, down), (1, 5));
}

#[test]
fn key_beats_encoder_and_detents_are_dropped() {
    let mut rig = Rig::new();
    rig.keys.play_pause.set_pressed(true);
    // Let the key reach the confirming poll with no encoder movement.
    assert_eq!(rig.step(), None);
    assert_eq!(rig.step(), None);
    rig.position = 2;
    assert_eq!(rig.step(), Some(Action::PlayPause));

    // The two detents from the conflicting poll are not replayed.
    assert!(rig.run_for(100).is_empty());
    assert_eq!(rig.control.controller().volume(), 50);
    assert_eq!(rig.sent(), [Command::PlayPause]);
}

#[test]
fn feedback_reverts_after_ttl_within_one_poll() {
    let mut rig = Rig::new();
    rig.keys.mute.set_pressed(true);

    let mut fired_at = None;
    while fired_at.is_none() {
        let now = rig.now;
        if rig.step().is_some() {
            fired_at = Some(now);
        }
    }
    let fired_at = fired_at.unwrap();
    assert_eq!(rig.last_display(), ("Audio", "  Muted"));

    let mut reverted_at = None;
    while reverted_at.is_none() {
        let now = rig.now;
        rig.step();
        if rig.control.controller().feedback().is_idle() {
            reverted_at = Some(now);
        }
    }
    let reverted_at = reverted_at.unwrap();

    assert!(reverted_at >= fired_at + ACTION_TTL_MS);
    assert!(reverted_at < fired_at + ACTION_TTL_MS + POLL_INTERVAL_MS);
    assert_eq!(rig.last_display(), ("Media Control", "Ready [MUTED]"));
    assert_eq!(
        rig.control.controller().leds().shown.last(),
        Some(&COLOR_IDLE)
    );
}

#[test]
fn new_action_extends_feedback() {
    let mut rig = Rig::new();
    rig.position = 1;
    rig.step();
    let first_deadline = rig.control.controller().feedback().expires_at().unwrap();

    rig.run_for(1_000);
    rig.position = 2;
    rig.step();
    let second_deadline = rig.control.controller().feedback().expires_at().unwrap();

    assert!(second_deadline > first_deadline);
    assert_eq!(rig.control.controller().volume(), 52);
}

#[test]
fn mute_round_trip_keeps_volume() {
    let mut rig = Rig::new();
    rig.position = -8;
    rig.step();
    assert_eq!(rig.control.controller().volume(), 42);

    for _ in 0..2 {
        rig.keys.mute.set_pressed(true);
        rig.run_for(50);
        rig.keys.mute.set_pressed(false);
        rig.run_for(50);
    }

    assert!(!rig.control.controller().is_muted());
    assert_eq!(rig.control.controller().volume(), 42);
    assert_eq!(
        rig.sent()
            .iter()
            .filter(|&&c| c == Command::Mute)
            .count(),
        2
    );
}

#[test]
fn unreadable_key_is_fatal_at_construction() {
    let pins = ButtonPins {
        previous_track: BrokenPin,
        next_track: BrokenPin,
        play_pause: BrokenPin,
        scroll_right: BrokenPin,
        scroll_left: BrokenPin,
        mute: BrokenPin,
    };
    let controller = Controller::new(
        RecordingHid::default(),
        RecordingLeds::default(),
        RecordingDisplay::default(),
    );
    assert!(matches!(
        ControlLoop::new(pins, 0, controller),
        Err(Error::Gpio)
    ));
}

#[test]
fn feedback_reverts_while_host_rejects_commands() {
    let mut rig = Rig::new();
    rig.position = 1;
    assert_eq!(rig.step(), Some(Action::Volume(1)));
    let deadline = rig.control.controller().feedback().expires_at().unwrap();

    // Keep turning the knob with the host gone: every iteration fails.
    rig.host_offline.set(true);
    while rig.now < deadline {
        rig.position += 1;
        assert_eq!(rig.try_step(), Err(Error::Usb));
        assert!(!rig.control.controller().feedback().is_idle());
    }

    rig.position += 1;
    assert_eq!(rig.try_step(), Err(Error::Usb));
    assert!(rig.control.controller().feedback().is_idle());
    assert_eq!(rig.last_display(), ("Media Control", "Ready"));
    assert_eq!(
        rig.control.controller().leds().shown.last(),
        Some(&COLOR_IDLE)
    );
    assert_eq!(rig.control.controller().volume(), 51);
    assert_eq!(rig.sent(), [Command::VolumeIncrement]);
}
