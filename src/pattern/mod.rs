//! Moods and their bar patterns
//!
//! A mood is a tempo plus a fixed 16-step drum/bass map, bound to a group of
//! host-application screens. Pattern functions are pure: given a step and an
//! absolute time they emit cues into a sink and keep no clock of their own.

use std::fmt;

use crate::synth::{AudioSink, Cue, CueBuffer, Waveform};

/// Steps per bar: one bar of 4/4 at sixteenth-note resolution.
pub const STEPS_PER_BAR: usize = 16;

/// Ascending arpeggio cycled through on every fourth step of the victory
/// pattern (C4, E4, G4, C5).
const ARPEGGIO_HZ: [f64; 4] = [261.63, 329.63, 392.00, 523.25];

/// Host-application screens that drive mood selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    Login,
    Instructions,
    CharSelect,
    Map,
    Gameplay,
    Result,
}

impl Screen {
    /// Fixed screen-to-mood table.
    pub fn mood(self) -> Mood {
        match self {
            Screen::Title | Screen::Login => Mood::Suspense,
            Screen::Instructions | Screen::CharSelect | Screen::Map => Mood::Lobby,
            Screen::Gameplay => Mood::Battle,
            Screen::Result => Mood::Victory,
        }
    }
}

/// Background-music behavior profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Suspense,
    Lobby,
    Battle,
    Victory,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Suspense, Mood::Lobby, Mood::Battle, Mood::Victory];

    /// Fixed tempo for this mood.
    pub fn tempo_bpm(self) -> f64 {
        match self {
            Mood::Suspense => 60.0,
            Mood::Lobby => 105.0,
            Mood::Battle => 128.0,
            Mood::Victory => 90.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mood::Suspense => "suspense",
            Mood::Lobby => "lobby",
            Mood::Battle => "battle",
            Mood::Victory => "victory",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Emit every cue `mood` calls for at `step` of the bar, scheduled at `time`.
pub fn schedule_step(mood: Mood, step: usize, time: f64, out: &mut dyn AudioSink) {
    debug_assert!(step < STEPS_PER_BAR);
    match mood {
        Mood::Suspense => suspense(step, time, out),
        Mood::Lobby => lobby(step, time, out),
        Mood::Battle => battle(step, time, out),
        Mood::Victory => victory(step, time, out),
    }
}

/// Sparse heartbeat: kick on 0 and 3, sub-bass pulse on the downbeat.
fn suspense(step: usize, time: f64, out: &mut dyn AudioSink) {
    if step == 0 || step == 3 {
        out.play(Cue::kick(time, 0.3, 60.0));
    }
    if step == 0 {
        out.play(Cue::bass(time, 0.1, 40.0, 0.5, Waveform::Sine));
    }
}

/// Easygoing shuffle with a bright accent at the end of the bar.
fn lobby(step: usize, time: f64, out: &mut dyn AudioSink) {
    if step == 0 || step == 10 {
        out.play(Cue::kick(time, 0.4, 100.0));
    }
    if step == 4 || step == 12 {
        out.play(Cue::snare(time, 0.15));
    }
    if step % 2 == 0 {
        out.play(Cue::hi_hat(time, 0.05));
    }
    if step == 14 {
        out.play(Cue::tone(time, 880.0, Waveform::Sine, 0.05, 0.1));
    }
}

/// Driving four-on-the-floor with a sawtooth bass line on every step,
/// shifting up a half-bar in.
fn battle(step: usize, time: f64, out: &mut dyn AudioSink) {
    if step % 4 == 0 {
        out.play(Cue::kick(time, 0.5, 120.0));
    }
    if step % 4 == 2 {
        out.play(Cue::hi_hat(time, 0.1));
    }
    let bass_hz = if step < 8 { 55.0 } else { 65.0 };
    out.play(Cue::bass(time, 0.08, bass_hz, 0.15, Waveform::Saw));
    if step == 4 || step == 12 {
        out.play(Cue::snare(time, 0.2));
    }
}

/// Triumphant arpeggio over a light beat.
fn victory(step: usize, time: f64, out: &mut dyn AudioSink) {
    if step == 0 {
        out.play(Cue::kick(time, 0.3, 80.0));
    }
    if step == 8 {
        out.play(Cue::snare(time, 0.1));
    }
    if step % 4 == 0 {
        let note = ARPEGGIO_HZ[(step / 4) % ARPEGGIO_HZ.len()];
        out.play(Cue::tone(time, note, Waveform::Triangle, 0.1, 0.4));
    }
}

/// Collect the cues one full bar of `mood` schedules, tagged by step.
/// Every step is scheduled at time zero, so the result describes the bar's
/// shape rather than a particular performance.
pub fn bar_cues(mood: Mood) -> Vec<(usize, Cue)> {
    let mut out = Vec::new();
    for step in 0..STEPS_PER_BAR {
        let mut buf = CueBuffer::new();
        schedule_step(mood, step, 0.0, &mut buf);
        out.extend(buf.cues.into_iter().map(|cue| (step, cue)));
    }
    out
}
