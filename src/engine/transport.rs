//! Transport: the lookahead scheduler's state machine
//!
//! Tracks bar position and the absolute time of the next step. Each drain
//! fills a short window ahead of the audio clock with pattern cues; the
//! audio side then handles exact timing, so wall-clock jitter in whoever
//! calls `drain` never reaches the output.

use crate::pattern::{self, Mood, STEPS_PER_BAR};
use crate::synth::AudioSink;

/// How far ahead of the clock each drain schedules, in seconds.
pub(crate) const SCHEDULE_AHEAD_SECS: f64 = 0.1;

/// Tempo before any mood has been selected.
pub(crate) const FALLBACK_TEMPO_BPM: f64 = 100.0;

/// Scheduling state: stopped or running, plus bar phase.
pub struct Transport {
    playing: bool,
    mood: Option<Mood>,
    tempo_bpm: f64,
    /// Absolute time of the next unscheduled step.
    next_note_time: f64,
    /// Position within the bar, `0..STEPS_PER_BAR`.
    step: usize,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            playing: false,
            mood: None,
            tempo_bpm: FALLBACK_TEMPO_BPM,
            next_note_time: 0.0,
            step: 0,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn tempo_bpm(&self) -> f64 {
        self.tempo_bpm
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn next_note_time(&self) -> f64 {
        self.next_note_time
    }

    /// Seconds per step (one sixteenth note) at the current tempo.
    pub fn step_secs(&self) -> f64 {
        0.25 * 60.0 / self.tempo_bpm
    }

    /// Point the transport at a mood. Bar phase resets only on a genuine
    /// mood change; restarting the same mood keeps the stale phase, which
    /// makes a resume audibly different from a fresh start.
    pub fn set_mood(&mut self, mood: Mood, now: f64) {
        if self.mood != Some(mood) {
            self.step = 0;
            self.next_note_time = now;
        }
        self.mood = Some(mood);
        self.tempo_bpm = mood.tempo_bpm();
    }

    pub fn start(&mut self) {
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Drain the lookahead window: schedule every step that falls before
    /// `now + SCHEDULE_AHEAD_SECS`, advancing bar position as we go.
    /// Steps emitted by one drain carry strictly increasing times.
    pub fn drain(&mut self, now: f64, out: &mut dyn AudioSink) {
        if !self.playing {
            return;
        }
        let Some(mood) = self.mood else {
            return;
        };
        while self.next_note_time < now + SCHEDULE_AHEAD_SECS {
            pattern::schedule_step(mood, self.step, self.next_note_time, out);
            self.next_note_time += self.step_secs();
            self.step = (self.step + 1) % STEPS_PER_BAR;
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{CueBuffer, Generator};

    /// Distinct step times seen by a sink, in emission order.
    fn step_times(buf: &CueBuffer) -> Vec<f64> {
        let mut times: Vec<f64> = buf.cues.iter().map(|c| c.start).collect();
        times.dedup();
        times
    }

    #[test]
    fn test_new_transport_is_stopped_at_fallback_tempo() {
        let t = Transport::new();
        assert!(!t.is_playing());
        assert_eq!(t.mood(), None);
        assert_eq!(t.tempo_bpm(), 100.0);
        assert_eq!(t.step(), 0);
    }

    #[test]
    fn test_drain_does_nothing_while_stopped() {
        let mut t = Transport::new();
        t.set_mood(Mood::Battle, 0.0);
        let mut buf = CueBuffer::new();
        t.drain(10.0, &mut buf);
        assert!(buf.cues.is_empty());
        assert_eq!(t.step(), 0);
    }

    #[test]
    fn test_step_deltas_are_one_sixteenth() {
        // Battle bass hits every step, so every step time shows up.
        // 15/128 s is exactly representable, so the deltas are exact.
        let mut t = Transport::new();
        t.set_mood(Mood::Battle, 0.0);
        t.start();
        let mut buf = CueBuffer::new();
        t.drain(2.0, &mut buf);
        let times = step_times(&buf);
        assert!(times.len() > 16);
        let delta = 0.25 * 60.0 / 128.0;
        for pair in times.windows(2) {
            assert!(pair[1] > pair[0], "step times must strictly increase");
            assert_eq!(pair[1] - pair[0], delta);
        }
    }

    #[test]
    fn test_lobby_deltas_at_105_bpm() {
        let mut t = Transport::new();
        t.set_mood(Mood::Lobby, 0.0);
        t.start();
        let mut buf = CueBuffer::new();
        t.drain(3.0, &mut buf);
        let times = step_times(&buf);
        let delta = 0.25 * 60.0 / 105.0;
        for pair in times.windows(2) {
            let gap = pair[1] - pair[0];
            // Lobby rests on odd steps, so gaps are one or two sixteenths.
            let steps = (gap / delta).round();
            assert!(steps == 1.0 || steps == 2.0);
            assert!((gap - steps * delta).abs() < 1e-9);
        }
    }

    #[test]
    fn test_bar_wraps_after_sixteen_steps() {
        // Suspense at 60 BPM: steps land every 0.25 s, kicks on 0 and 3.
        // Drain past one bar and check the kick pattern repeats at 4.0 s.
        let mut t = Transport::new();
        t.set_mood(Mood::Suspense, 0.0);
        t.start();
        let mut buf = CueBuffer::new();
        t.drain(4.0, &mut buf);
        let kicks: Vec<f64> = buf
            .cues
            .iter()
            .filter(|c| matches!(
                &c.generator,
                Generator::Osc { freq, .. } if freq.to == 0.01
            ))
            .map(|c| c.start)
            .collect();
        assert_eq!(kicks, vec![0.0, 0.75, 4.0]);
        assert_eq!(t.step(), 17 % 16);
    }

    #[test]
    fn test_drain_is_incremental() {
        // Two short drains cover the same ground as one long one.
        let mut t = Transport::new();
        t.set_mood(Mood::Battle, 0.0);
        t.start();
        let mut buf = CueBuffer::new();
        t.drain(0.5, &mut buf);
        let after_first = buf.cues.len();
        t.drain(0.5, &mut buf);
        assert_eq!(buf.cues.len(), after_first, "same window drains nothing new");
        t.drain(1.0, &mut buf);
        assert!(buf.cues.len() > after_first);
    }

    #[test]
    fn test_same_mood_restart_keeps_phase() {
        let mut t = Transport::new();
        t.set_mood(Mood::Battle, 0.0);
        t.start();
        let mut buf = CueBuffer::new();
        t.drain(0.5, &mut buf);
        let step = t.step();
        let next = t.next_note_time();
        assert!(step > 0);

        t.stop();
        t.set_mood(Mood::Battle, 9.0);
        assert_eq!(t.step(), step, "same-mood restart keeps bar phase");
        assert_eq!(t.next_note_time(), next);
    }

    #[test]
    fn test_mood_change_resets_phase() {
        let mut t = Transport::new();
        t.set_mood(Mood::Battle, 0.0);
        t.start();
        let mut buf = CueBuffer::new();
        t.drain(0.5, &mut buf);
        assert!(t.step() > 0);

        t.set_mood(Mood::Victory, 9.0);
        assert_eq!(t.step(), 0);
        assert_eq!(t.next_note_time(), 9.0);
        assert_eq!(t.tempo_bpm(), 90.0);
        assert!(t.is_playing(), "mood change does not stop playback");
    }

    #[test]
    fn test_battle_kick_offsets_at_128_bpm() {
        let mut t = Transport::new();
        t.set_mood(Mood::Battle, 0.0);
        t.start();
        let mut buf = CueBuffer::new();
        // One full bar: 16 steps of 15/128 s end at 1.875 s, so a window
        // reaching 1.8 s covers exactly steps 0 through 15.
        t.drain(1.7, &mut buf);
        let delta = 0.25 * 60.0 / 128.0;
        let kicks: Vec<f64> = buf
            .cues
            .iter()
            .filter(|c| matches!(
                &c.generator,
                Generator::Osc { freq, .. } if freq.to == 0.01
            ))
            .map(|c| c.start)
            .collect();
        assert_eq!(kicks, vec![0.0, 4.0 * delta, 8.0 * delta, 12.0 * delta]);
    }

    #[test]
    fn test_suspense_first_tick_cues() {
        // Selecting suspense while stopped, then draining once, schedules
        // the downbeat kick and sub-bass right at the clock position.
        let mut t = Transport::new();
        t.set_mood(Mood::Suspense, 5.0);
        assert_eq!(t.tempo_bpm(), 60.0);
        t.start();
        let mut buf = CueBuffer::new();
        t.drain(5.0, &mut buf);
        assert_eq!(buf.cues.len(), 2);
        assert_eq!(buf.cues[0].start, 5.0);
        match &buf.cues[0].generator {
            Generator::Osc { freq, .. } => assert_eq!(freq.from, 60.0),
            _ => panic!("first cue should be the kick"),
        }
        assert_eq!(buf.cues[0].gain.from, 0.3);
        assert_eq!(buf.cues[1].gain.from, 0.1);
        match &buf.cues[1].generator {
            Generator::Osc { freq, .. } => assert_eq!(freq.from, 40.0),
            _ => panic!("second cue should be the sub-bass"),
        }
    }
}
