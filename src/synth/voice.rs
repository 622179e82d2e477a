//! Voice: a cue being rendered
//!
//! Each queued cue becomes one voice holding whatever per-sample state its
//! generator needs. Voices are silent before their start time, apply their
//! ramps relative to it, and report themselves finished once the duration
//! has elapsed; the mixer drops them from there.

use super::cue::{Cue, Generator};
use super::{Filter, NoiseSource, Oscillator, Ramp};

enum Signal {
    Osc { osc: Oscillator, freq: Ramp },
    Noise {
        noise: NoiseSource,
        filter: Option<(Filter, Ramp)>,
    },
}

/// Sample-domain realization of one [`Cue`].
pub struct Voice {
    start: f64,
    duration: f64,
    gain: Ramp,
    signal: Signal,
}

impl Voice {
    pub fn new(cue: Cue, sample_rate: f64, noise_seed: u64) -> Self {
        let signal = match cue.generator {
            Generator::Osc { waveform, freq } => Signal::Osc {
                osc: Oscillator::new(waveform, freq.from, sample_rate),
                freq,
            },
            Generator::Noise { filter } => Signal::Noise {
                noise: NoiseSource::new(noise_seed),
                filter: filter.map(|spec| {
                    (
                        Filter::new(spec.mode, spec.cutoff.from, sample_rate),
                        spec.cutoff,
                    )
                }),
            },
        };
        Self {
            start: cue.start,
            duration: cue.duration,
            gain: cue.gain,
            signal,
        }
    }

    /// True once the voice has played out at clock time `now`.
    pub fn is_finished(&self, now: f64) -> bool {
        now - self.start >= self.duration
    }

    /// Render the sample at clock time `now`. Zero outside the active span.
    pub fn render(&mut self, now: f64) -> f64 {
        let t = now - self.start;
        if t < 0.0 || t >= self.duration {
            return 0.0;
        }
        let raw = match &mut self.signal {
            Signal::Osc { osc, freq } => {
                osc.set_frequency(freq.value_at(t));
                osc.tick()
            }
            Signal::Noise { noise, filter } => {
                let sample = noise.tick();
                match filter {
                    Some((filter, cutoff)) => {
                        filter.set_cutoff(cutoff.value_at(t));
                        filter.process(sample)
                    }
                    None => sample,
                }
            }
        };
        raw * self.gain.value_at(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::Waveform;

    const RATE: f64 = 44100.0;

    fn render_span(voice: &mut Voice, from: f64, samples: usize) -> Vec<f64> {
        (0..samples)
            .map(|i| voice.render(from + i as f64 / RATE))
            .collect()
    }

    #[test]
    fn test_silent_before_start() {
        let mut voice = Voice::new(Cue::kick(1.0, 0.3, 60.0), RATE, 7);
        let early = render_span(&mut voice, 0.0, 100);
        assert!(early.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_audible_during_span() {
        let mut voice = Voice::new(Cue::kick(0.0, 0.3, 60.0), RATE, 7);
        let body = render_span(&mut voice, 0.0, 2000);
        let peak = body.iter().fold(0.0f64, |a, &b| a.max(b.abs()));
        assert!(peak > 0.0, "kick should produce signal");
        assert!(peak <= 0.3 + 1e-9, "gain ramp bounds the peak");
    }

    #[test]
    fn test_finished_after_duration() {
        let voice = Voice::new(Cue::hi_hat(0.0, 0.05), RATE, 7);
        assert!(!voice.is_finished(0.049));
        assert!(voice.is_finished(0.05));
        assert!(voice.is_finished(1.0));
    }

    #[test]
    fn test_zero_after_end() {
        let mut voice = Voice::new(Cue::snare(0.0, 0.2), RATE, 7);
        assert_eq!(voice.render(0.11), 0.0);
    }

    #[test]
    fn test_noise_voice_produces_signal() {
        let mut voice = Voice::new(Cue::gunshot(0.0), RATE, 99);
        let body = render_span(&mut voice, 0.0, 2000);
        assert!(body.iter().any(|&s| s.abs() > 0.0));
    }

    #[test]
    fn test_bass_fades_out() {
        let mut voice = Voice::new(Cue::bass(0.0, 0.1, 55.0, 0.15, Waveform::Saw), RATE, 7);
        let early: f64 = render_span(&mut voice, 0.0, 441)
            .iter()
            .map(|s| s.abs())
            .sum();
        let late: f64 = render_span(&mut voice, 0.13, 441)
            .iter()
            .map(|s| s.abs())
            .sum();
        assert!(late < early, "linear fade should shrink the tail");
    }
}
