//! Cue descriptions
//!
//! A cue is one fully-described sound event: what generates the signal, the
//! gain trajectory, an absolute start time on the audio clock, and a duration
//! after which the voice retires itself. Times are audio-clock seconds, never
//! wall clock, so playback lands sample-accurately no matter when the call
//! that built the cue actually ran.

use super::{FilterMode, Ramp, Waveform};

/// The five pitches of the victory fanfare (C5 pentatonic run).
const FANFARE_HZ: [f64; 5] = [523.25, 659.25, 783.99, 1046.50, 1318.51];

/// Signal source for a cue.
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    /// Periodic oscillator with a frequency trajectory.
    Osc { waveform: Waveform, freq: Ramp },
    /// Fresh white noise, optionally shaped by a filter.
    Noise { filter: Option<FilterSpec> },
}

/// Filter applied to a noise generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    pub mode: FilterMode,
    pub cutoff: Ramp,
}

/// One sound event.
#[derive(Debug, Clone, PartialEq)]
pub struct Cue {
    pub generator: Generator,
    pub gain: Ramp,
    /// Absolute start time in audio-clock seconds.
    pub start: f64,
    pub duration: f64,
}

impl Cue {
    /// When this cue's voice retires.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// UI click: a falling sawtooth chirp.
    pub fn click(start: f64) -> Self {
        Self {
            generator: Generator::Osc {
                waveform: Waveform::Saw,
                freq: Ramp::exponential(3000.0, 1000.0, 0.05),
            },
            gain: Ramp::exponential(0.05, 0.001, 0.05),
            start,
            duration: 0.05,
        }
    }

    /// Keystroke blip for text entry.
    pub fn keystroke(start: f64) -> Self {
        Self {
            generator: Generator::Osc {
                waveform: Waveform::Square,
                freq: Ramp::constant(800.0),
            },
            gain: Ramp::exponential(0.02, 0.001, 0.03),
            start,
            duration: 0.03,
        }
    }

    /// Gunshot: noise burst through a closing low-pass filter.
    pub fn gunshot(start: f64) -> Self {
        Self {
            generator: Generator::Noise {
                filter: Some(FilterSpec {
                    mode: FilterMode::LowPass,
                    cutoff: Ramp::exponential(1200.0, 100.0, 0.2),
                }),
            },
            gain: Ramp::exponential(0.4, 0.001, 0.25),
            start,
            duration: 0.25,
        }
    }

    /// Victory fanfare: five square-wave notes staggered 80 ms apart.
    pub fn victory_chord(start: f64) -> [Self; 5] {
        let mut i = 0;
        FANFARE_HZ.map(|hz| {
            let note = Self {
                generator: Generator::Osc {
                    waveform: Waveform::Square,
                    freq: Ramp::constant(hz),
                },
                gain: Ramp::exponential(0.05, 0.001, 0.3),
                start: start + i as f64 * 0.08,
                duration: 0.3,
            };
            i += 1;
            note
        })
    }

    /// Kick drum: a pitch sweep from `freq` down to near-DC.
    pub fn kick(start: f64, volume: f64, freq: f64) -> Self {
        Self {
            generator: Generator::Osc {
                waveform: Waveform::Sine,
                freq: Ramp::exponential(freq, 0.01, 0.5),
            },
            gain: Ramp::exponential(volume, 0.001, 0.5),
            start,
            duration: 0.5,
        }
    }

    /// Snare: high-passed noise snap.
    pub fn snare(start: f64, volume: f64) -> Self {
        Self {
            generator: Generator::Noise {
                filter: Some(FilterSpec {
                    mode: FilterMode::HighPass,
                    cutoff: Ramp::constant(1500.0),
                }),
            },
            gain: Ramp::exponential(volume, 0.001, 0.1),
            start,
            duration: 0.1,
        }
    }

    /// Hi-hat: a shorter, brighter noise tick.
    pub fn hi_hat(start: f64, volume: f64) -> Self {
        Self {
            generator: Generator::Noise {
                filter: Some(FilterSpec {
                    mode: FilterMode::HighPass,
                    cutoff: Ramp::constant(6000.0),
                }),
            },
            gain: Ramp::exponential(volume, 0.001, 0.05),
            start,
            duration: 0.05,
        }
    }

    /// Bass note: steady pitch with a linear fade to silence.
    pub fn bass(start: f64, volume: f64, freq: f64, duration: f64, waveform: Waveform) -> Self {
        Self {
            generator: Generator::Osc {
                waveform,
                freq: Ramp::constant(freq),
            },
            gain: Ramp::linear(volume, 0.0, duration),
            start,
            duration,
        }
    }

    /// Generic melodic tone with an exponential fade.
    pub fn tone(start: f64, freq: f64, waveform: Waveform, volume: f64, duration: f64) -> Self {
        Self {
            generator: Generator::Osc {
                waveform,
                freq: Ramp::constant(freq),
            },
            gain: Ramp::exponential(volume, 0.001, duration),
            start,
            duration,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::Curve;

    #[test]
    fn test_click_shape() {
        let cue = Cue::click(1.5);
        assert_eq!(cue.start, 1.5);
        assert_eq!(cue.duration, 0.05);
        assert_eq!(cue.end(), 1.55);
        match cue.generator {
            Generator::Osc { waveform, freq } => {
                assert_eq!(waveform, Waveform::Saw);
                assert_eq!(freq, Ramp::exponential(3000.0, 1000.0, 0.05));
            }
            _ => panic!("click should be an oscillator cue"),
        }
        assert_eq!(cue.gain, Ramp::exponential(0.05, 0.001, 0.05));
    }

    #[test]
    fn test_keystroke_is_fixed_square() {
        let cue = Cue::keystroke(0.0);
        match cue.generator {
            Generator::Osc { waveform, freq } => {
                assert_eq!(waveform, Waveform::Square);
                assert_eq!(freq, Ramp::constant(800.0));
            }
            _ => panic!("keystroke should be an oscillator cue"),
        }
        assert_eq!(cue.duration, 0.03);
    }

    #[test]
    fn test_gunshot_filter_sweep() {
        let cue = Cue::gunshot(2.0);
        match cue.generator {
            Generator::Noise { filter: Some(spec) } => {
                assert_eq!(spec.mode, FilterMode::LowPass);
                assert_eq!(spec.cutoff, Ramp::exponential(1200.0, 100.0, 0.2));
            }
            _ => panic!("gunshot should be filtered noise"),
        }
        assert_eq!(cue.gain.from, 0.4);
        assert_eq!(cue.duration, 0.25);
    }

    #[test]
    fn test_victory_chord_stagger() {
        let cues = Cue::victory_chord(1.0);
        assert_eq!(cues.len(), 5);
        for (i, cue) in cues.iter().enumerate() {
            assert!((cue.start - (1.0 + i as f64 * 0.08)).abs() < 1e-12);
            assert_eq!(cue.duration, 0.3);
        }
        let freqs: Vec<f64> = cues
            .iter()
            .map(|c| match &c.generator {
                Generator::Osc { freq, .. } => freq.from,
                _ => panic!("fanfare notes are oscillators"),
            })
            .collect();
        assert_eq!(freqs, vec![523.25, 659.25, 783.99, 1046.50, 1318.51]);
    }

    #[test]
    fn test_kick_sweeps_to_near_dc() {
        let cue = Cue::kick(0.0, 0.3, 60.0);
        match cue.generator {
            Generator::Osc { freq, .. } => {
                assert_eq!(freq.from, 60.0);
                assert_eq!(freq.to, 0.01);
                assert_eq!(freq.curve, Curve::Exponential);
            }
            _ => panic!("kick should be an oscillator cue"),
        }
        assert_eq!(cue.gain.from, 0.3);
        assert_eq!(cue.duration, 0.5);
    }

    #[test]
    fn test_snare_and_hi_hat_cutoffs() {
        let snare = Cue::snare(0.0, 0.15);
        let hat = Cue::hi_hat(0.0, 0.05);
        match (snare.generator, hat.generator) {
            (
                Generator::Noise { filter: Some(s) },
                Generator::Noise { filter: Some(h) },
            ) => {
                assert_eq!(s.mode, FilterMode::HighPass);
                assert_eq!(s.cutoff.from, 1500.0);
                assert_eq!(h.mode, FilterMode::HighPass);
                assert_eq!(h.cutoff.from, 6000.0);
            }
            _ => panic!("drums should be filtered noise"),
        }
        assert_eq!(snare.duration, 0.1);
        assert_eq!(hat.duration, 0.05);
    }

    #[test]
    fn test_bass_fades_linearly_to_zero() {
        let cue = Cue::bass(0.5, 0.08, 55.0, 0.15, Waveform::Saw);
        assert_eq!(cue.gain, Ramp::linear(0.08, 0.0, 0.15));
        assert_eq!(cue.duration, 0.15);
    }

    #[test]
    fn test_tone_defaults() {
        let cue = Cue::tone(0.0, 880.0, Waveform::Sine, 0.05, 0.1);
        assert_eq!(cue.gain, Ramp::exponential(0.05, 0.001, 0.1));
        assert_eq!(cue.duration, 0.1);
    }
}
