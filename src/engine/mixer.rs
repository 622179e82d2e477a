//! Mixer: the audio clock and voice pool
//!
//! Cues become voices here, and the mixer sums whichever are live into each
//! output sample. Its clock is frames-rendered divided by sample rate, so a
//! cue's start time is honored to the sample no matter when it was queued.

use crate::synth::{AudioSink, Cue, Voice};

/// Mixes scheduled voices into a mono sample stream.
pub struct Mixer {
    sample_rate: f64,
    frames: u64,
    volume: f32,
    voices: Vec<Voice>,
    /// Seed stream for per-voice noise sources.
    seed: u64,
}

impl Mixer {
    pub fn new(sample_rate: u32, volume: f32) -> Self {
        Self {
            sample_rate: sample_rate as f64,
            frames: 0,
            volume,
            voices: Vec::new(),
            seed: 0x4d595df4d0f33173,
        }
    }

    /// Current audio-clock position in seconds.
    pub fn time(&self) -> f64 {
        self.frames as f64 / self.sample_rate
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Adopt the output device's actual rate. Voices queued afterwards
    /// render at the new rate; the clock keeps its position.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        let elapsed = self.time();
        self.sample_rate = sample_rate as f64;
        self.frames = (elapsed * self.sample_rate) as u64;
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    /// Queue a cue for playback at its start time.
    pub fn add(&mut self, cue: Cue) {
        // Weyl-style increment keeps noise seeds distinct per voice.
        self.seed = self.seed.wrapping_add(0x9e3779b97f4a7c15);
        self.voices.push(Voice::new(cue, self.sample_rate, self.seed));
    }

    /// Render the next sample and advance the clock one frame.
    pub fn next_sample(&mut self) -> f32 {
        let now = self.time();
        let mut mix = 0.0;
        for voice in &mut self.voices {
            mix += voice.render(now);
        }
        self.voices.retain(|voice| !voice.is_finished(now));
        self.frames += 1;
        (mix as f32 * self.volume).clamp(-1.0, 1.0)
    }

    /// Fill a mono buffer with consecutive samples.
    pub fn fill(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }
}

impl AudioSink for Mixer {
    fn now(&self) -> f64 {
        self.time()
    }

    fn play(&mut self, cue: Cue) {
        self.add(cue);
    }
}
