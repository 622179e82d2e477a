//! Deviceless rendering
//!
//! Drives a private transport and mixer with a virtual clock, interleaving
//! drains and sample rendering exactly the way the live tick thread and the
//! device callback do, minus the device.

use crate::pattern::Mood;

use super::mixer::Mixer;
use super::scheduler::TICK_INTERVAL;
use super::transport::Transport;

/// Render `duration_secs` of a mood loop to mono samples.
pub fn render_mood(mood: Mood, duration_secs: f64, sample_rate: u32, volume: f32) -> Vec<f32> {
    let mut transport = Transport::new();
    let mut mixer = Mixer::new(sample_rate, volume);
    transport.set_mood(mood, 0.0);
    transport.start();

    let total = (duration_secs * sample_rate as f64) as usize;
    // One tick's worth of audio per drain.
    let block = ((sample_rate as f64 * TICK_INTERVAL.as_secs_f64()) as usize).max(1);

    let mut samples = vec![0.0f32; total];
    let mut written = 0;
    while written < total {
        transport.drain(mixer.time(), &mut mixer);
        let n = block.min(total - written);
        mixer.fill(&mut samples[written..written + n]);
        written += n;
    }
    samples
}
