//! The audio engine
//!
//! [`Engine`] is the host application's single entry point: tell it which
//! screen is active and it keeps the right backing track running; call the
//! one-shot methods for UI feedback. Owned by the application's composition
//! root and passed wherever sounds are triggered.
//!
//! Output opens lazily on the first sound-triggering call. If the platform
//! has no usable audio device the engine degrades to a permanent no-op and
//! the rest of the application keeps working.

mod mixer;
mod offline;
mod player;
mod recorder;
mod scheduler;
mod transport;

pub use mixer::Mixer;
pub use offline::render_mood;
pub use player::{default_device_name, list_output_devices, Player, PlayerError};
pub use recorder::Recorder;
pub use transport::Transport;

use std::sync::{Arc, Mutex};

use crate::config::VampConfig;
use crate::pattern::{Mood, Screen};
use crate::synth::{AudioSink, Cue};

use scheduler::Scheduler;

/// Point-in-time view of the engine for displays and hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineStatus {
    pub playing: bool,
    pub mood: Option<Mood>,
    pub tempo_bpm: f64,
    pub step: usize,
    pub muted: bool,
}

enum Output {
    /// No stream yet; opened on the first sound-triggering call.
    Unopened,
    Live(Player),
    /// Opening failed once; every operation is a no-op from here on.
    Dead,
    /// No device on purpose: cues are scheduled but never rendered.
    Detached,
}

/// The background-music and sound-effects engine.
pub struct Engine {
    config: VampConfig,
    transport: Arc<Mutex<Transport>>,
    mixer: Arc<Mutex<Mixer>>,
    output: Output,
    scheduler: Option<Scheduler>,
    muted: bool,
}

impl Engine {
    /// Engine that plays through the default (or configured) output device.
    pub fn new(config: VampConfig) -> Self {
        Self::with_output(config, Output::Unopened)
    }

    /// Engine with no audio device at all. Scheduling still happens against
    /// the (frozen) mixer clock; useful for headless hosts and tests.
    pub fn detached(config: VampConfig) -> Self {
        Self::with_output(config, Output::Detached)
    }

    fn with_output(config: VampConfig, output: Output) -> Self {
        let mixer = Mixer::new(config.audio.sample_rate, config.master.volume);
        let muted = config.master.muted;
        Self {
            transport: Arc::new(Mutex::new(Transport::new())),
            mixer: Arc::new(Mutex::new(mixer)),
            output,
            scheduler: None,
            muted,
            config,
        }
    }

    /// Host notification: the active screen changed.
    pub fn set_screen(&mut self, screen: Screen) {
        self.set_mood(screen.mood());
    }

    /// Select the background mood directly. A no-op when that mood is
    /// already playing; a genuine change resets the bar phase.
    pub fn set_mood(&mut self, mood: Mood) {
        {
            let transport = self.transport.lock().unwrap();
            if transport.is_playing() && transport.mood() == Some(mood) {
                return;
            }
        }
        if !self.ensure_output() {
            return;
        }
        let mut transport = self.transport.lock().unwrap();
        let now = self.mixer.lock().unwrap().time();
        transport.set_mood(mood, now);
        if !transport.is_playing() {
            transport.start();
            drop(transport);
            self.scheduler = Some(Scheduler::spawn(
                self.transport.clone(),
                self.mixer.clone(),
            ));
        }
    }

    /// Stop background playback. Cues already handed to the mixer play out;
    /// calling this while stopped does nothing.
    pub fn stop(&mut self) {
        self.transport.lock().unwrap().stop();
        if let Some(mut scheduler) = self.scheduler.take() {
            scheduler.shutdown();
        }
    }

    /// Make sure the output stream exists and is running. Idempotent.
    pub fn resume(&mut self) {
        self.ensure_output();
    }

    /// Mute or unmute one-shot effects. Background playback is never muted.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn toggle_muted(&mut self) -> bool {
        self.muted = !self.muted;
        self.muted
    }

    pub fn status(&self) -> EngineStatus {
        let transport = self.transport.lock().unwrap();
        EngineStatus {
            playing: transport.is_playing(),
            mood: transport.mood(),
            tempo_bpm: transport.tempo_bpm(),
            step: transport.step(),
            muted: self.muted,
        }
    }

    // --- one-shot effects -------------------------------------------------

    /// UI click for buttons and menu selections.
    pub fn click(&mut self) {
        self.one_shot(Cue::click);
    }

    /// Keystroke blip for text entry.
    pub fn keystroke(&mut self) {
        self.one_shot(Cue::keystroke);
    }

    /// Gunshot burst for a correct answer.
    pub fn gunshot(&mut self) {
        self.one_shot(Cue::gunshot);
    }

    /// Five-note fanfare for the results screen.
    pub fn victory_fanfare(&mut self) {
        if self.muted || !self.ensure_output() {
            return;
        }
        let mut mixer = self.mixer.lock().unwrap();
        let now = mixer.time();
        for cue in Cue::victory_chord(now) {
            mixer.play(cue);
        }
    }

    fn one_shot(&mut self, build: fn(f64) -> Cue) {
        if self.muted || !self.ensure_output() {
            return;
        }
        let mut mixer = self.mixer.lock().unwrap();
        let now = mixer.time();
        let cue = build(now);
        mixer.play(cue);
    }

    /// Open the output stream if this is the first sound-triggering call.
    /// Returns whether sound can go anywhere at all.
    fn ensure_output(&mut self) -> bool {
        match &self.output {
            Output::Live(player) => {
                player.resume();
                return true;
            }
            Output::Detached => return true,
            Output::Dead => return false,
            Output::Unopened => {}
        }

        let opened = Player::open(
            self.mixer.clone(),
            self.config.audio.device.as_deref(),
            self.config.audio.buffer_size,
        );
        match opened {
            Ok(player) => {
                self.output = Output::Live(player);
                true
            }
            Err(err) => {
                eprintln!("vamp: audio output unavailable, sound disabled: {}", err);
                self.output = Output::Dead;
                false
            }
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}
