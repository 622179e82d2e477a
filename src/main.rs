//! Vamp - procedural background music for game screens

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use clap::Parser;

use vamp::config::{self, VampConfig};
use vamp::engine::{self, default_device_name, list_output_devices, Engine, Recorder};
use vamp::viz;
use vamp::Mood;

mod cli;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            mood,
            duration,
            config: config_path,
        } => {
            let cfg = load_or_default(&config_path)?;
            let mood: Mood = mood.into();

            let mut engine = Engine::new(cfg);
            engine.set_mood(mood);
            if !engine.status().playing {
                bail!("audio output unavailable");
            }

            println!(
                "Playing {} at {:.0} BPM. Press Ctrl-C to stop.",
                mood,
                mood.tempo_bpm()
            );

            let running = Arc::new(AtomicBool::new(true));
            let flag = running.clone();
            ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))?;

            let started = Instant::now();
            while running.load(Ordering::SeqCst) {
                if let Some(secs) = duration {
                    if started.elapsed() >= Duration::from_secs_f64(secs) {
                        break;
                    }
                }
                std::thread::sleep(Duration::from_millis(100));
            }

            engine.stop();
            println!("\nStopped.");
        }

        Commands::Jam {
            config: config_path,
        } => {
            let cfg = load_or_default(&config_path)?;
            viz::run_jam(Engine::new(cfg))?;
        }

        Commands::Render {
            mood,
            output,
            duration,
            config: config_path,
        } => {
            let cfg = load_or_default(&config_path)?;
            let mood: Mood = mood.into();

            println!("Rendering {} seconds of {} to {:?}...", duration, mood, output);

            let sample_rate = cfg.audio.sample_rate;
            let samples =
                engine::render_mood(mood, duration, sample_rate, cfg.master.volume);

            let mut recorder = Recorder::new(&output, sample_rate)?;
            recorder.write_buffer(&samples)?;
            let secs = recorder.duration_secs();
            recorder.finalize()?;

            println!("Wrote {:.1}s at {} Hz to {:?}", secs, sample_rate, output);
        }

        Commands::Moods => {
            println!("Moods (x = one cue on the step, X = two, # = more):\n");
            for mood in Mood::ALL {
                let hits = viz::step_hits(mood);
                let grid: String = hits
                    .iter()
                    .enumerate()
                    .map(|(step, &count)| {
                        let cell = viz::step_symbol(count).to_string();
                        if step % 4 == 3 && step != 15 {
                            cell + " "
                        } else {
                            cell
                        }
                    })
                    .collect();
                println!(
                    "  {:<9} {:>3.0} BPM  {}  {} cues/bar",
                    mood.name(),
                    mood.tempo_bpm(),
                    grid,
                    hits.iter().sum::<usize>()
                );
            }
        }

        Commands::Devices => {
            println!("Available audio output devices:\n");

            if let Some(name) = default_device_name() {
                println!("Default output: {}\n", name);
            } else {
                println!("No default output device.\n");
            }

            let devices = list_output_devices();
            if devices.is_empty() {
                println!("  (none found)");
            }
            for (name, config) in devices {
                println!(
                    "  - {} ({} Hz, {} ch)",
                    name, config.sample_rate.0, config.channels
                );
            }
        }

        Commands::Check {
            config: config_path,
        } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    match cfg.audio.buffer_size {
                        Some(frames) => println!("  Buffer size: {} frames", frames),
                        None => println!("  Buffer size: device default"),
                    }
                    match &cfg.audio.device {
                        Some(device) => println!("  Device: {}", device),
                        None => println!("  Device: default"),
                    }
                    println!("  Master volume: {:.0}%", cfg.master.volume * 100.0);
                    println!("  SFX muted: {}", cfg.master.muted);
                }
                Err(e) => {
                    println!("Configuration is invalid: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../vamp.example.yaml");

            let path = "vamp.yaml";
            if Path::new(path).exists() {
                println!("vamp.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created vamp.yaml with example configuration.");
            }
        }
    }

    Ok(())
}

/// Load the config file, or fall back to defaults when it does not exist.
fn load_or_default(path: &Path) -> Result<VampConfig> {
    if path.exists() {
        config::load_config(path)
    } else {
        println!("No config at {:?}, using defaults.", path);
        Ok(VampConfig::default())
    }
}
