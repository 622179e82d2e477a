//! CLI interface for Vamp

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use vamp::Mood;

/// Procedural background music and UI sound effects for game screens
#[derive(Parser)]
#[command(name = "vamp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a mood loop through the default audio output
    Play {
        /// Mood to play
        #[arg(short, long, value_enum)]
        mood: MoodArg,

        /// Stop after this many seconds (default: run until Ctrl-C)
        #[arg(short, long)]
        duration: Option<f64>,

        /// Configuration file path
        #[arg(short, long, default_value = "vamp.yaml")]
        config: PathBuf,
    },

    /// Interactive session: keys change screens and fire effects
    Jam {
        /// Configuration file path
        #[arg(short, long, default_value = "vamp.yaml")]
        config: PathBuf,
    },

    /// Render a mood loop to a WAV file, no audio device needed
    Render {
        /// Mood to render
        #[arg(short, long, value_enum)]
        mood: MoodArg,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Duration in seconds
        #[arg(short, long, default_value = "8")]
        duration: f64,

        /// Configuration file path
        #[arg(short, long, default_value = "vamp.yaml")]
        config: PathBuf,
    },

    /// List the moods with their tempos and step grids
    Moods,

    /// List available audio output devices
    Devices,

    /// Validate a configuration file
    Check {
        /// Configuration file path
        #[arg(short, long, default_value = "vamp.yaml")]
        config: PathBuf,
    },

    /// Generate an example configuration file
    Init,
}

/// Mood names as CLI values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MoodArg {
    Suspense,
    Lobby,
    Battle,
    Victory,
}

impl From<MoodArg> for Mood {
    fn from(arg: MoodArg) -> Self {
        match arg {
            MoodArg::Suspense => Mood::Suspense,
            MoodArg::Lobby => Mood::Lobby,
            MoodArg::Battle => Mood::Battle,
            MoodArg::Victory => Mood::Victory,
        }
    }
}
