//! Real-time audio output using cpal
//!
//! Owns the output stream and pulls samples from the shared mixer inside
//! the device callback. The callback never blocks: if the mixer is busy it
//! emits silence for that buffer.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, SampleFormat, Stream, StreamConfig};
use thiserror::Error;

use super::mixer::Mixer;

/// Why an output stream could not be opened.
#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("no audio output device available")]
    NoDevice,
    #[error("audio output device '{0}' not found")]
    DeviceNotFound(String),
    #[error("unsupported sample format {0:?}")]
    UnsupportedFormat(SampleFormat),
    #[error(transparent)]
    Devices(#[from] cpal::DevicesError),
    #[error(transparent)]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error(transparent)]
    Build(#[from] cpal::BuildStreamError),
    #[error(transparent)]
    Play(#[from] cpal::PlayStreamError),
}

/// A running output stream fed by a shared [`Mixer`].
pub struct Player {
    stream: Stream,
}

impl Player {
    /// Open an output stream on the named device, or the default one.
    /// Adjusts the mixer to the device's sample rate before any audio flows.
    pub fn open(
        mixer: Arc<Mutex<Mixer>>,
        device_name: Option<&str>,
        buffer_frames: Option<u32>,
    ) -> Result<Self, PlayerError> {
        let host = cpal::default_host();
        let device = match device_name {
            Some(name) => host
                .output_devices()?
                .find(|d| d.name().map(|n| n == name).unwrap_or(false))
                .ok_or_else(|| PlayerError::DeviceNotFound(name.to_string()))?,
            None => host.default_output_device().ok_or(PlayerError::NoDevice)?,
        };

        let default_config = device.default_output_config()?;
        let sample_format = default_config.sample_format();
        let mut config: StreamConfig = default_config.into();
        if let Some(frames) = buffer_frames {
            config.buffer_size = cpal::BufferSize::Fixed(frames);
        }

        if let Ok(mut mixer) = mixer.lock() {
            mixer.set_sample_rate(config.sample_rate.0);
        }

        let stream = match sample_format {
            SampleFormat::F32 => Self::build_stream::<f32>(&device, &config, mixer)?,
            SampleFormat::I16 => Self::build_stream::<i16>(&device, &config, mixer)?,
            SampleFormat::U16 => Self::build_stream::<u16>(&device, &config, mixer)?,
            other => return Err(PlayerError::UnsupportedFormat(other)),
        };

        stream.play()?;
        Ok(Self { stream })
    }

    /// Make sure the stream is running. Safe to call on a running stream.
    pub fn resume(&self) {
        if let Err(err) = self.stream.play() {
            eprintln!("vamp: failed to resume audio stream: {}", err);
        }
    }

    fn build_stream<T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>>(
        device: &Device,
        config: &StreamConfig,
        mixer: Arc<Mutex<Mixer>>,
    ) -> Result<Stream, PlayerError> {
        let channels = config.channels as usize;

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                if let Ok(mut mixer) = mixer.try_lock() {
                    for frame in data.chunks_mut(channels) {
                        let sample = mixer.next_sample();
                        for channel_sample in frame.iter_mut() {
                            *channel_sample = T::from_sample(sample);
                        }
                    }
                } else {
                    // Mixer busy, fill with silence.
                    for sample in data.iter_mut() {
                        *sample = T::from_sample(0.0f32);
                    }
                }
            },
            |err| {
                eprintln!("vamp: audio stream error: {}", err);
            },
            None,
        )?;

        Ok(stream)
    }
}

/// List all available output devices with their default configs.
pub fn list_output_devices() -> Vec<(String, StreamConfig)> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(output_devices) = host.output_devices() {
        for device in output_devices {
            if let (Ok(name), Ok(config)) = (device.name(), device.default_output_config()) {
                devices.push((name, config.into()));
            }
        }
    }

    devices
}

/// Name of the default output device, if any.
pub fn default_device_name() -> Option<String> {
    let host = cpal::default_host();
    host.default_output_device().and_then(|d| d.name().ok())
}
