//! Microphone capture using CPAL (Cross-Platform Audio Library).
//!
//! The data callback does exactly one thing: tag the delivered samples with
//! an arrival sequence and push them into the chunk queue. No inference,
//! rendering, or I/O happens on the audio thread; a stall here means dropped
//! audio.

use crate::audio::chunk::AudioChunk;
use crate::audio::queue::ChunkSender;
use crate::defaults;
use crate::error::{Result, StreamcueError};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Run a closure with stderr temporarily redirected to /dev/null.
///
/// This suppresses noisy ALSA/JACK/PipeWire messages that CPAL triggers
/// when probing audio backends. The messages are harmless but confusing to users.
///
/// # Safety
/// Uses `libc::dup`/`libc::dup2` to save and restore file descriptor 2 (stderr).
/// Safe as long as no other thread is concurrently manipulating fd 2.
fn with_suppressed_stderr<F, R>(f: F) -> R
where
    F: FnOnce() -> R,
{
    unsafe {
        let saved_fd = libc::dup(2);
        let devnull = libc::open(c"/dev/null".as_ptr(), libc::O_WRONLY);
        if saved_fd >= 0 && devnull >= 0 {
            libc::dup2(devnull, 2);
            libc::close(devnull);
        }

        let result = f();

        if saved_fd >= 0 {
            libc::dup2(saved_fd, 2);
            libc::close(saved_fd);
        }

        result
    }
}

/// Preferred device names for GNOME/PipeWire environments.
const PREFERRED_DEVICES: &[&str] = &["pipewire", "pulse", "PulseAudio"];

/// Device name patterns to filter out (not useful for voice input).
const FILTERED_PATTERNS: &[&str] = &[
    "surround",
    "front:",
    "rear:",
    "center:",
    "side:",
    "Digital Output",
    "HDMI",
    "S/PDIF",
];

fn should_filter_device(name: &str) -> bool {
    let lower = name.to_lowercase();
    FILTERED_PATTERNS
        .iter()
        .any(|pattern| lower.contains(&pattern.to_lowercase()))
}

fn is_preferred_device(name: &str) -> bool {
    let lower = name.to_lowercase();
    PREFERRED_DEVICES
        .iter()
        .any(|pref| lower.contains(&pref.to_lowercase()))
}

/// List all available audio input devices with filtering and recommendations.
///
/// Preferred devices are marked with "\[recommended\]". Obviously unusable
/// devices (surround channels, HDMI, etc.) are filtered out.
///
/// # Errors
/// Returns `StreamcueError::AudioCapture` if device enumeration fails.
pub fn list_devices() -> Result<Vec<String>> {
    with_suppressed_stderr(|| {
        let host = cpal::default_host();
        let devices = host
            .input_devices()
            .map_err(|e| StreamcueError::AudioCapture {
                message: format!("Failed to enumerate input devices: {}", e),
            })?;

        let mut device_names = Vec::new();
        for device in devices {
            if let Ok(name) = device.name() {
                if should_filter_device(&name) {
                    continue;
                }

                if is_preferred_device(&name) {
                    device_names.push(format!("{} [recommended]", name));
                } else {
                    device_names.push(name);
                }
            }
        }

        Ok(device_names)
    })
}

/// Get the best default input device, preferring PipeWire/PulseAudio.
///
/// This ensures we respect the desktop's audio device selection.
fn get_best_default_device() -> Result<cpal::Device> {
    with_suppressed_stderr(|| {
        let host = cpal::default_host();

        if let Ok(devices) = host.input_devices() {
            for device in devices {
                if let Ok(name) = device.name()
                    && is_preferred_device(&name)
                {
                    return Ok(device);
                }
            }
        }

        host.default_input_device()
            .ok_or_else(|| StreamcueError::AudioDeviceNotFound {
                device: "default".to_string(),
            })
    })
}

/// Microphone capture that feeds the chunk queue.
///
/// Captures f32 mono audio at 16kHz, as required by Whisper. Tries the
/// preferred format first (f32/16kHz/mono), then falls back to the device's
/// default config with software conversion (channel mixing + resampling).
pub struct MicCapture {
    device: cpal::Device,
    stream: Option<cpal::Stream>,
    sequence: Arc<AtomicU64>,
    sample_rate: u32,
    chunk_ms: u32,
}

impl MicCapture {
    /// Create a capture for the named device, or the best default.
    ///
    /// # Errors
    /// Returns `StreamcueError::AudioDeviceNotFound` if the named device
    /// does not exist or no input device is available.
    pub fn new(device_name: Option<&str>) -> Result<Self> {
        let device = with_suppressed_stderr(|| {
            let host = cpal::default_host();

            if let Some(name) = device_name {
                let devices = host
                    .input_devices()
                    .map_err(|e| StreamcueError::AudioCapture {
                        message: format!("Failed to enumerate devices: {}", e),
                    })?;

                let mut found_device = None;
                for dev in devices {
                    if let Ok(dev_name) = dev.name()
                        && dev_name == name
                    {
                        found_device = Some(dev);
                        break;
                    }
                }

                found_device.ok_or_else(|| StreamcueError::AudioDeviceNotFound {
                    device: name.to_string(),
                })
            } else {
                get_best_default_device()
            }
        })?;

        Ok(Self {
            device,
            stream: None,
            sequence: Arc::new(AtomicU64::new(0)),
            sample_rate: defaults::SAMPLE_RATE,
            chunk_ms: defaults::CHUNK_MS,
        })
    }

    /// Starts capturing into the given chunk sender.
    ///
    /// # Errors
    /// Returns `StreamcueError::AudioCapture` if no stream configuration works.
    pub fn start(&mut self, tx: ChunkSender) -> Result<()> {
        if self.stream.is_some() {
            return Ok(()); // Already started
        }

        let stream = self.build_stream(tx)?;
        stream.play().map_err(|e| StreamcueError::AudioCapture {
            message: format!("Failed to start audio stream: {}", e),
        })?;
        self.stream = Some(stream);
        Ok(())
    }

    /// Stops capturing and releases the device.
    pub fn stop(&mut self) -> Result<()> {
        if let Some(stream) = self.stream.take() {
            stream.pause().map_err(|e| StreamcueError::AudioCapture {
                message: format!("Failed to stop audio stream: {}", e),
            })?;
        }
        Ok(())
    }

    /// Build the audio stream with the configured format.
    ///
    /// Tries in order:
    /// 1. f32/16kHz/mono with a fixed chunk-sized buffer
    /// 2. f32/16kHz/mono with the default buffer size
    /// 3. Device default config — native rate/channels with software conversion
    fn build_stream(&self, tx: ChunkSender) -> Result<cpal::Stream> {
        let blocksize = (self.sample_rate * self.chunk_ms) / 1000;
        let preferred = cpal::StreamConfig {
            channels: 1,
            sample_rate: cpal::SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Fixed(blocksize),
        };

        // Capture/device errors inside a callback are logged and ignored;
        // capture continues.
        let err_callback = |err| {
            eprintln!("Audio stream error: {}", err);
        };

        let sequence = Arc::clone(&self.sequence);
        let chunk_tx = tx.clone();
        if let Ok(stream) = self.device.build_input_stream(
            &preferred,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let seq = sequence.fetch_add(1, Ordering::Relaxed);
                chunk_tx.push(AudioChunk::new(seq, data.to_vec()));
            },
            err_callback,
            None,
        ) {
            return Ok(stream);
        }

        // Some backends reject fixed buffer sizes; retry with the default.
        let fallback = cpal::StreamConfig {
            buffer_size: cpal::BufferSize::Default,
            ..preferred
        };
        let sequence = Arc::clone(&self.sequence);
        let chunk_tx = tx.clone();
        if let Ok(stream) = self.device.build_input_stream(
            &fallback,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let seq = sequence.fetch_add(1, Ordering::Relaxed);
                chunk_tx.push(AudioChunk::new(seq, data.to_vec()));
            },
            err_callback,
            None,
        ) {
            return Ok(stream);
        }

        self.build_stream_native(tx)
    }

    /// Build a stream using the device's default/native config, with software
    /// channel mixing (stereo→mono) and resampling (native rate→16kHz).
    fn build_stream_native(&self, tx: ChunkSender) -> Result<cpal::Stream> {
        use cpal::SampleFormat;

        let default_config =
            self.device
                .default_input_config()
                .map_err(|e| StreamcueError::AudioCapture {
                    message: format!("Failed to query default input config: {}", e),
                })?;

        let native_rate = default_config.sample_rate().0;
        let native_channels = default_config.channels() as usize;
        let target_rate = self.sample_rate;

        let stream_config: cpal::StreamConfig = default_config.clone().into();

        eprintln!(
            "streamcue: using native audio format ({}ch/{}Hz/{:?}), converting in software",
            native_channels,
            native_rate,
            default_config.sample_format(),
        );

        let err_callback = |err| {
            eprintln!("Audio stream error: {}", err);
        };

        let sequence = Arc::clone(&self.sequence);

        match default_config.sample_format() {
            SampleFormat::F32 => self
                .device
                .build_input_stream(
                    &stream_config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        let seq = sequence.fetch_add(1, Ordering::Relaxed);
                        let mono =
                            convert_to_mono_16khz(data, native_channels, native_rate, target_rate);
                        tx.push(AudioChunk::new(seq, mono));
                    },
                    err_callback,
                    None,
                )
                .map_err(|e| StreamcueError::AudioCapture {
                    message: format!("Failed to build native f32 stream: {}", e),
                }),
            SampleFormat::I16 => self
                .device
                .build_input_stream(
                    &stream_config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        let seq = sequence.fetch_add(1, Ordering::Relaxed);
                        let float_data: Vec<f32> =
                            data.iter().map(|&s| s as f32 / 32768.0).collect();
                        let mono = convert_to_mono_16khz(
                            &float_data,
                            native_channels,
                            native_rate,
                            target_rate,
                        );
                        tx.push(AudioChunk::new(seq, mono));
                    },
                    err_callback,
                    None,
                )
                .map_err(|e| StreamcueError::AudioCapture {
                    message: format!("Failed to build native i16 stream: {}", e),
                }),
            fmt => Err(StreamcueError::AudioCapture {
                message: format!(
                    "Unsupported native sample format: {:?}. \
                     Try specifying a device with --device.",
                    fmt
                ),
            }),
        }
    }
}

impl Drop for MicCapture {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Mix multi-channel audio to mono and resample to the target rate.
fn convert_to_mono_16khz(
    samples: &[f32],
    channels: usize,
    source_rate: u32,
    target_rate: u32,
) -> Vec<f32> {
    // Mix to mono by averaging channels
    let mono: Vec<f32> = if channels == 1 {
        samples.to_vec()
    } else {
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    };

    // Resample if needed
    if source_rate == target_rate {
        mono
    } else {
        resample(&mono, source_rate, target_rate)
    }
}

/// Linear-interpolation resampler.
///
/// Quality is sufficient for speech recognition input; this is not a
/// general-purpose audio resampler.
fn resample(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if samples.is_empty() || source_rate == target_rate {
        return samples.to_vec();
    }

    let ratio = source_rate as f64 / target_rate as f64;
    let out_len = (samples.len() as f64 / ratio) as usize;
    let mut out = Vec::with_capacity(out_len);

    for i in 0..out_len {
        let src_pos = i as f64 * ratio;
        let idx = src_pos as usize;
        let frac = (src_pos - idx as f64) as f32;

        let a = samples[idx.min(samples.len() - 1)];
        let b = samples[(idx + 1).min(samples.len() - 1)];
        out.push(a + (b - a) * frac);
    }

    out
}
