//! Composition root: wires capture, engine, overlay, and actions together.
//!
//! The engine runs on its own thread with a fixed tick cadence; the async
//! side of the program only waits for Ctrl+C and flips the stop flag.

use owo_colors::OwoColorize;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::action::client::TcpActionSink;
use crate::audio::capture::MicCapture;
use crate::audio::queue::chunk_queue;
use crate::config::Config;
use crate::defaults;
use crate::engine::{Engine, EngineParams, InferenceScheduler, TickOutcome};
use crate::error::{Result, StreamcueError};
use crate::overlay::surface::TermSurface;
use crate::overlay::view::TranscriptView;
use crate::stt::whisper::{WhisperConfig, WhisperTranscriber};
use crate::trigger::debounce::DebounceDispatcher;
use crate::trigger::dictionary::TriggerDictionary;
use crate::trigger::matcher::TriggerMatcher;

/// Terminal width used when the config does not pin one.
const FALLBACK_COLUMNS: usize = 80;

/// CLI overrides applied on top of the loaded configuration.
#[derive(Debug, Default)]
pub struct RunOverrides {
    pub device: Option<String>,
    pub model: Option<PathBuf>,
    pub language: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub triggers: Option<PathBuf>,
    pub items: Option<PathBuf>,
    pub cooldown: Option<Duration>,
}

/// Folds CLI overrides into the configuration.
fn apply_overrides(mut config: Config, overrides: &RunOverrides) -> Config {
    if let Some(device) = &overrides.device {
        config.audio.device = Some(device.clone());
    }
    if let Some(model) = &overrides.model {
        config.stt.model = model.display().to_string();
    }
    if let Some(language) = &overrides.language {
        config.stt.language = language.clone();
    }
    if let Some(host) = &overrides.host {
        config.action.host = host.clone();
    }
    if let Some(port) = overrides.port {
        config.action.port = port;
    }
    if let Some(triggers) = &overrides.triggers {
        config.trigger.groups_file = Some(triggers.clone());
    }
    if let Some(items) = &overrides.items {
        config.trigger.items_file = Some(items.clone());
    }
    if let Some(cooldown) = overrides.cooldown {
        config.trigger.cooldown = humantime::format_duration(cooldown).to_string();
    }
    config
}

fn print_banner(config: &Config, dict: &TriggerDictionary, sink_addr: &str) {
    eprintln!("{} {}", "streamcue".bold(), crate::version_string());
    eprintln!("  model:    {}", config.stt.model.cyan());
    eprintln!("  language: {}", config.stt.language.cyan());
    eprintln!(
        "  device:   {}",
        config.audio.device.as_deref().unwrap_or("default").cyan()
    );
    eprintln!("  actions:  {}", sink_addr.cyan());
    eprintln!(
        "  triggers: {} phrase{}",
        dict.len().to_string().cyan(),
        if dict.len() == 1 { "" } else { "s" }
    );
}

/// Runs the overlay until Ctrl+C.
///
/// The action connection is established before capture starts; a refused
/// connection is fatal so a misconfigured game port fails fast instead of
/// being discovered on the first trigger.
pub async fn run_overlay_command(
    config: Config,
    overrides: RunOverrides,
    quiet: bool,
) -> Result<()> {
    let config = apply_overrides(config, &overrides);

    let dict = Arc::new(TriggerDictionary::load(
        config.trigger.groups_file.as_deref(),
        config.trigger.items_file.as_deref(),
    )?);
    let matcher = TriggerMatcher::new(dict.clone());

    let sink = TcpActionSink::connect(&config.action.host, config.action.port)?;
    if !quiet {
        print_banner(&config, &dict, sink.addr());
    }

    let transcriber = Arc::new(WhisperTranscriber::new(WhisperConfig {
        model_path: PathBuf::from(&config.stt.model),
        language: config.stt.language.clone(),
        beam_size: config.stt.beam_size,
        ..WhisperConfig::default()
    })?);

    let scheduler = InferenceScheduler::new(config.infer_every()?, config.min_audio_samples()?);
    let debounce = DebounceDispatcher::new(config.trigger_cooldown()?);
    let params = EngineParams {
        window_samples: config.window_samples()?,
        actions: config.trigger.actions.clone(),
    };

    let (tx, queue) = chunk_queue();
    let mut capture = MicCapture::new(config.audio.device.as_deref())?;
    capture.start(tx)?;
    if !quiet {
        eprintln!("Listening. Ctrl+C to stop.");
    }

    let columns = config.overlay.columns.unwrap_or(FALLBACK_COLUMNS);
    let view = TranscriptView::new(TermSurface::stdout(columns), matcher.clone(), 0.0, 0.0);

    let mut engine = Engine::new(
        queue,
        scheduler,
        matcher,
        debounce,
        transcriber,
        sink,
        params,
    );

    let running = Arc::new(AtomicBool::new(true));
    let engine_running = running.clone();
    let handle = std::thread::spawn(move || {
        let mut view = view;
        while engine_running.load(Ordering::Relaxed) {
            match engine.tick(Instant::now()) {
                TickOutcome::Transcript { text, dispatched } => {
                    if dispatched && !quiet {
                        eprintln!("{}", "[trigger fired]".red().bold());
                    }
                    if let Err(e) = view.set_text(&text) {
                        eprintln!("Render failed: {}", e);
                    }
                }
                TickOutcome::Quiet => {}
            }
            std::thread::sleep(Duration::from_millis(defaults::TICK_MS));
        }
    });

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| StreamcueError::Other(format!("Failed to wait for Ctrl+C: {}", e)))?;

    if !quiet {
        eprintln!("\nShutting down...");
    }
    running.store(false, Ordering::Relaxed);
    handle
        .join()
        .map_err(|_| StreamcueError::Other("Engine thread panicked".to_string()))?;
    capture.stop()?;

    Ok(())
}
