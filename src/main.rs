use anyhow::Result;
use clap::Parser;
use std::path::Path;

use streamcue::cli::{Cli, Commands, ConfigAction};
use streamcue::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Devices) => {
            list_audio_devices()?;
            return Ok(());
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, cli.config.as_deref())?;
            return Ok(());
        }
        None | Some(Commands::Run) => {}
    }

    run_overlay(cli).await
}

/// Load configuration from an explicit path or the default location.
///
/// An explicit `--config` path must exist; the default path falls back to
/// built-in defaults when missing. Environment overrides apply either way.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(p) => Config::load(p)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    Ok(config.with_env_overrides())
}

#[cfg(feature = "cpal-audio")]
async fn run_overlay(cli: Cli) -> Result<()> {
    use streamcue::app::{RunOverrides, run_overlay_command};

    let config = load_config(cli.config.as_deref())?;
    let overrides = RunOverrides {
        device: cli.device,
        model: cli.model,
        language: cli.language,
        host: cli.host,
        port: cli.port,
        triggers: cli.triggers,
        items: cli.items,
        cooldown: cli.cooldown,
    };
    run_overlay_command(config, overrides, cli.quiet).await?;
    Ok(())
}

#[cfg(not(feature = "cpal-audio"))]
async fn run_overlay(_cli: Cli) -> Result<()> {
    anyhow::bail!("streamcue was built without audio capture (enable the cpal-audio feature)")
}

#[cfg(feature = "cpal-audio")]
fn list_audio_devices() -> Result<()> {
    use owo_colors::OwoColorize;
    use streamcue::audio::capture::list_devices;

    let devices = list_devices()?;
    if devices.is_empty() {
        println!("No audio input devices found.");
        return Ok(());
    }

    println!("{}", "Available audio input devices:".bold());
    for device in devices {
        println!("  {}", device);
    }
    Ok(())
}

#[cfg(not(feature = "cpal-audio"))]
fn list_audio_devices() -> Result<()> {
    anyhow::bail!("streamcue was built without audio capture (enable the cpal-audio feature)")
}

fn handle_config_command(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            print!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(Config::default_path);
            println!("{}", path.display());
        }
    }
    Ok(())
}
