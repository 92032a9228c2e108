use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode};
use weatherboard_core::{Config, DUBAI, ProviderId, Route, ViewSelector};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherboard", version, about = "Current weather from four providers")]
pub struct Cli {
    /// Without a subcommand the provider index is shown.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the available providers.
    List,

    /// Configure credentials for a specific provider.
    Configure {
        /// Provider short name, e.g. "openweather" or "tomorrow".
        provider: String,
    },

    /// Show current conditions from one provider.
    Show {
        /// Provider name or route path, e.g. "weatherapi" or "/tomorrowapi".
        /// Defaults to the configured default provider.
        target: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or(Command::List) {
            Command::List => print!("{}", render::home(ProviderId::all())),
            Command::Configure { provider } => configure(&provider)?,
            Command::Show { target } => show(target.as_deref()).await?,
        }

        Ok(())
    }
}

fn configure(provider: &str) -> Result<()> {
    let id = ProviderId::try_from(provider)?;
    // File only: keys from the environment must not be written back.
    let mut config = Config::load_file()?;

    let api_key = Password::new(&format!("{} API key:", id.display_name()))
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.upsert_provider_api_key(id, api_key.trim().to_string());

    let is_default = config.default_provider_id().ok() == Some(id);
    if !is_default {
        let question = format!("Make {} the default provider?", id.display_name());
        let make_default = Confirm::new(&question)
            .with_default(false)
            .prompt()
            .context("Failed to read answer")?;
        if make_default {
            config.set_default_provider(id);
        }
    }

    config.save()?;
    println!(
        "Saved {} credentials to {}",
        id.display_name(),
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(target: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let route = resolve_route(target, &config)?;

    let mut selector = ViewSelector::from_config(&config, DUBAI);
    match selector.navigate(route) {
        Some(view) => {
            let state = view.settled().await;
            print!("{}", render::view(view.id(), &state));
        }
        None => print!("{}", render::home(selector.entries())),
    }

    Ok(())
}

fn resolve_route(target: Option<&str>, config: &Config) -> Result<Route> {
    match target {
        Some(target) => Route::parse(target),
        None => Ok(config.default_provider_id().map(Route::Provider).unwrap_or(Route::Home)),
    }
}
