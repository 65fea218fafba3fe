use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::render::InvitationRenderer;
use crate::translation::NameTranslator;
use anyhow::Context;
use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};

/// Gujarati wedding invitation cards: translate a guest's name, stamp it on
/// the card and share it on WhatsApp.
#[derive(Debug, Parser)]
#[command(name = "invitation-cards", version, about)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Port override for the HTTP server
    #[arg(short, long)]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the web application (default)
    Serve {
        /// Do not open a browser window
        #[arg(long)]
        no_browser: bool,
    },
    /// Validate the configuration and print the effective values as YAML
    CheckConfig,
    /// Print the Gujarati rendering of a name
    Translate {
        name: String,
    },
    /// Write a personalised invitation card to a file
    Render {
        /// Text to stamp on the card
        #[arg(long)]
        name: String,
        /// Translate `--name` to Gujarati before stamping
        #[arg(long)]
        translate: bool,
        /// Output PDF path
        #[arg(long)]
        out: PathBuf,
    },
}

impl Cli {
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut config = AppConfig::load(&self.config)?;
        if let Some(port) = self.port {
            config.server.port = port;
        }
        Ok(config)
    }
}

pub fn check_config(config: &AppConfig) -> anyhow::Result<()> {
    print!("{}", config.to_yaml()?);
    Ok(())
}

pub async fn translate(config: &AppConfig, name: &str) -> anyhow::Result<()> {
    let translator = NameTranslator::from_config(&config.translation)?;
    println!("{}", translator.translate(name).await);
    Ok(())
}

pub async fn render(
    config: &AppConfig,
    name: &str,
    translate: bool,
    out: &Path,
) -> anyhow::Result<()> {
    let text = if translate {
        NameTranslator::from_config(&config.translation)?
            .translate(name)
            .await
    } else {
        name.to_string()
    };

    let renderer = InvitationRenderer::from_config(&config.invitation);
    let bytes = renderer
        .render(&text)
        .with_context(|| format!("cannot render invitation for '{}'", text))?;
    std::fs::write(out, &bytes).with_context(|| format!("cannot write {}", out.display()))?;
    info!("wrote {} ({} bytes) for '{}'", out.display(), bytes.len(), text);
    Ok(())
}
