//! Glance - A terminal text file viewer with incremental search.
//!
//! # Usage
//!
//! ```bash
//! glance notes.txt
//! glance --watch server.log
//! glance --theme dracula --wrap README.md
//! ```

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use glance::app::App;
use glance::config::{
    ConfigOverrides, ThemeName, load_config_or_default, resolve_config_path, save_config,
};

/// A terminal text file viewer with incremental search
#[derive(Parser, Debug)]
#[command(name = "glance", version, about, long_about = None)]
struct Cli {
    /// File to view
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Watch file for changes and auto-reload
    #[arg(short, long)]
    watch: bool,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<ThemeName>,

    /// Hide the line-number gutter
    #[arg(long)]
    no_line_numbers: bool,

    /// Wrap long lines instead of truncating them
    #[arg(long)]
    wrap: bool,

    /// Spaces per tab character
    #[arg(long, value_name = "N")]
    tab_width: Option<usize>,

    /// Config file to use instead of the default locations
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write log output to a file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save the effective settings to the config file
    #[arg(long)]
    save: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            theme: self.theme,
            no_line_numbers: self.no_line_numbers,
            wrap: self.wrap,
            tab_width: self.tab_width,
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("Failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else {
        // Stderr shares the terminal with the UI, so keep it quiet.
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = cli.overrides().apply(load_config_or_default(&config_path));
    tracing::info!(path = %config_path.display(), "configuration resolved");

    if cli.save {
        save_config(&config_path, &config)?;
        eprintln!("Saved settings to {}", config_path.display());
        if cli.file.is_none() {
            return Ok(());
        }
    }

    let Some(file) = cli.file else {
        anyhow::bail!("No file given. Usage: glance [OPTIONS] <FILE>");
    };

    let mut app = App::new(file)
        .with_config(config)
        .with_watch(cli.watch);

    app.run().context("Application error")
}
