//! Resume Builder - fill in a form, get a PDF
//!
//! Runs the interactive form by default; `render` turns a JSON record into a
//! PDF without the UI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use resume::{ResumeRecord, ResumeRenderer};
use resume_cli::logging::{self, LogTarget};
use resume_cli::{ui, App, Config, ConfigArgs};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-builder", version)]
#[command(about = "Build a formatted PDF resume from a form", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill in the resume interactively (default)
    Tui,
    /// Render a JSON-encoded resume record (non-interactive)
    Render {
        /// Path to the record JSON file
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let renderer = ResumeRenderer::new()
        .with_fonts(config.fonts.clone())
        .with_theme(config.theme.clone());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            logging::init(LogTarget::File(&config.log_file), &config.rust_log)?;
            tracing::info!(
                "Starting resume-builder v{} (output: {})",
                env!("CARGO_PKG_VERSION"),
                config.output.display()
            );

            let mut app = App::new(renderer, config.output.clone())
                .with_clear_after_render(config.clear_after_render);
            ui::run_tui(&mut app)?;
        }
        Commands::Render { input } => {
            logging::init(LogTarget::Stderr, &config.rust_log)?;
            run_render(&renderer, &input, &config)?;
        }
    }

    Ok(())
}

fn run_render(renderer: &ResumeRenderer, input: &Path, config: &Config) -> Result<()> {
    let json = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let record = ResumeRecord::from_json(&json)
        .with_context(|| format!("Invalid resume record in {}", input.display()))?;

    let path = renderer
        .render(&record, &config.output)
        .context("Failed to render resume")?;

    println!("Resume saved as {}", path.display());
    Ok(())
}
