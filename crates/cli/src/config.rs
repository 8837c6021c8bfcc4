use anyhow::{bail, Context, Result};
use clap::Args;
use resume::{FontSource, ResumeTheme, TrueTypeFonts, DEFAULT_OUTPUT};
use std::path::{Path, PathBuf};

/// Log file used by the interactive form when none is configured
pub const DEFAULT_LOG_FILE: &str = "resume-builder.log";

/// Settings that can come from the command line; each overrides its
/// environment variable
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Output PDF path [env: RESUME_OUTPUT]
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Log file for the interactive form [env: RESUME_LOG_FILE]
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// TrueType font for regular text [env: RESUME_FONT_REGULAR]
    #[arg(long, global = true)]
    pub font_regular: Option<PathBuf>,

    /// TrueType font for bold text [env: RESUME_FONT_BOLD]
    #[arg(long, global = true)]
    pub font_bold: Option<PathBuf>,

    /// TrueType font for italic text [env: RESUME_FONT_ITALIC]
    #[arg(long, global = true)]
    pub font_italic: Option<PathBuf>,

    /// TrueType font for bold italic text [env: RESUME_FONT_BOLD_ITALIC]
    #[arg(long, global = true)]
    pub font_bold_italic: Option<PathBuf>,

    /// JSON file with colours and type sizes [env: RESUME_THEME]
    #[arg(long, global = true)]
    pub theme: Option<PathBuf>,

    /// Empty the education list after each successful render
    /// [env: RESUME_CLEAR_AFTER_RENDER]
    #[arg(long, global = true)]
    pub clear_after_render: bool,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub output: PathBuf,
    pub log_file: PathBuf,
    pub fonts: FontSource,
    pub theme: ResumeTheme,
    pub clear_after_render: bool,
    pub rust_log: String,
}

impl Config {
    /// Load from the environment (and `.env` if present), then apply
    /// command-line overrides
    pub fn load(args: &ConfigArgs) -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok(), args)
    }

    /// Build from a variable lookup and command-line overrides
    pub fn from_lookup<F>(lookup: F, args: &ConfigArgs) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = |flag: &Option<PathBuf>, key: &str| {
            flag.clone()
                .or_else(|| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from))
        };

        let output = path(&args.output, "RESUME_OUTPUT").unwrap_or_else(|| DEFAULT_OUTPUT.into());
        let log_file =
            path(&args.log_file, "RESUME_LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.into());

        let regular = path(&args.font_regular, "RESUME_FONT_REGULAR");
        let bold = path(&args.font_bold, "RESUME_FONT_BOLD");
        let italic = path(&args.font_italic, "RESUME_FONT_ITALIC");
        let bold_italic = path(&args.font_bold_italic, "RESUME_FONT_BOLD_ITALIC");

        let fonts = match regular {
            Some(regular) => FontSource::TrueType(TrueTypeFonts {
                regular,
                bold,
                italic,
                bold_italic,
            }),
            None if bold.is_some() || italic.is_some() || bold_italic.is_some() => {
                bail!("A regular font (RESUME_FONT_REGULAR) is required when other font variants are set")
            }
            None => FontSource::Builtin,
        };

        let theme = match path(&args.theme, "RESUME_THEME") {
            Some(theme_path) => load_theme(&theme_path)?,
            None => ResumeTheme::default(),
        };

        let clear_after_render = args.clear_after_render
            || match lookup("RESUME_CLEAR_AFTER_RENDER") {
                Some(value) => parse_bool(&value)
                    .context("RESUME_CLEAR_AFTER_RENDER must be true or false")?,
                None => false,
            };

        Ok(Config {
            output,
            log_file,
            fonts,
            theme,
            clear_after_render,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Read a theme file and check its colours up front
fn load_theme(path: &Path) -> Result<ResumeTheme> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read theme {}", path.display()))?;
    let theme = ResumeTheme::from_json(&json)
        .with_context(|| format!("Invalid theme in {}", path.display()))?;
    theme
        .palette()
        .with_context(|| format!("Invalid colour in theme {}", path.display()))?;
    Ok(theme)
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid boolean '{other}'"),
    }
}
