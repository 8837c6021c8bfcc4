//! Resume - form collection and PDF rendering
//!
//! This crate provides:
//! - The resume data model ([`ResumeRecord`])
//! - Parsers for the experience and skills text boxes
//! - [`FormCollector`]: form field state, education rows and submission
//! - [`ResumeRenderer`]: lays a record out as an A4 PDF
//!
//! # Example
//!
//! ```ignore
//! use resume::{FormCollector, FormField, ResumeRenderer};
//!
//! let mut form = FormCollector::new();
//! form.set(FormField::Name, "Jane Doe");
//! form.set(FormField::Skills, "Go, Rust");
//!
//! let submission = form.submit();
//! let path = ResumeRenderer::new().render(&submission.record, resume::DEFAULT_OUTPUT)?;
//! ```

pub mod form;
mod model;
pub mod parse;
mod render;
mod theme;

pub use form::{FormCollector, FormError, FormField, FormFields, Submission};
pub use model::{EducationRow, ExperienceEntry, ResumeRecord};
pub use parse::{parse_experience, parse_skills, ExperienceParse, SkippedLine};
pub use render::{FontSource, ResumeRenderer, TrueTypeFonts, FONT_FAMILY, PAGE_MARGIN};
pub use theme::{Palette, ResumeTheme};

use std::path::PathBuf;
use thiserror::Error;

/// File written when no output path is configured
pub const DEFAULT_OUTPUT: &str = "resume.pdf";

/// Errors that can occur while building a resume
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Failed to read font {}: {source}", .path.display())]
    FontRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Layout error: {0}")]
    Layout(#[from] layout::LayoutError),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for resume operations
pub type Result<T> = std::result::Result<T, ResumeError>;
