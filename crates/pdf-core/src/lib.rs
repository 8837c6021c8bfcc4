//! PDF Core - Low-level PDF writing
//!
//! This crate provides functionality for:
//! - Creating PDF documents from scratch with fixed-size pages
//! - Built-in Type1 font families (Helvetica, Courier) with AFM metrics
//! - Embedding TrueType font families
//! - Inserting text runs at specific coordinates
//! - Drawing lines and rectangles
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{Align, PageSize, PdfDocument, StandardFamily};
//!
//! let mut doc = PdfDocument::new();
//! let page = doc.add_blank_page(PageSize::A4)?;
//! doc.register_standard_family("helvetica", StandardFamily::Helvetica)?;
//! doc.set_font("helvetica", 12.0)?;
//! doc.insert_text("Hello, World!", page, 100.0, 100.0, Align::Left)?;
//! doc.save("output.pdf")?;
//! ```

mod document;
mod font;
mod graphics;
mod standard;
mod text;

pub use document::{Color, DocumentInfo, PageSize, PdfDocument};
pub use font::{FontData, FontFamily, FontFamilyBuilder, FontStyle, FontWeight};
pub use graphics::{line_operators, rect_operators, RectPaint};
pub use standard::{encode_win_ansi, StandardFamily, StandardFont};
pub use text::{fmt_num, generate_text_operators, TextRenderContext};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Font already exists: {0}")]
    FontAlreadyExists(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Document already finalized")]
    AlreadyFinalized,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;

/// Text alignment options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}
