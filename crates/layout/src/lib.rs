//! Layout - flow composition on top of pdf-core
//!
//! This crate provides:
//! - Paragraphs of styled text runs with word wrapping by measured width
//! - Tables with fixed column widths, header styling, grid and padding
//! - Bullet lists, spacers and horizontal rules
//! - A page template that paginates flowables into a fixed frame
//!
//! # Example
//!
//! ```ignore
//! use layout::{DocTemplate, FontSpec, Flowable, Paragraph, ParagraphStyle};
//! use pdf_core::{PageSize, PdfDocument, StandardFamily};
//!
//! let mut doc = PdfDocument::new();
//! doc.register_standard_family("helvetica", StandardFamily::Helvetica)?;
//!
//! let style = ParagraphStyle::new(FontSpec::new("helvetica", 10.0)).leading(13.0);
//! let story = vec![Flowable::Paragraph(Paragraph::plain("Hello", style))];
//!
//! let pages = DocTemplate::new(PageSize::A4, 40.0).build(&mut doc, &story)?;
//! ```

mod doc;
mod flowable;
mod list;
mod paragraph;
mod style;
mod table;
mod unit;

pub use doc::{DocTemplate, LayoutPlan, Margins, PlacedUnit};
pub use flowable::{Flowable, Rule};
pub use list::BulletList;
pub use paragraph::{Fragment, Line, Paragraph, TextRun};
pub use style::{
    CellPadding, FontSpec, FontStyle, HeaderStyle, LineStyle, ParagraphStyle, TableStyle,
};
pub use table::{Cell, Table};
pub use unit::{PlacedText, Shape, Unit};

use pdf_core::PdfDocument;
use thiserror::Error;

/// Errors that can occur during layout
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    #[error("PDF error: {0}")]
    PdfError(#[from] pdf_core::PdfError),
}

/// Result type for layout operations
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Source of text metrics
///
/// Layout only needs widths; the document being drawn into is the usual
/// implementation.
pub trait TextMeasure {
    /// Width of `text` in points when set in `font`
    fn text_width(&self, font: &FontSpec, text: &str) -> Result<f64>;
}

impl TextMeasure for PdfDocument {
    fn text_width(&self, font: &FontSpec, text: &str) -> Result<f64> {
        let (weight, style) = font.style.to_pdf();
        Ok(self.measure_text(&font.family, weight, style, font.size, text)?)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Every character is half the font size wide
    pub struct FixedWidth;

    impl TextMeasure for FixedWidth {
        fn text_width(&self, font: &FontSpec, text: &str) -> Result<f64> {
            Ok(text.chars().count() as f64 * font.size as f64 * 0.5)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::StandardFamily;

    #[test]
    fn test_pdf_document_measures_registered_family() {
        let mut doc = PdfDocument::new();
        doc.register_standard_family("helvetica", StandardFamily::Helvetica)
            .unwrap();

        let regular = TextMeasure::text_width(&doc, &FontSpec::new("helvetica", 10.0), "Go")
            .unwrap();
        assert!((regular - 13.34).abs() < 1e-6);

        let missing = TextMeasure::text_width(&doc, &FontSpec::new("missing", 10.0), "Go");
        assert!(matches!(missing, Err(LayoutError::PdfError(_))));
    }
}
