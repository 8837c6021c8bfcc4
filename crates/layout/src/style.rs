//! Style types for flowables

use pdf_core::{Align, Color, FontStyle as PdfFontStyle, FontWeight};

/// Font style as used by layout (weight and slant combined)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Split into the weight/style pair pdf-core works with
    pub fn to_pdf(self) -> (FontWeight, PdfFontStyle) {
        match self {
            FontStyle::Regular => (FontWeight::Regular, PdfFontStyle::Normal),
            FontStyle::Bold => (FontWeight::Bold, PdfFontStyle::Normal),
            FontStyle::Italic => (FontWeight::Regular, PdfFontStyle::Italic),
            FontStyle::BoldItalic => (FontWeight::Bold, PdfFontStyle::Italic),
        }
    }
}

/// A font family, size and style
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Family name registered with the document
    pub family: String,
    /// Size in points
    pub size: f32,
    pub style: FontStyle,
}

impl FontSpec {
    pub fn new(family: &str, size: f32) -> Self {
        Self {
            family: family.to_string(),
            size,
            style: FontStyle::Regular,
        }
    }

    /// Same family and size with another style
    pub fn with_style(&self, style: FontStyle) -> Self {
        Self {
            family: self.family.clone(),
            size: self.size,
            style,
        }
    }

    /// Default line spacing (1.2 x size)
    pub fn default_leading(&self) -> f64 {
        self.size as f64 * 1.2
    }
}

/// Paragraph formatting
#[derive(Debug, Clone, PartialEq)]
pub struct ParagraphStyle {
    pub font: FontSpec,
    /// Baseline-to-baseline distance
    pub leading: f64,
    pub color: Color,
    pub align: Align,
    /// Vertical space before the paragraph, dropped at the top of a page
    pub space_before: f64,
    pub space_after: f64,
    pub left_indent: f64,
    /// Render all text upper-cased
    pub upper_case: bool,
}

impl ParagraphStyle {
    pub fn new(font: FontSpec) -> Self {
        Self {
            leading: font.default_leading(),
            font,
            color: Color::black(),
            align: Align::Left,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            upper_case: false,
        }
    }

    pub fn leading(mut self, leading: f64) -> Self {
        self.leading = leading;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn space_before(mut self, space: f64) -> Self {
        self.space_before = space;
        self
    }

    pub fn space_after(mut self, space: f64) -> Self {
        self.space_after = space;
        self
    }

    pub fn left_indent(mut self, indent: f64) -> Self {
        self.left_indent = indent;
        self
    }

    pub fn upper_case(mut self) -> Self {
        self.upper_case = true;
        self
    }
}

/// Cell padding in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPadding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for CellPadding {
    fn default() -> Self {
        Self {
            left: 6.0,
            right: 6.0,
            top: 3.0,
            bottom: 3.0,
        }
    }
}

/// Stroke width and colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub width: f64,
    pub color: Color,
}

/// Styling of the first row of a table
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderStyle {
    pub background: Option<Color>,
    pub text_color: Color,
    pub font: FontSpec,
    /// Replaces the default bottom padding for the header row
    pub bottom_padding: f64,
}

/// Table formatting
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Font of plain text cells
    pub font: FontSpec,
    pub leading: f64,
    pub text_color: Color,
    /// Alignment of text inside cells
    pub align: Align,
    pub padding: CellPadding,
    /// Full grid around every cell
    pub grid: Option<LineStyle>,
    pub header: Option<HeaderStyle>,
    /// Position of the table inside the frame
    pub h_align: Align,
}

impl TableStyle {
    pub fn new(font: FontSpec) -> Self {
        Self {
            leading: font.default_leading(),
            font,
            text_color: Color::black(),
            align: Align::Left,
            padding: CellPadding::default(),
            grid: None,
            header: None,
            h_align: Align::Center,
        }
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn grid(mut self, width: f64, color: Color) -> Self {
        self.grid = Some(LineStyle { width, color });
        self
    }

    pub fn header(mut self, header: HeaderStyle) -> Self {
        self.header = Some(header);
        self
    }
}
