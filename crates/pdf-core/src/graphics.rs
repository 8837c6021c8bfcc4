//! Vector drawing operators (lines and rectangles)

use crate::document::Color;
use crate::text::fmt_num;

/// How a rectangle is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RectPaint {
    /// Fill with a solid color
    Fill(Color),
    /// Stroke the outline with the given line width
    Stroke { color: Color, width: f64 },
}

/// Generate PDF operators for a straight line
///
/// All coordinates are PDF coordinates (origin bottom-left).
///
/// # Arguments
/// * `from` - Start point (x, y)
/// * `to` - End point (x, y)
/// * `width` - Line width in points
/// * `color` - Stroke color
pub fn line_operators(from: (f64, f64), to: (f64, f64), width: f64, color: Color) -> Vec<u8> {
    // q / RG / w / m / l / S / Q
    format!(
        "q\n{} {} {} RG\n{} w\n{} {} m\n{} {} l\nS\nQ\n",
        fmt_num(color.r as f64),
        fmt_num(color.g as f64),
        fmt_num(color.b as f64),
        fmt_num(width),
        fmt_num(from.0),
        fmt_num(from.1),
        fmt_num(to.0),
        fmt_num(to.1),
    )
    .into_bytes()
}

/// Generate PDF operators for a rectangle
///
/// `x`/`y` is the lower-left corner in PDF coordinates.
pub fn rect_operators(x: f64, y: f64, width: f64, height: f64, paint: RectPaint) -> Vec<u8> {
    let rect = format!(
        "{} {} {} {} re",
        fmt_num(x),
        fmt_num(y),
        fmt_num(width),
        fmt_num(height)
    );

    match paint {
        RectPaint::Fill(color) => format!(
            "q\n{} {} {} rg\n{rect}\nf\nQ\n",
            fmt_num(color.r as f64),
            fmt_num(color.g as f64),
            fmt_num(color.b as f64),
        ),
        RectPaint::Stroke { color, width } => format!(
            "q\n{} {} {} RG\n{} w\n{rect}\nS\nQ\n",
            fmt_num(color.r as f64),
            fmt_num(color.g as f64),
            fmt_num(color.b as f64),
            fmt_num(width),
        ),
    }
    .into_bytes()
}
