//! Atomic layout units
//!
//! Every flowable is lowered into a sequence of units. A unit moves to the
//! next page as a whole unless it is taller than the frame, in which case it
//! is cut between lines of text first. Contents are positioned relative to
//! the unit's top-left corner (the left edge of the frame and the top of the
//! unit).

use crate::{FontSpec, Result};
use pdf_core::{Align, Color, PdfDocument};

const EPSILON: f64 = 1e-6;

/// A run of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    /// Left edge, relative to the frame
    pub dx: f64,
    /// Baseline, relative to the top of the unit
    pub baseline: f64,
    pub font: FontSpec,
    pub color: Color,
    pub text: String,
}

/// Vector graphics inside a unit
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    FillRect {
        dx: f64,
        dy: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    StrokeRect {
        dx: f64,
        dy: f64,
        width: f64,
        height: f64,
        line_width: f64,
        color: Color,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    },
}

impl Shape {
    /// The part of the shape between `start` and `end`, moved up by `start`
    fn clip(&self, start: f64, end: f64, owns: impl Fn(f64) -> bool) -> Option<Shape> {
        let clip_rect = |dy: f64, height: f64| {
            let top = dy.max(start);
            let bottom = (dy + height).min(end);
            (bottom - top > EPSILON).then(|| (top - start, bottom - top))
        };

        match *self {
            Shape::FillRect {
                dx,
                dy,
                width,
                height,
                color,
            } => clip_rect(dy, height).map(|(dy, height)| Shape::FillRect {
                dx,
                dy,
                width,
                height,
                color,
            }),
            Shape::StrokeRect {
                dx,
                dy,
                width,
                height,
                line_width,
                color,
            } => clip_rect(dy, height).map(|(dy, height)| Shape::StrokeRect {
                dx,
                dy,
                width,
                height,
                line_width,
                color,
            }),
            Shape::Line {
                from,
                to,
                width,
                color,
            } => owns(from.1.max(to.1)).then(|| Shape::Line {
                from: (from.0, from.1 - start),
                to: (to.0, to.1 - start),
                width,
                color,
            }),
        }
    }
}

/// A vertical slice of content with a fixed height
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub height: f64,
    /// Vertical space only; dropped at the top of a page
    pub discardable: bool,
    pub texts: Vec<PlacedText>,
    pub shapes: Vec<Shape>,
}

impl Unit {
    /// Empty vertical space
    pub fn gap(height: f64) -> Self {
        Self {
            height,
            discardable: true,
            texts: Vec::new(),
            shapes: Vec::new(),
        }
    }

    pub(crate) fn content(height: f64) -> Self {
        Self {
            height,
            discardable: false,
            texts: Vec::new(),
            shapes: Vec::new(),
        }
    }

    /// Cut the unit into slices no taller than `max_height`
    ///
    /// Cuts fall between lines of text; a text belongs to the slice that
    /// holds its baseline. Rectangles are clipped to every slice they cross.
    /// A unit that fits is returned as is.
    pub fn split(self, max_height: f64) -> Vec<Unit> {
        if self.height <= max_height + EPSILON || max_height <= 0.0 {
            return vec![self];
        }
        tracing::debug!(
            height = self.height,
            max_height,
            "splitting unit taller than frame"
        );

        let mut slices = Vec::new();
        let mut start = 0.0;
        while start < self.height - EPSILON {
            let cut = self.cut_below(start, (start + max_height).min(self.height));
            let last = cut >= self.height - EPSILON;
            let first = slices.is_empty();
            let owns = |y: f64| (first || y > start + EPSILON) && (last || y <= cut + EPSILON);

            let mut slice = Unit {
                height: cut - start,
                discardable: self.discardable,
                texts: Vec::new(),
                shapes: Vec::new(),
            };
            slice.texts = self
                .texts
                .iter()
                .filter(|t| owns(t.baseline))
                .map(|t| PlacedText {
                    baseline: t.baseline - start,
                    ..t.clone()
                })
                .collect();
            slice.shapes = self
                .shapes
                .iter()
                .filter_map(|shape| shape.clip(start, cut, &owns))
                .collect();

            slices.push(slice);
            start = cut;
        }
        slices
    }

    /// Highest cut at or above `limit` that runs through no line of text
    fn cut_below(&self, start: f64, limit: f64) -> f64 {
        let mut cut = limit;
        // A text spans [baseline - size, baseline]
        while let Some(top) = self
            .texts
            .iter()
            .map(|t| (t.baseline - t.font.size as f64, t.baseline))
            .filter(|&(top, baseline)| top < cut - EPSILON && baseline > cut + EPSILON)
            .map(|(top, _)| top)
            .reduce(f64::min)
        {
            if top <= start + EPSILON {
                break;
            }
            cut = top;
        }
        cut
    }

    /// Draw the unit with its top-left corner at `(x, y)` (top-origin)
    pub fn draw(&self, doc: &mut PdfDocument, page: usize, x: f64, y: f64) -> Result<()> {
        for shape in &self.shapes {
            match *shape {
                Shape::FillRect {
                    dx,
                    dy,
                    width,
                    height,
                    color,
                } => doc.fill_rect(page, x + dx, y + dy, width, height, color)?,
                Shape::StrokeRect {
                    dx,
                    dy,
                    width,
                    height,
                    line_width,
                    color,
                } => doc.stroke_rect(page, x + dx, y + dy, width, height, line_width, color)?,
                Shape::Line {
                    from,
                    to,
                    width,
                    color,
                } => doc.draw_line(
                    page,
                    (x + from.0, y + from.1),
                    (x + to.0, y + to.1),
                    width,
                    color,
                )?,
            }
        }

        for text in &self.texts {
            let (weight, style) = text.font.style.to_pdf();
            doc.set_font(&text.font.family, text.font.size)?;
            doc.set_font_weight(weight)?;
            doc.set_font_style(style)?;
            doc.set_text_color(text.color);
            doc.insert_text(&text.text, page, x + text.dx, y + text.baseline, Align::Left)?;
        }

        Ok(())
    }
}
