//! Bulleted lists

use crate::unit::{PlacedText, Unit};
use crate::{Paragraph, ParagraphStyle, Result, TextMeasure};

/// An unordered list; every item is a paragraph with a bullet on its first line
#[derive(Debug, Clone, PartialEq)]
pub struct BulletList {
    pub items: Vec<Paragraph>,
    pub bullet: String,
    /// Indent of the item text
    pub left_indent: f64,
    /// Indent of the bullet glyph
    pub bullet_indent: f64,
}

impl BulletList {
    /// Plain-text items sharing one style
    pub fn new<I, S>(items: I, style: &ParagraphStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items
                .into_iter()
                .map(|text| Paragraph::plain(text, style.clone()))
                .collect(),
            bullet: "•".to_string(),
            left_indent: 18.0,
            bullet_indent: 6.0,
        }
    }

    pub(crate) fn lower(&self, measure: &dyn TextMeasure, frame_width: f64) -> Result<Vec<Unit>> {
        let mut units = Vec::new();
        let width = frame_width - self.left_indent;

        for item in &self.items {
            let style = &item.style;
            let baseline = style.font.size as f64;

            for (i, line) in item.wrap(measure, width)?.iter().enumerate() {
                let mut unit = Unit::content(style.leading);
                if i == 0 {
                    unit.texts.push(PlacedText {
                        dx: self.bullet_indent,
                        baseline,
                        font: style.font.clone(),
                        color: style.color,
                        text: self.bullet.clone(),
                    });
                }
                unit.texts
                    .extend(item.place_line(line, self.left_indent, width, baseline));
                units.push(unit);
            }
        }

        Ok(units)
    }
}
