//! Tables with fixed column widths

use crate::unit::{PlacedText, Shape, Unit};
use crate::{LayoutError, Paragraph, Result, TableStyle, TextMeasure};
use pdf_core::Align;

/// Content of a table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Plain string in the table font; `\n` starts a new line, no wrapping
    Text(String),
    /// Wrapped paragraph with its own style
    Paragraph(Paragraph),
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(text)
    }
}

/// A grid of cells; the first row is the header when the style has one
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub col_widths: Vec<f64>,
    pub rows: Vec<Vec<Cell>>,
    pub style: TableStyle,
}

impl Table {
    pub fn new(col_widths: Vec<f64>, rows: Vec<Vec<Cell>>, style: TableStyle) -> Self {
        Self {
            col_widths,
            rows,
            style,
        }
    }

    /// Sum of the column widths
    pub fn width(&self) -> f64 {
        self.col_widths.iter().sum()
    }

    fn validate(&self) -> Result<()> {
        if self.col_widths.is_empty() {
            return Err(LayoutError::InvalidTable("no columns".to_string()));
        }
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != self.col_widths.len() {
                return Err(LayoutError::InvalidTable(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    self.col_widths.len()
                )));
            }
        }
        Ok(())
    }

    /// One unit per row
    pub(crate) fn lower(&self, measure: &dyn TextMeasure, frame_width: f64) -> Result<Vec<Unit>> {
        self.validate()?;

        let table_width = self.width();
        let table_dx = match self.style.h_align {
            Align::Left => 0.0,
            Align::Center => (frame_width - table_width) / 2.0,
            Align::Right => frame_width - table_width,
        };

        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.lower_row(measure, index, row, table_dx))
            .collect()
    }

    fn lower_row(
        &self,
        measure: &dyn TextMeasure,
        index: usize,
        row: &[Cell],
        table_dx: f64,
    ) -> Result<Unit> {
        let style = &self.style;
        let header = style.header.as_ref().filter(|_| index == 0);
        let padding = style.padding;
        let bottom_padding = header.map_or(padding.bottom, |h| h.bottom_padding);
        let font = header.map_or(&style.font, |h| &h.font);
        let text_color = header.map_or(style.text_color, |h| h.text_color);
        let leading = if header.is_some() {
            font.default_leading()
        } else {
            style.leading
        };

        let mut texts: Vec<PlacedText> = Vec::new();
        let mut content_height: f64 = 0.0;
        let mut cell_dx = table_dx;

        for (cell, &col_width) in row.iter().zip(&self.col_widths) {
            let inner_dx = cell_dx + padding.left;
            let inner_width = col_width - padding.left - padding.right;

            match cell {
                Cell::Text(text) => {
                    let lines: Vec<&str> = if text.is_empty() {
                        Vec::new()
                    } else {
                        text.split('\n').collect()
                    };
                    content_height = content_height.max(lines.len() as f64 * leading);

                    for (i, line) in lines.iter().enumerate() {
                        if line.is_empty() {
                            continue;
                        }
                        let width = measure.text_width(font, line)?;
                        let dx = inner_dx
                            + match style.align {
                                Align::Left => 0.0,
                                Align::Center => (inner_width - width) / 2.0,
                                Align::Right => inner_width - width,
                            };
                        texts.push(PlacedText {
                            dx,
                            baseline: padding.top + font.size as f64 + i as f64 * leading,
                            font: font.clone(),
                            color: text_color,
                            text: line.to_string(),
                        });
                    }
                }
                Cell::Paragraph(paragraph) => {
                    let lines = paragraph.wrap(measure, inner_width)?;
                    content_height =
                        content_height.max(lines.len() as f64 * paragraph.style.leading);

                    for (i, line) in lines.iter().enumerate() {
                        let baseline = padding.top
                            + paragraph.style.font.size as f64
                            + i as f64 * paragraph.style.leading;
                        texts.extend(paragraph.place_line(line, inner_dx, inner_width, baseline));
                    }
                }
            }

            cell_dx += col_width;
        }

        let height = padding.top + content_height + bottom_padding;
        let mut unit = Unit::content(height);

        if let Some(background) = header.and_then(|h| h.background) {
            unit.shapes.push(Shape::FillRect {
                dx: table_dx,
                dy: 0.0,
                width: self.width(),
                height,
                color: background,
            });
        }

        if let Some(grid) = style.grid {
            let mut dx = table_dx;
            for &col_width in &self.col_widths {
                unit.shapes.push(Shape::StrokeRect {
                    dx,
                    dy: 0.0,
                    width: col_width,
                    height,
                    line_width: grid.width,
                    color: grid.color,
                });
                dx += col_width;
            }
        }

        unit.texts = texts;
        Ok(unit)
    }
}
