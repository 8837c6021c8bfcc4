//! Page template and pagination

use crate::unit::Unit;
use crate::{Flowable, Result, TextMeasure};
use pdf_core::{PageSize, PdfDocument};

/// Tolerance for fitting a unit into the remaining frame height
const EPSILON: f64 = 1e-6;

/// Page margins in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Same margin on every side
    pub fn uniform(margin: f64) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

/// A unit with its vertical position on a page
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedUnit {
    /// Top of the unit (top-origin page coordinates)
    pub y: f64,
    pub unit: Unit,
}

/// Result of paginating a story: the placed units of every page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPlan {
    pub pages: Vec<Vec<PlacedUnit>>,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All placed text of a page, in drawing order
    pub fn page_text(&self, page: usize) -> Vec<String> {
        self.pages
            .get(page)
            .into_iter()
            .flatten()
            .flat_map(|p| p.unit.texts.iter().map(|t| t.text.clone()))
            .collect()
    }
}

/// A single-frame page template
///
/// Flowables are laid out top to bottom inside the frame; a unit that does
/// not fit the remaining height moves to a new page, and one taller than the
/// frame is split between lines first. Vertical space at the top of a page
/// is dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocTemplate {
    pub page_size: PageSize,
    pub margins: Margins,
}

impl DocTemplate {
    pub fn new(page_size: PageSize, margin: f64) -> Self {
        Self {
            page_size,
            margins: Margins::uniform(margin),
        }
    }

    /// Width available to flowables
    pub fn frame_width(&self) -> f64 {
        self.page_size.width - self.margins.left - self.margins.right
    }

    /// Height available to flowables on each page
    pub fn frame_height(&self) -> f64 {
        self.page_size.height - self.margins.top - self.margins.bottom
    }

    /// Lower and paginate a story without drawing it
    ///
    /// Always yields at least one page.
    pub fn plan(&self, measure: &dyn TextMeasure, story: &[Flowable]) -> Result<LayoutPlan> {
        let frame_width = self.frame_width();
        let frame_top = self.margins.top;
        let frame_bottom = self.page_size.height - self.margins.bottom;

        let frame_height = self.frame_height();

        let mut pages: Vec<Vec<PlacedUnit>> = vec![Vec::new()];
        let mut y = frame_top;

        for flowable in story {
            let units = flowable.lower(measure, frame_width)?;
            for unit in units.into_iter().flat_map(|unit| unit.split(frame_height)) {
                let at_top = pages.last().map_or(true, |p| p.is_empty());

                if unit.discardable && at_top {
                    continue;
                }

                if y + unit.height > frame_bottom + EPSILON {
                    // Space that does not fit ends the page without starting
                    // a new one, so a trailing gap never adds a blank page
                    if unit.discardable {
                        y = frame_bottom;
                        continue;
                    }
                    if !at_top {
                        pages.push(Vec::new());
                        y = frame_top;
                    }
                    // Only a single line taller than the whole frame gets here
                    if unit.height > frame_height + EPSILON {
                        tracing::warn!(
                            height = unit.height,
                            frame = frame_height,
                            "unit taller than frame, overflowing"
                        );
                    }
                }

                let height = unit.height;
                if let Some(page) = pages.last_mut() {
                    page.push(PlacedUnit { y, unit });
                }
                y += height;
            }
        }

        tracing::debug!(pages = pages.len(), "paginated story");
        Ok(LayoutPlan { pages })
    }

    /// Lay out `story` into `doc`, adding pages as needed
    ///
    /// # Returns
    /// Number of pages used
    pub fn build(&self, doc: &mut PdfDocument, story: &[Flowable]) -> Result<usize> {
        let plan = self.plan(&*doc, story)?;

        for placed_units in &plan.pages {
            let page = doc.add_blank_page(self.page_size)?;
            for placed in placed_units {
                placed.unit.draw(doc, page, self.margins.left, placed.y)?;
            }
        }

        Ok(plan.page_count())
    }
}
