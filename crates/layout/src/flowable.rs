//! Flowable content

use crate::unit::{Shape, Unit};
use crate::{BulletList, LineStyle, Paragraph, Result, Table, TextMeasure};
use pdf_core::Align;

/// A horizontal line with a fixed width, drawn along the bottom of its box
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub width: f64,
    /// Height of the box the line sits under
    pub height: f64,
    pub line: LineStyle,
    pub h_align: Align,
}

impl Rule {
    /// Centred rule
    pub fn new(width: f64, height: f64, line: LineStyle) -> Self {
        Self {
            width,
            height,
            line,
            h_align: Align::Center,
        }
    }

    fn lower(&self, frame_width: f64) -> Unit {
        let dx = match self.h_align {
            Align::Left => 0.0,
            Align::Center => (frame_width - self.width) / 2.0,
            Align::Right => frame_width - self.width,
        };

        let mut unit = Unit::content(self.height);
        unit.shapes.push(Shape::Line {
            from: (dx, self.height),
            to: (dx + self.width, self.height),
            width: self.line.width,
            color: self.line.color,
        });
        unit
    }
}

/// Anything that can be placed in the story
#[derive(Debug, Clone, PartialEq)]
pub enum Flowable {
    Paragraph(Paragraph),
    /// Vertical space
    Spacer(f64),
    Rule(Rule),
    Table(Table),
    BulletList(BulletList),
}

impl Flowable {
    /// Break into atomic units for pagination
    pub fn lower(&self, measure: &dyn TextMeasure, frame_width: f64) -> Result<Vec<Unit>> {
        match self {
            Flowable::Paragraph(p) => p.lower(measure, frame_width),
            Flowable::Spacer(height) => Ok(vec![Unit::gap(*height)]),
            Flowable::Rule(rule) => Ok(vec![rule.lower(frame_width)]),
            Flowable::Table(table) => table.lower(measure, frame_width),
            Flowable::BulletList(list) => list.lower(measure, frame_width),
        }
    }
}

impl From<Paragraph> for Flowable {
    fn from(p: Paragraph) -> Self {
        Flowable::Paragraph(p)
    }
}

impl From<Table> for Flowable {
    fn from(t: Table) -> Self {
        Flowable::Table(t)
    }
}

impl From<BulletList> for Flowable {
    fn from(l: BulletList) -> Self {
        Flowable::BulletList(l)
    }
}

impl From<Rule> for Flowable {
    fn from(r: Rule) -> Self {
        Flowable::Rule(r)
    }
}
