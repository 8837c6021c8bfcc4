//! Paragraphs and word wrapping

use crate::unit::{PlacedText, Unit};
use crate::{FontSpec, FontStyle, ParagraphStyle, Result, TextMeasure};
use pdf_core::Align;

/// Tolerance for width comparisons
const EPSILON: f64 = 1e-6;

/// A span of text in one font style
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: FontStyle,
}

impl TextRun {
    pub fn new(text: impl Into<String>, style: FontStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn regular(text: impl Into<String>) -> Self {
        Self::new(text, FontStyle::Regular)
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self::new(text, FontStyle::Bold)
    }

    pub fn italic(text: impl Into<String>) -> Self {
        Self::new(text, FontStyle::Italic)
    }
}

/// Measured text in a single font
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub text: String,
    pub font: FontSpec,
    pub width: f64,
}

/// One wrapped line of a paragraph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub fragments: Vec<Fragment>,
    pub width: f64,
}

impl Line {
    fn push(&mut self, fragment: Fragment) {
        self.width += fragment.width;
        match self.fragments.last_mut() {
            Some(last) if last.font == fragment.font => {
                last.text.push_str(&fragment.text);
                last.width += fragment.width;
            }
            _ => self.fragments.push(fragment),
        }
    }

    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Plain text of the line
    pub fn text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

/// An unbreakable word, possibly spanning several runs
struct Word {
    pieces: Vec<(String, FontStyle)>,
    /// Style of the whitespace preceding the word, if any
    space: Option<FontStyle>,
}

enum Token {
    Word(Word),
    Break,
}

/// A block of styled text, wrapped to the available width
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub style: ParagraphStyle,
}

impl Paragraph {
    pub fn new(runs: Vec<TextRun>, style: ParagraphStyle) -> Self {
        Self { runs, style }
    }

    /// Single run in the style's own font
    pub fn plain(text: impl Into<String>, style: ParagraphStyle) -> Self {
        let run = TextRun::new(text, style.font.style);
        Self::new(vec![run], style)
    }

    fn tokenize(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut current: Option<Word> = None;
        let mut pending_space: Option<FontStyle> = None;

        for run in &self.runs {
            let text = if self.style.upper_case {
                run.text.to_uppercase()
            } else {
                run.text.clone()
            };

            for c in text.chars() {
                if c == '\n' {
                    tokens.extend(current.take().map(Token::Word));
                    tokens.push(Token::Break);
                    pending_space = None;
                } else if c.is_whitespace() {
                    tokens.extend(current.take().map(Token::Word));
                    pending_space.get_or_insert(run.style);
                } else {
                    let word = current.get_or_insert_with(|| Word {
                        pieces: Vec::new(),
                        space: pending_space.take(),
                    });
                    match word.pieces.last_mut() {
                        Some((piece, style)) if *style == run.style => piece.push(c),
                        _ => word.pieces.push((c.to_string(), run.style)),
                    }
                }
            }
        }
        tokens.extend(current.take().map(Token::Word));

        tokens
    }

    /// Greedy word wrap
    ///
    /// Words are broken at whitespace only; a word wider than `width` is put
    /// on a line of its own. `\n` forces a line break.
    pub fn wrap(&self, measure: &dyn TextMeasure, width: f64) -> Result<Vec<Line>> {
        let mut lines = Vec::new();
        let mut line = Line::default();

        for token in self.tokenize() {
            let word = match token {
                Token::Break => {
                    lines.push(std::mem::take(&mut line));
                    continue;
                }
                Token::Word(word) => word,
            };

            let mut fragments = Vec::with_capacity(word.pieces.len());
            let mut word_width = 0.0;
            for (text, style) in word.pieces {
                let font = self.style.font.with_style(style);
                let width = measure.text_width(&font, &text)?;
                word_width += width;
                fragments.push(Fragment { text, font, width });
            }

            let space = match word.space {
                Some(style) if !line.is_empty() => {
                    let font = self.style.font.with_style(style);
                    let width = measure.text_width(&font, " ")?;
                    Some(Fragment {
                        text: " ".to_string(),
                        font,
                        width,
                    })
                }
                _ => None,
            };
            let space_width = space.as_ref().map_or(0.0, |s| s.width);

            if !line.is_empty() && line.width + space_width + word_width > width + EPSILON {
                lines.push(std::mem::take(&mut line));
            } else if let Some(space) = space {
                line.push(space);
            }
            for fragment in fragments {
                line.push(fragment);
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }

        Ok(lines)
    }

    /// Position the fragments of a line inside `[dx, dx + width]`
    pub(crate) fn place_line(
        &self,
        line: &Line,
        dx: f64,
        width: f64,
        baseline: f64,
    ) -> Vec<PlacedText> {
        let mut x = dx + match self.style.align {
            Align::Left => 0.0,
            Align::Center => (width - line.width) / 2.0,
            Align::Right => width - line.width,
        };

        let mut placed = Vec::with_capacity(line.fragments.len());
        for fragment in &line.fragments {
            if !fragment.text.trim().is_empty() {
                placed.push(PlacedText {
                    dx: x,
                    baseline,
                    font: fragment.font.clone(),
                    color: self.style.color,
                    text: fragment.text.clone(),
                });
            }
            x += fragment.width;
        }
        placed
    }

    /// One unit per line, plus gaps for the surrounding space
    pub(crate) fn lower(&self, measure: &dyn TextMeasure, frame_width: f64) -> Result<Vec<Unit>> {
        let mut units = Vec::new();
        if self.style.space_before > 0.0 {
            units.push(Unit::gap(self.style.space_before));
        }

        let dx = self.style.left_indent;
        let width = frame_width - dx;
        let baseline = self.style.font.size as f64;
        for line in self.wrap(measure, width)? {
            let mut unit = Unit::content(self.style.leading);
            unit.texts = self.place_line(&line, dx, width, baseline);
            units.push(unit);
        }

        if self.style.space_after > 0.0 {
            units.push(Unit::gap(self.style.space_after));
        }
        Ok(units)
    }
}
