//! Built-in (standard 14) Type1 fonts
//!
//! These fonts are guaranteed to be available in every PDF viewer, so they
//! are referenced by name instead of being embedded. Text is encoded with
//! WinAnsiEncoding; metrics come from the Adobe AFM files.

use crate::font::{FontStyle, FontWeight};
use lopdf::{Dictionary, Object};

/// Built-in font families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StandardFamily {
    #[default]
    Helvetica,
    Courier,
}

/// A single built-in font face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

/// Helvetica advance widths for ASCII 32..=126
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for ASCII 32..=126
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Courier is monospaced
const COURIER_WIDTH: u16 = 600;

/// Fallback width for WinAnsi glyphs without a dedicated entry
const DEFAULT_HIGH_WIDTH: u16 = 556;

/// Map a character to its WinAnsiEncoding byte
///
/// Returns `None` for characters the encoding cannot represent.
pub fn encode_win_ansi(c: char) -> Option<u8> {
    let code = c as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => match c {
            '€' => Some(0x80),
            '‚' => Some(0x82),
            'ƒ' => Some(0x83),
            '„' => Some(0x84),
            '…' => Some(0x85),
            '†' => Some(0x86),
            '‡' => Some(0x87),
            'ˆ' => Some(0x88),
            '‰' => Some(0x89),
            'Š' => Some(0x8A),
            '‹' => Some(0x8B),
            'Œ' => Some(0x8C),
            'Ž' => Some(0x8E),
            '‘' => Some(0x91),
            '’' => Some(0x92),
            '“' => Some(0x93),
            '”' => Some(0x94),
            '•' => Some(0x95),
            '–' => Some(0x96),
            '—' => Some(0x97),
            '˜' => Some(0x98),
            '™' => Some(0x99),
            'š' => Some(0x9A),
            '›' => Some(0x9B),
            'œ' => Some(0x9C),
            'ž' => Some(0x9E),
            'Ÿ' => Some(0x9F),
            _ => None,
        },
    }
}

impl StandardFont {
    /// Select the face of a family for the given weight and style
    pub fn variant(family: StandardFamily, weight: FontWeight, style: FontStyle) -> Self {
        match (family, weight, style) {
            (StandardFamily::Helvetica, FontWeight::Regular, FontStyle::Normal) => Self::Helvetica,
            (StandardFamily::Helvetica, FontWeight::Bold, FontStyle::Normal) => Self::HelveticaBold,
            (StandardFamily::Helvetica, FontWeight::Regular, FontStyle::Italic) => {
                Self::HelveticaOblique
            }
            (StandardFamily::Helvetica, FontWeight::Bold, FontStyle::Italic) => {
                Self::HelveticaBoldOblique
            }
            (StandardFamily::Courier, FontWeight::Regular, FontStyle::Normal) => Self::Courier,
            (StandardFamily::Courier, FontWeight::Bold, FontStyle::Normal) => Self::CourierBold,
            (StandardFamily::Courier, FontWeight::Regular, FontStyle::Italic) => {
                Self::CourierOblique
            }
            (StandardFamily::Courier, FontWeight::Bold, FontStyle::Italic) => {
                Self::CourierBoldOblique
            }
        }
    }

    /// PostScript name used as /BaseFont
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
            Self::HelveticaOblique => "Helvetica-Oblique",
            Self::HelveticaBoldOblique => "Helvetica-BoldOblique",
            Self::Courier => "Courier",
            Self::CourierBold => "Courier-Bold",
            Self::CourierOblique => "Courier-Oblique",
            Self::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            Self::HelveticaBold
                | Self::HelveticaBoldOblique
                | Self::CourierBold
                | Self::CourierBoldOblique
        )
    }

    fn is_courier(&self) -> bool {
        matches!(
            self,
            Self::Courier | Self::CourierBold | Self::CourierOblique | Self::CourierBoldOblique
        )
    }

    /// Width of an encoded byte in 1/1000 em
    fn byte_width(&self, byte: u8) -> u16 {
        if self.is_courier() {
            return COURIER_WIDTH;
        }

        let ascii = if self.is_bold() {
            &HELVETICA_BOLD_WIDTHS
        } else {
            &HELVETICA_WIDTHS
        };

        match byte {
            0x20..=0x7E => ascii[(byte - 0x20) as usize],
            _ => self.high_byte_width(byte, ascii),
        }
    }

    /// Widths for the upper half of WinAnsiEncoding
    ///
    /// Accented Latin-1 letters share the advance of their base letter.
    fn high_byte_width(&self, byte: u8, ascii: &[u16; 95]) -> u16 {
        let bold = self.is_bold();
        let base = |c: u8| ascii[(c - 0x20) as usize];

        match byte {
            0x82 | 0x91 | 0x92 => {
                if bold {
                    278
                } else {
                    222
                }
            }
            0x84 | 0x93 | 0x94 => {
                if bold {
                    500
                } else {
                    333
                }
            }
            0x85 | 0x89 | 0x8C | 0x97 | 0x99 => 1000,
            0x88 | 0x8B | 0x98 | 0x9B => 333,
            0x95 => 350,
            0x96 => 556,
            0x8A => base(b'S'),
            0x8E => base(b'Z'),
            0x9A => base(b's'),
            0x9E => base(b'z'),
            0x9C => 944,
            0x9F | 0xDD => base(b'Y'),
            0xA0 => 278,
            0xC0..=0xC5 => base(b'A'),
            0xC6 => 1000,
            0xC7 => base(b'C'),
            0xC8..=0xCB => base(b'E'),
            0xCC..=0xCF => base(b'I'),
            0xD1 => base(b'N'),
            0xD2..=0xD6 | 0xD8 => base(b'O'),
            0xD7 | 0xF7 => 584,
            0xD9..=0xDC => base(b'U'),
            0xDF => 611,
            0xE0..=0xE5 => base(b'a'),
            0xE6 => 889,
            0xE7 => base(b'c'),
            0xE8..=0xEB => base(b'e'),
            0xEC..=0xEF => 278,
            0xF1 => base(b'n'),
            0xF2..=0xF6 => base(b'o'),
            0xF8 => 611,
            0xF9..=0xFC => base(b'u'),
            0xFD | 0xFF => base(b'y'),
            0xFE => base(b'p'),
            _ => DEFAULT_HIGH_WIDTH,
        }
    }

    /// Whether the character can be shown with this font
    pub fn has_glyph(&self, c: char) -> bool {
        encode_win_ansi(c).is_some()
    }

    /// Width of a character in 1/1000 em
    ///
    /// Characters outside WinAnsiEncoding are measured as `?`, which is
    /// what they are rendered as.
    pub fn char_width(&self, c: char) -> u16 {
        self.byte_width(encode_win_ansi(c).unwrap_or(b'?'))
    }

    /// Width of a string in 1/1000 em
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars().map(|c| self.char_width(c) as u32).sum()
    }

    /// Encode text as a PDF literal string operand, e.g. `(Hello)`
    ///
    /// Delimiters are escaped and bytes outside printable ASCII are written
    /// as octal escapes so the content stream stays 7-bit clean.
    pub fn encode_literal(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 2);
        out.push('(');
        for c in text.chars() {
            let byte = encode_win_ansi(c).unwrap_or(b'?');
            match byte {
                b'(' | b')' | b'\\' => {
                    out.push('\\');
                    out.push(byte as char);
                }
                0x20..=0x7E => out.push(byte as char),
                _ => out.push_str(&format!("\\{byte:03o}")),
            }
        }
        out.push(')');
        out
    }

    /// Font dictionary referencing the built-in face
    pub fn to_pdf_dictionary(&self) -> Dictionary {
        Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type1".to_vec())),
            ("BaseFont", Object::Name(self.base_font().as_bytes().to_vec())),
            ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi('A'), Some(0x41));
        assert_eq!(encode_win_ansi('é'), Some(0xE9));
        assert_eq!(encode_win_ansi('–'), Some(0x96));
        assert_eq!(encode_win_ansi('•'), Some(0x95));
        assert_eq!(encode_win_ansi('ส'), None);
        assert_eq!(encode_win_ansi('\n'), None);
    }

    #[test]
    fn test_variant_selection() {
        assert_eq!(
            StandardFont::variant(StandardFamily::Helvetica, FontWeight::Bold, FontStyle::Normal),
            StandardFont::HelveticaBold
        );
        assert_eq!(
            StandardFont::variant(StandardFamily::Helvetica, FontWeight::Regular, FontStyle::Italic),
            StandardFont::HelveticaOblique
        );
        assert_eq!(
            StandardFont::variant(StandardFamily::Courier, FontWeight::Bold, FontStyle::Italic),
            StandardFont::CourierBoldOblique
        );
    }

    #[test]
    fn test_helvetica_widths() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width(' '), 278);
        assert_eq!(font.char_width('A'), 667);
        assert_eq!(font.char_width('i'), 222);
        assert_eq!(font.char_width('~'), 584);
        // "Go" = 778 + 556
        assert_eq!(font.text_width("Go"), 1334);
    }

    #[test]
    fn test_bold_is_wider() {
        let regular = StandardFont::Helvetica.text_width("Jane Doe");
        let bold = StandardFont::HelveticaBold.text_width("Jane Doe");
        assert!(bold > regular);
    }

    #[test]
    fn test_oblique_shares_regular_metrics() {
        assert_eq!(
            StandardFont::Helvetica.text_width("(2021-2023)"),
            StandardFont::HelveticaOblique.text_width("(2021-2023)")
        );
    }

    #[test]
    fn test_courier_is_monospaced() {
        assert_eq!(StandardFont::Courier.text_width("iiii"), 2400);
        assert_eq!(StandardFont::CourierBold.text_width("WWWW"), 2400);
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width('é'), font.char_width('e'));
        assert_eq!(font.char_width('Ü'), font.char_width('U'));
    }

    #[test]
    fn test_unencodable_measured_as_question_mark() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.char_width('ส'), font.char_width('?'));
        assert!(!font.has_glyph('ส'));
        assert!(font.has_glyph('ñ'));
    }

    #[test]
    fn test_encode_literal_escapes() {
        let font = StandardFont::Helvetica;
        assert_eq!(font.encode_literal("Hello"), "(Hello)");
        assert_eq!(font.encode_literal("(2020)"), "(\\(2020\\))");
        assert_eq!(font.encode_literal("a\\b"), "(a\\\\b)");
        assert_eq!(font.encode_literal("Dev – Acme"), "(Dev \\226 Acme)");
        assert_eq!(font.encode_literal("ส"), "(?)");
    }

    #[test]
    fn test_pdf_dictionary() {
        let dict = StandardFont::HelveticaBold.to_pdf_dictionary();
        assert_eq!(
            dict.get(b"BaseFont").unwrap(),
            &Object::Name(b"Helvetica-Bold".to_vec())
        );
        assert_eq!(
            dict.get(b"Encoding").unwrap(),
            &Object::Name(b"WinAnsiEncoding".to_vec())
        );
    }
}
