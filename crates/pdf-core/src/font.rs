//! Font handling for PDF documents

use crate::standard::{StandardFamily, StandardFont};
use crate::{PdfError, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::BTreeSet;

/// Font weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Face-wide metrics, read once when a TrueType font is loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FaceMetrics {
    units_per_em: u16,
    ascender: i16,
    descender: i16,
}

/// Where the glyphs of a font come from
#[derive(Debug, Clone)]
enum FontProgram {
    /// Built-in Type1 font, referenced by name
    Standard(StandardFont),
    /// Raw TTF data, embedded as a CIDFontType2
    TrueType { data: Vec<u8>, metrics: FaceMetrics },
}

/// A single font face used by a document
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font name/identifier
    pub name: String,
    /// Characters used (for widths and ToUnicode)
    pub used_chars: BTreeSet<char>,
    program: FontProgram,
}

/// PDF objects generated for a font
pub enum FontObjects {
    /// Single font dictionary for a built-in font
    Simple(Dictionary),
    /// Object graph for an embedded TrueType font
    Composite {
        /// Type0 font dictionary
        type0_font: Dictionary,
        /// CIDFont Type2 dictionary
        cid_font: Dictionary,
        /// Font descriptor dictionary
        font_descriptor: Dictionary,
        /// Font file stream (TTF data)
        font_file_stream: Stream,
        /// ToUnicode CMap stream
        tounicode_stream: Stream,
    },
}

/// Font family with variants
#[derive(Debug, Clone, Default)]
pub struct FontFamily {
    /// Regular variant (required)
    pub regular: Option<FontData>,
    /// Bold variant
    pub bold: Option<FontData>,
    /// Italic variant
    pub italic: Option<FontData>,
    /// Bold italic variant
    pub bold_italic: Option<FontData>,
}

impl FontFamily {
    /// Build a family from one of the built-in Type1 families
    ///
    /// All four variants are always available.
    pub fn standard(family: StandardFamily) -> Self {
        let face = |weight, style| {
            let font = StandardFont::variant(family, weight, style);
            FontData::standard(font.base_font(), font)
        };

        Self {
            regular: Some(face(FontWeight::Regular, FontStyle::Normal)),
            bold: Some(face(FontWeight::Bold, FontStyle::Normal)),
            italic: Some(face(FontWeight::Regular, FontStyle::Italic)),
            bold_italic: Some(face(FontWeight::Bold, FontStyle::Italic)),
        }
    }

    /// Get the font data for the specified weight and style
    ///
    /// Falls back bold-italic → bold → italic → regular when a variant is
    /// missing.
    pub fn get_variant(&self, weight: FontWeight, style: FontStyle) -> Option<&FontData> {
        match (weight, style) {
            (FontWeight::Bold, FontStyle::Italic) => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref())
                .or(self.regular.as_ref()),
            (FontWeight::Bold, FontStyle::Normal) => self.bold.as_ref().or(self.regular.as_ref()),
            (FontWeight::Regular, FontStyle::Italic) => {
                self.italic.as_ref().or(self.regular.as_ref())
            }
            (FontWeight::Regular, FontStyle::Normal) => self.regular.as_ref(),
        }
    }

    /// Mutable counterpart of [`FontFamily::get_variant`]
    pub fn get_variant_mut(
        &mut self,
        weight: FontWeight,
        style: FontStyle,
    ) -> Option<&mut FontData> {
        let slot = match (weight, style) {
            (FontWeight::Bold, FontStyle::Italic) => {
                if self.bold_italic.is_some() {
                    &mut self.bold_italic
                } else if self.bold.is_some() {
                    &mut self.bold
                } else if self.italic.is_some() {
                    &mut self.italic
                } else {
                    &mut self.regular
                }
            }
            (FontWeight::Bold, FontStyle::Normal) => {
                if self.bold.is_some() {
                    &mut self.bold
                } else {
                    &mut self.regular
                }
            }
            (FontWeight::Regular, FontStyle::Italic) => {
                if self.italic.is_some() {
                    &mut self.italic
                } else {
                    &mut self.regular
                }
            }
            (FontWeight::Regular, FontStyle::Normal) => &mut self.regular,
        };
        slot.as_mut()
    }

    /// All variants that are present, in a fixed order
    pub fn variants(&self) -> impl Iterator<Item = &FontData> {
        [&self.regular, &self.bold, &self.italic, &self.bold_italic]
            .into_iter()
            .flatten()
    }

    /// Mutable iterator over the present variants
    pub fn variants_mut(&mut self) -> impl Iterator<Item = &mut FontData> {
        [
            &mut self.regular,
            &mut self.bold,
            &mut self.italic,
            &mut self.bold_italic,
        ]
        .into_iter()
        .flatten()
    }

    /// Check if the family can serve the given weight and style
    pub fn has_variant(&self, weight: FontWeight, style: FontStyle) -> bool {
        self.get_variant(weight, style).is_some()
    }
}

/// Builder for registering TrueType font families
#[derive(Default)]
pub struct FontFamilyBuilder {
    regular: Option<Vec<u8>>,
    bold: Option<Vec<u8>>,
    italic: Option<Vec<u8>>,
    bold_italic: Option<Vec<u8>>,
}

impl FontFamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regular(mut self, ttf_data: Vec<u8>) -> Self {
        self.regular = Some(ttf_data);
        self
    }

    pub fn bold(mut self, ttf_data: Vec<u8>) -> Self {
        self.bold = Some(ttf_data);
        self
    }

    pub fn italic(mut self, ttf_data: Vec<u8>) -> Self {
        self.italic = Some(ttf_data);
        self
    }

    pub fn bold_italic(mut self, ttf_data: Vec<u8>) -> Self {
        self.bold_italic = Some(ttf_data);
        self
    }

    /// Build the FontFamily from the provided TTF data
    pub fn build(self, family_name: &str) -> Result<FontFamily> {
        let Some(regular) = self.regular else {
            return Err(PdfError::FontParseError(
                "FontFamily must have at least a regular variant".to_string(),
            ));
        };
        let regular = FontData::from_ttf(&format!("{family_name}-regular"), &regular)?;

        let variant = |data: Option<Vec<u8>>, suffix: &str| {
            data.map(|data| FontData::from_ttf(&format!("{family_name}-{suffix}"), &data))
                .transpose()
        };

        Ok(FontFamily {
            regular: Some(regular),
            bold: variant(self.bold, "bold")?,
            italic: variant(self.italic, "italic")?,
            bold_italic: variant(self.bold_italic, "bold-italic")?,
        })
    }
}

impl FontData {
    /// Wrap a built-in Type1 font
    pub fn standard(name: &str, font: StandardFont) -> Self {
        Self {
            name: name.to_string(),
            used_chars: BTreeSet::new(),
            program: FontProgram::Standard(font),
        }
    }

    /// Create font data from TTF bytes
    ///
    /// # Arguments
    /// * `name` - Font identifier
    /// * `ttf_data` - TrueType font file bytes
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        let face = ttf_parser::Face::parse(ttf_data, 0)
            .map_err(|e| PdfError::FontParseError(format!("{name}: {e:?}")))?;
        let metrics = FaceMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
        };

        Ok(Self {
            name: name.to_string(),
            used_chars: BTreeSet::new(),
            program: FontProgram::TrueType {
                data: ttf_data.to_vec(),
                metrics,
            },
        })
    }

    /// Whether the font program is embedded in the output
    pub fn is_embedded(&self) -> bool {
        matches!(self.program, FontProgram::TrueType { .. })
    }

    /// Parse the TrueType face, if any
    ///
    /// Callers parse once per operation and reuse the face for every
    /// character of the text.
    fn face(&self) -> Option<ttf_parser::Face<'_>> {
        match &self.program {
            FontProgram::TrueType { data, .. } => ttf_parser::Face::parse(data, 0).ok(),
            FontProgram::Standard(_) => None,
        }
    }

    /// Add characters to the used set
    pub fn add_chars(&mut self, text: &str) {
        self.used_chars.extend(text.chars());
    }

    /// Get glyph ID for a character (TrueType only)
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Check if font has a glyph for the given character
    pub fn has_glyph(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.missing_glyph(c.encode_utf8(&mut buf)).is_none()
    }

    /// First character of `text` the font cannot draw
    pub fn missing_glyph(&self, text: &str) -> Option<char> {
        match &self.program {
            FontProgram::Standard(font) => text.chars().find(|&c| !font.has_glyph(c)),
            FontProgram::TrueType { .. } => {
                let face = self.face();
                text.chars().find(|&c| {
                    face.as_ref()
                        .and_then(|face| face.glyph_index(c))
                        .map_or(true, |id| id.0 == 0)
                })
            }
        }
    }

    /// Get font units per em
    pub fn units_per_em(&self) -> u16 {
        match &self.program {
            FontProgram::Standard(_) => 1000,
            FontProgram::TrueType { metrics, .. } => metrics.units_per_em,
        }
    }

    /// Get font ascender
    pub fn ascender(&self) -> i16 {
        match &self.program {
            FontProgram::Standard(_) => 718,
            FontProgram::TrueType { metrics, .. } => metrics.ascender,
        }
    }

    /// Get font descender
    pub fn descender(&self) -> i16 {
        match &self.program {
            FontProgram::Standard(_) => -207,
            FontProgram::TrueType { metrics, .. } => metrics.descender,
        }
    }

    /// Calculate text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        match &self.program {
            FontProgram::Standard(font) => font.text_width(text),
            FontProgram::TrueType { .. } => {
                let Some(face) = self.face() else {
                    return 0;
                };
                text.chars()
                    .filter_map(|c| {
                        let gid = face.glyph_index(c).unwrap_or(ttf_parser::GlyphId(0));
                        face.glyph_hor_advance(gid)
                    })
                    .map(|w| w as u32)
                    .sum()
            }
        }
    }

    /// Calculate text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f32) -> f32 {
        let width = self.text_width(text);
        let units_per_em = self.units_per_em() as f32;
        (width as f32 / units_per_em) * font_size
    }

    /// Encode text as a string operand for the Tj operator
    ///
    /// Built-in fonts produce a WinAnsi literal string, embedded fonts a
    /// hex string of 2-byte glyph IDs.
    pub fn encode_text(&self, text: &str) -> String {
        match &self.program {
            FontProgram::Standard(font) => font.encode_literal(text),
            FontProgram::TrueType { .. } => self.encode_text_hex(text),
        }
    }

    /// Encode text as hex string of glyph IDs
    pub fn encode_text_hex(&self, text: &str) -> String {
        let face = self.face();
        let mut result = String::with_capacity(text.len() * 4 + 2);
        result.push('<');
        for c in text.chars() {
            let gid = face
                .as_ref()
                .and_then(|face| face.glyph_index(c))
                .map(|id| id.0)
                .unwrap_or(0);
            result.push_str(&format!("{gid:04X}"));
        }
        result.push('>');
        result
    }

    /// Generate all PDF objects needed to use this font
    ///
    /// References between the composite objects are left as placeholders
    /// and wired up by the document when the objects are added.
    pub fn to_pdf_objects(&self) -> Result<FontObjects> {
        let ttf_data = match &self.program {
            FontProgram::Standard(font) => return Ok(FontObjects::Simple(font.to_pdf_dictionary())),
            FontProgram::TrueType { data, .. } => data,
        };

        let font_name = Object::Name(self.name.clone().into_bytes());

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(Dictionary::new(), tounicode_content.into_bytes());

        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![("Length1", (ttf_data.len() as i64).into())]),
            ttf_data.clone(),
        );

        let scale = 1000.0 / self.units_per_em() as f64;
        let ascender = (self.ascender() as f64 * scale).round() as i64;
        let descender = (self.descender() as f64 * scale).round() as i64;

        let font_bbox: Vec<Object> = vec![0.into(), descender.into(), 1000.into(), ascender.into()];

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"FontDescriptor".to_vec())),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()),
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascender.into()),
            ("Descent", descender.into()),
            ("CapHeight", ascender.into()),
            ("StemV", 80.into()),
            ("FontFile2", Object::Null),
        ]);

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"CIDFontType2".to_vec())),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("FontDescriptor", Object::Null),
            ("CIDToGIDMap", Object::Name(b"Identity".to_vec())),
            ("W", self.generate_widths_array().into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Font".to_vec())),
            ("Subtype", Object::Name(b"Type0".to_vec())),
            ("BaseFont", font_name),
            ("Encoding", Object::Name(b"Identity-H".to_vec())),
            ("DescendantFonts", Object::Array(vec![])),
            ("ToUnicode", Object::Null),
        ]);

        Ok(FontObjects::Composite {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        })
    }

    /// Generate /W array for the glyphs in use, scaled to 1000 units per em
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut widths = Vec::new();
        let Some(face) = self.face() else {
            return widths;
        };
        let scale = 1000.0 / face.units_per_em() as f64;

        let gids: BTreeSet<u16> = self
            .used_chars
            .iter()
            .filter_map(|&c| face.glyph_index(c).map(|id| id.0))
            .collect();

        // Individual format: [gid1 [w1] gid2 [w2] ...]
        for gid in gids {
            let advance = face
                .glyph_hor_advance(ttf_parser::GlyphId(gid))
                .map(|w| (w as f64 * scale).round() as i64)
                .unwrap_or(1000);
            widths.push((gid as i64).into());
            widths.push(vec![Object::Integer(advance)].into());
        }

        widths
    }

    /// Generate ToUnicode CMap stream content
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let face = self.face();
        let chars: Vec<char> = self.used_chars.iter().copied().collect();

        // At most 100 entries per bfchar block
        for chunk in chars.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for c in chunk {
                let gid = face
                    .as_ref()
                    .and_then(|face| face.glyph_index(*c))
                    .map(|id| id.0)
                    .unwrap_or(0);
                let mut utf16 = [0u16; 2];
                let unicode: String = c
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04X}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04X}> <{unicode}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}
