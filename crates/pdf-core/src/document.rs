//! PDF Document builder

use crate::font::FontObjects;
use crate::graphics::{line_operators, rect_operators, RectPaint};
use crate::standard::StandardFamily;
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, FontData, FontFamily, FontFamilyBuilder, PdfError, Result};
use crate::{FontStyle, FontWeight};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::path::Path;

/// A buffered text operation for deferred encoding
///
/// Text is buffered while the page is drawn and encoded on save, once the
/// full set of characters used by every font is known.
#[derive(Debug, Clone)]
struct BufferedTextOp {
    text: String,
    /// Font name (e.g., "Helvetica-Bold")
    font_name: String,
    /// Page number (1-indexed)
    page: usize,
    /// X coordinate of the left edge (PDF coordinates)
    x: f64,
    /// Baseline Y coordinate (PDF coordinates)
    y: f64,
    font_size: f32,
    color: Color,
}

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string
    ///
    /// # Example
    /// ```ignore
    /// let navy = Color::from_hex("#2C3E50")?;
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PdfError::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| PdfError::InvalidColor(hex.to_string()))
        };

        Ok(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }

    /// Red color
    pub fn red() -> Self {
        Self::rgb(1.0, 0.0, 0.0)
    }

    /// 50% grey
    pub fn grey() -> Self {
        Self::rgb(0.5, 0.5, 0.5)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Page dimensions in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    /// ISO A4 (210 x 297 mm)
    pub const A4: PageSize = PageSize {
        width: 595.28,
        height: 841.89,
    };

    /// US Letter (8.5 x 11 in)
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Document information dictionary entries
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentInfo {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    /// PDF date string, e.g. `D:20240101120000Z`
    pub creation_date: Option<String>,
}

impl DocumentInfo {
    fn to_dictionary(&self) -> Dictionary {
        let mut dict = Dictionary::new();
        let entries = [
            ("Title", &self.title),
            ("Author", &self.author),
            ("Subject", &self.subject),
            ("Creator", &self.creator),
            ("Producer", &self.producer),
            ("CreationDate", &self.creation_date),
        ];
        for (key, value) in entries {
            if let Some(value) = value {
                dict.set(key, Object::string_literal(value.as_str()));
            }
        }
        dict
    }
}

/// PDF Document builder providing high-level drawing operations
///
/// Coordinates passed to the drawing methods are in points with the origin
/// at the top-left corner of the page; they are converted to PDF's
/// bottom-left origin internally.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Page tree root
    pages_id: ObjectId,
    /// Page objects in order, with their sizes
    pages: Vec<(ObjectId, PageSize)>,
    /// Registered font families
    font_families: BTreeMap<String, FontFamily>,
    /// Current font family name
    current_family: Option<String>,
    current_weight: FontWeight,
    current_style: FontStyle,
    current_font_size: f32,
    current_text_color: Color,
    /// Font name -> resource name ("F1", "F2", ...)
    font_resources: BTreeMap<String, String>,
    /// Fonts referenced by each page
    page_fonts: BTreeMap<usize, BTreeSet<String>>,
    /// Buffered graphics operators per page
    page_graphics: BTreeMap<usize, Vec<u8>>,
    /// Buffered text operations (encoded during save)
    buffered_text_ops: Vec<BufferedTextOp>,
    info: Option<DocumentInfo>,
    compress: bool,
    finalized: bool,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document without pages
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.7");
        let pages_id = inner.new_object_id();

        let catalog_id = inner.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        inner.trailer.set("Root", catalog_id);

        let mut doc = Self {
            inner,
            pages_id,
            pages: Vec::new(),
            font_families: BTreeMap::new(),
            current_family: None,
            current_weight: FontWeight::default(),
            current_style: FontStyle::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            font_resources: BTreeMap::new(),
            page_fonts: BTreeMap::new(),
            page_graphics: BTreeMap::new(),
            buffered_text_ops: Vec::new(),
            info: None,
            compress: true,
            finalized: false,
        };
        doc.write_page_tree();
        doc
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Size of a page (1-indexed)
    pub fn page_size(&self, page: usize) -> Result<PageSize> {
        self.check_page(page)?;
        Ok(self.pages[page - 1].1)
    }

    /// Append a blank page
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self, size: PageSize) -> Result<usize> {
        self.check_not_finalized()?;

        let page_id = self.inner.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(size.width as _),
                Object::Real(size.height as _),
            ],
            "Resources" => Dictionary::new(),
        });
        self.pages.push((page_id, size));
        self.write_page_tree();

        Ok(self.pages.len())
    }

    fn write_page_tree(&mut self) {
        let kids: Vec<Object> = self
            .pages
            .iter()
            .map(|(id, _)| Object::Reference(*id))
            .collect();
        let count = kids.len() as i64;
        self.inner.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
    }

    /// Register one of the built-in Type1 families under a name
    ///
    /// # Example
    /// ```ignore
    /// doc.register_standard_family("body", StandardFamily::Helvetica)?;
    /// doc.set_font("body", 10.0)?;
    /// ```
    pub fn register_standard_family(&mut self, name: &str, family: StandardFamily) -> Result<()> {
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        self.font_families
            .insert(name.to_string(), FontFamily::standard(family));
        Ok(())
    }

    /// Register a TrueType font family with its variants
    ///
    /// # Example
    /// ```ignore
    /// doc.register_font_family("body",
    ///     FontFamilyBuilder::new()
    ///         .regular(std::fs::read("DejaVuSans.ttf")?)
    ///         .bold(std::fs::read("DejaVuSans-Bold.ttf")?)
    /// )?;
    /// ```
    pub fn register_font_family(&mut self, name: &str, builder: FontFamilyBuilder) -> Result<()> {
        if self.font_families.contains_key(name) {
            return Err(PdfError::FontAlreadyExists(name.to_string()));
        }

        let family = builder.build(name)?;
        self.font_families.insert(name.to_string(), family);

        Ok(())
    }

    /// Set the current font family and size
    ///
    /// Weight and style are kept.
    pub fn set_font(&mut self, family: &str, size: f32) -> Result<()> {
        if !self.font_families.contains_key(family) {
            return Err(PdfError::FontNotFound(family.to_string()));
        }

        self.current_family = Some(family.to_string());
        self.current_font_size = size;

        Ok(())
    }

    /// Set only the font size (keeps current family/weight/style)
    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_font_size = size;
        Ok(())
    }

    /// Set the font weight (keeps current family/size/style)
    pub fn set_font_weight(&mut self, weight: FontWeight) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_weight = weight;
        Ok(())
    }

    /// Set the font style (keeps current family/size/weight)
    pub fn set_font_style(&mut self, style: FontStyle) -> Result<()> {
        if self.current_family.is_none() {
            return Err(PdfError::FontNotFound("No font family set".to_string()));
        }

        self.current_style = style;
        Ok(())
    }

    /// Set the text color
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Set the document information dictionary
    pub fn set_info(&mut self, info: DocumentInfo) {
        self.info = Some(info);
    }

    /// Enable or disable Flate compression of page content streams
    pub fn set_compression(&mut self, compress: bool) {
        self.compress = compress;
    }

    fn resolve_font(&self, family: &str, weight: FontWeight, style: FontStyle) -> Result<&FontData> {
        self.font_families
            .get(family)
            .and_then(|f| f.get_variant(weight, style))
            .ok_or_else(|| PdfError::FontNotFound(family.to_string()))
    }

    fn current_font(&self) -> Result<&FontData> {
        let family = self
            .current_family
            .as_deref()
            .ok_or_else(|| PdfError::FontNotFound("No font family set".to_string()))?;
        self.resolve_font(family, self.current_weight, self.current_style)
    }

    /// Width of a string in points for any registered family
    pub fn measure_text(
        &self,
        family: &str,
        weight: FontWeight,
        style: FontStyle,
        size: f32,
        text: &str,
    ) -> Result<f64> {
        let font = self.resolve_font(family, weight, style)?;
        Ok(font.text_width_points(text, size) as f64)
    }

    /// Width of a string in points with the current font
    pub fn text_width(&self, text: &str) -> Result<f64> {
        let font = self.current_font()?;
        Ok(font.text_width_points(text, self.current_font_size) as f64)
    }

    /// Insert a single line of text
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - Anchor X coordinate in points (meaning depends on `align`)
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        self.check_not_finalized()?;
        self.check_page(page)?;

        if text.is_empty() {
            return Ok(());
        }

        let font_size = self.current_font_size;
        let (font_name, width) = {
            let font = self.current_font()?;
            if let Some(c) = font.missing_glyph(text) {
                tracing::debug!(font = %font.name, character = ?c, "missing glyph, substituting");
            }
            (
                font.name.clone(),
                font.text_width_points(text, font_size) as f64,
            )
        };

        let start_x = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        let page_height = self.pages[page - 1].1.height;

        let (weight, style) = (self.current_weight, self.current_style);
        if let Some(family) = self.current_family.clone() {
            if let Some(font) = self
                .font_families
                .get_mut(&family)
                .and_then(|f| f.get_variant_mut(weight, style))
            {
                font.add_chars(text);
            }
        }
        self.font_ref(&font_name, page);

        self.buffered_text_ops.push(BufferedTextOp {
            text: text.to_string(),
            font_name,
            page,
            x: start_x,
            y: page_height - y,
            font_size,
            color: self.current_text_color,
        });

        Ok(())
    }

    /// Draw a straight line
    ///
    /// Points are `(x, y)` with `y` measured from the top of the page.
    pub fn draw_line(
        &mut self,
        page: usize,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    ) -> Result<()> {
        self.check_not_finalized()?;
        self.check_page(page)?;

        let height = self.pages[page - 1].1.height;
        let ops = line_operators((from.0, height - from.1), (to.0, height - to.1), width, color);
        self.buffer_graphics(page, &ops);
        Ok(())
    }

    /// Fill a rectangle whose top-left corner is at `(x, y)`
    pub fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> Result<()> {
        self.draw_rect(page, x, y, width, height, RectPaint::Fill(color))
    }

    /// Stroke the outline of a rectangle whose top-left corner is at `(x, y)`
    #[allow(clippy::too_many_arguments)]
    pub fn stroke_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        line_width: f64,
        color: Color,
    ) -> Result<()> {
        self.draw_rect(
            page,
            x,
            y,
            width,
            height,
            RectPaint::Stroke {
                color,
                width: line_width,
            },
        )
    }

    fn draw_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        paint: RectPaint,
    ) -> Result<()> {
        self.check_not_finalized()?;
        self.check_page(page)?;

        let page_height = self.pages[page - 1].1.height;
        let ops = rect_operators(x, page_height - y - height, width, height, paint);
        self.buffer_graphics(page, &ops);
        Ok(())
    }

    /// Save the document to a file
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }

    fn check_page(&self, page: usize) -> Result<()> {
        if page == 0 || page > self.pages.len() {
            return Err(PdfError::InvalidPage(page, self.pages.len()));
        }
        Ok(())
    }

    fn check_not_finalized(&self) -> Result<()> {
        if self.finalized {
            return Err(PdfError::AlreadyFinalized);
        }
        Ok(())
    }

    /// Get or assign the resource name of a font and record its use on a page
    fn font_ref(&mut self, font_name: &str, page: usize) -> String {
        let next = self.font_resources.len() + 1;
        let resource_name = self
            .font_resources
            .entry(font_name.to_string())
            .or_insert_with(|| format!("F{next}"))
            .clone();

        self.page_fonts
            .entry(page)
            .or_default()
            .insert(font_name.to_string());

        resource_name
    }

    fn buffer_graphics(&mut self, page: usize, content: &[u8]) {
        self.page_graphics
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    fn font_data(&self, name: &str) -> Result<&FontData> {
        self.font_families
            .values()
            .flat_map(|family| family.variants())
            .find(|font| font.name == name)
            .ok_or_else(|| PdfError::FontNotFound(name.to_string()))
    }

    /// Write fonts, page contents, resources and the info dictionary
    fn finalize(&mut self) -> Result<()> {
        self.check_not_finalized()?;

        // 1. Embed fonts that were used
        let font_ids = self.embed_fonts()?;

        // 2. Graphics first, then text on top
        let mut contents: BTreeMap<usize, Vec<u8>> = std::mem::take(&mut self.page_graphics);
        for op in std::mem::take(&mut self.buffered_text_ops) {
            let font = self.font_data(&op.font_name)?;
            let encoded = font.encode_text(&op.text);
            let ctx = TextRenderContext {
                font_name: self
                    .font_resources
                    .get(&op.font_name)
                    .cloned()
                    .ok_or_else(|| PdfError::FontNotFound(op.font_name.clone()))?,
                font_size: op.font_size,
                text_width: font.text_width_points(&op.text, op.font_size) as f64,
                color: op.color,
            };
            let operators = generate_text_operators(&encoded, op.x, op.y, Align::Left, &ctx);
            contents.entry(op.page).or_default().extend(operators);
        }

        // 3. Content stream and resources for every page
        for (index, (page_id, size)) in self.pages.clone().into_iter().enumerate() {
            let page = index + 1;
            let content = contents.remove(&page).unwrap_or_default();
            let stream = self.content_stream(content)?;
            let contents_id = self.inner.add_object(stream);

            let mut font_dict = Dictionary::new();
            for font_name in self.page_fonts.get(&page).into_iter().flatten() {
                let resource_name = &self.font_resources[font_name];
                let font_id = font_ids
                    .get(font_name)
                    .ok_or_else(|| PdfError::FontNotFound(font_name.clone()))?;
                font_dict.set(resource_name.as_bytes(), Object::Reference(*font_id));
            }

            let mut resources = Dictionary::new();
            if !font_dict.is_empty() {
                resources.set("Font", font_dict);
            }

            self.inner.objects.insert(
                page_id,
                Object::Dictionary(dictionary! {
                    "Type" => "Page",
                    "Parent" => self.pages_id,
                    "MediaBox" => vec![
                        0.into(),
                        0.into(),
                        Object::Real(size.width as _),
                        Object::Real(size.height as _),
                    ],
                    "Resources" => resources,
                    "Contents" => contents_id,
                }),
            );
        }
        self.write_page_tree();

        // 4. Info dictionary
        if let Some(info) = &self.info {
            let info_id = self.inner.add_object(info.to_dictionary());
            self.inner.trailer.set("Info", info_id);
        }

        self.finalized = true;
        tracing::debug!(
            pages = self.pages.len(),
            fonts = font_ids.len(),
            "finalized PDF document"
        );
        Ok(())
    }

    /// Add font objects for every font with used characters
    ///
    /// # Returns
    /// Font name -> font dictionary object ID
    fn embed_fonts(&mut self) -> Result<BTreeMap<String, ObjectId>> {
        let mut objects = Vec::new();
        for family in self.font_families.values() {
            for font in family.variants() {
                if self.font_resources.contains_key(&font.name) && !font.used_chars.is_empty() {
                    objects.push((font.name.clone(), font.to_pdf_objects()?));
                }
            }
        }

        let mut font_ids = BTreeMap::new();
        for (name, font_objects) in objects {
            if font_ids.contains_key(&name) {
                continue;
            }
            let id = self.add_font_objects(font_objects);
            font_ids.insert(name, id);
        }

        Ok(font_ids)
    }

    fn add_font_objects(&mut self, font_objects: FontObjects) -> ObjectId {
        match font_objects {
            FontObjects::Simple(dict) => self.inner.add_object(dict),
            FontObjects::Composite {
                mut type0_font,
                mut cid_font,
                mut font_descriptor,
                font_file_stream,
                tounicode_stream,
            } => {
                let font_file_id = self.inner.add_object(font_file_stream);
                font_descriptor.set("FontFile2", Object::Reference(font_file_id));
                let font_descriptor_id = self.inner.add_object(font_descriptor);

                cid_font.set("FontDescriptor", Object::Reference(font_descriptor_id));
                let cid_font_id = self.inner.add_object(cid_font);

                let tounicode_id = self.inner.add_object(tounicode_stream);
                type0_font.set(
                    "DescendantFonts",
                    Object::Array(vec![Object::Reference(cid_font_id)]),
                );
                type0_font.set("ToUnicode", Object::Reference(tounicode_id));

                self.inner.add_object(type0_font)
            }
        }
    }

    fn content_stream(&self, content: Vec<u8>) -> Result<Stream> {
        if !self.compress {
            let mut stream = Stream::new(Dictionary::new(), content);
            stream.allows_compression = false;
            return Ok(stream);
        }

        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&content)?;
        let compressed = encoder.finish()?;

        let mut stream = Stream::new(dictionary! { "Filter" => "FlateDecode" }, compressed);
        stream.allows_compression = false;
        Ok(stream)
    }
}
