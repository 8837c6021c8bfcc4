//! Resume PDF rendering
//!
//! The page is A4 with 40pt margins and a fixed sequence of sections:
//! header, summary, education table, experience blocks and a skills grid.

use crate::theme::{Palette, ResumeTheme};
use crate::{ResumeError, ResumeRecord, Result};
use layout::{
    BulletList, Cell, DocTemplate, Flowable, FontSpec, FontStyle, HeaderStyle, LineStyle,
    Paragraph, ParagraphStyle, Rule, Table, TableStyle, TextRun,
};
use pdf_core::{Align, DocumentInfo, FontFamilyBuilder, PageSize, PdfDocument, StandardFamily};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Family name every style refers to
pub const FONT_FAMILY: &str = "body";

/// Page margin on every side
pub const PAGE_MARGIN: f64 = 40.0;

const HEADER_COLUMNS: [f64; 2] = [300.0, 200.0];
const EDUCATION_COLUMNS: [f64; 4] = [120.0, 200.0, 80.0, 80.0];
const EDUCATION_HEADINGS: [&str; 4] = ["Degree", "Institution", "Year", "Percentage"];
const RULE_WIDTH: f64 = 500.0;
const SKILL_COLUMN: f64 = 500.0 / 3.0;

/// TrueType files for the body family; missing variants fall back to regular
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrueTypeFonts {
    pub regular: PathBuf,
    pub bold: Option<PathBuf>,
    pub italic: Option<PathBuf>,
    pub bold_italic: Option<PathBuf>,
}

/// Where the body font comes from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FontSource {
    /// Built-in Helvetica family, WinAnsi text only
    #[default]
    Builtin,
    /// Embedded TrueType family, full Unicode
    TrueType(TrueTypeFonts),
}

/// Text styles derived from the theme
struct Styles {
    name: ParagraphStyle,
    contact: ParagraphStyle,
    section: ParagraphStyle,
    normal: ParagraphStyle,
    body_font: FontSpec,
}

impl Styles {
    fn new(theme: &ResumeTheme, palette: &Palette) -> Self {
        let body_font = FontSpec::new(FONT_FAMILY, theme.body_size);
        let body_size = theme.body_size as f64;

        let name_font = FontSpec::new(FONT_FAMILY, theme.name_size).with_style(FontStyle::Bold);
        let name = ParagraphStyle::new(name_font).color(palette.name);

        let contact = ParagraphStyle::new(body_font.clone())
            .align(Align::Right)
            .color(palette.contact);

        let section = ParagraphStyle::new(FontSpec::new(FONT_FAMILY, theme.section_size))
            .leading(theme.section_size as f64 + 2.0)
            .color(palette.section)
            .space_before(12.0)
            .space_after(6.0)
            .upper_case();

        let normal = ParagraphStyle::new(body_font.clone())
            .leading(body_size * 1.3)
            .color(palette.body);

        Self {
            name,
            contact,
            section,
            normal,
            body_font,
        }
    }

    fn heading(&self, title: &str) -> Flowable {
        Paragraph::plain(title, self.section.clone()).into()
    }
}

/// Builds the resume document from a record
#[derive(Debug, Clone)]
pub struct ResumeRenderer {
    theme: ResumeTheme,
    fonts: FontSource,
    compress: bool,
    creation_date: Option<String>,
}

impl Default for ResumeRenderer {
    fn default() -> Self {
        Self {
            theme: ResumeTheme::default(),
            fonts: FontSource::Builtin,
            compress: true,
            creation_date: None,
        }
    }
}

impl ResumeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_theme(mut self, theme: ResumeTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_fonts(mut self, fonts: FontSource) -> Self {
        self.fonts = fonts;
        self
    }

    /// Flate-compress page content (on by default)
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Use a fixed `/CreationDate` instead of the current time
    pub fn with_creation_date(mut self, date: impl Into<String>) -> Self {
        self.creation_date = Some(date.into());
        self
    }

    fn load_fonts(&self, doc: &mut PdfDocument) -> Result<()> {
        match &self.fonts {
            FontSource::Builtin => {
                doc.register_standard_family(FONT_FAMILY, StandardFamily::Helvetica)?;
            }
            FontSource::TrueType(files) => {
                let mut builder = FontFamilyBuilder::new().regular(read_font(&files.regular)?);
                if let Some(path) = &files.bold {
                    builder = builder.bold(read_font(path)?);
                }
                if let Some(path) = &files.italic {
                    builder = builder.italic(read_font(path)?);
                }
                if let Some(path) = &files.bold_italic {
                    builder = builder.bold_italic(read_font(path)?);
                }
                doc.register_font_family(FONT_FAMILY, builder)?;
            }
        }
        Ok(())
    }

    fn document_info(&self, record: &ResumeRecord) -> DocumentInfo {
        let creation_date = self.creation_date.clone().unwrap_or_else(|| {
            format!("D:{}Z", chrono::Utc::now().format("%Y%m%d%H%M%S"))
        });
        let name = record.name.trim();

        DocumentInfo {
            title: Some(if name.is_empty() {
                "Resume".to_string()
            } else {
                format!("Resume - {}", name)
            }),
            author: (!name.is_empty()).then(|| name.to_string()),
            creator: Some(env!("CARGO_PKG_NAME").to_string()),
            producer: Some(format!("pdf-core {}", env!("CARGO_PKG_VERSION"))),
            creation_date: Some(creation_date),
            ..Default::default()
        }
    }

    /// Flowables of the resume, top to bottom
    pub fn build_story(&self, record: &ResumeRecord) -> Result<Vec<Flowable>> {
        let palette = self.theme.palette()?;
        let styles = Styles::new(&self.theme, &palette);
        let mut story: Vec<Flowable> = Vec::new();

        // Header: name left, contact details right
        let name = Paragraph::plain(record.name.as_str(), styles.name.clone());
        let contact = Paragraph::plain(
            format!("{}\n{}", record.email, record.phone),
            styles.contact.clone(),
        );
        story.push(
            Table::new(
                HEADER_COLUMNS.to_vec(),
                vec![vec![Cell::Paragraph(name), Cell::Paragraph(contact)]],
                TableStyle::new(styles.body_font.clone()),
            )
            .into(),
        );
        story.push(Flowable::Spacer(6.0));
        story.push(
            Rule::new(
                RULE_WIDTH,
                1.0,
                LineStyle {
                    width: 0.5,
                    color: palette.rule,
                },
            )
            .into(),
        );
        story.push(Flowable::Spacer(12.0));

        story.push(styles.heading("Summary"));
        story.push(Paragraph::plain(record.summary.as_str(), styles.normal.clone()).into());
        story.push(Flowable::Spacer(6.0));

        story.push(styles.heading("Education"));
        story.push(self.education_table(record, &styles, &palette).into());
        story.push(Flowable::Spacer(6.0));

        story.push(styles.heading("Experience"));
        for job in &record.experience {
            let title = Paragraph::new(
                vec![
                    TextRun::bold(job.role.as_str()),
                    TextRun::regular(format!(" \u{2013} {} ", job.company)),
                    TextRun::italic(format!("({})", job.duration)),
                ],
                styles.normal.clone(),
            );
            story.push(title.into());
            story.push(BulletList::new(job.points.iter(), &styles.normal).into());
            story.push(Flowable::Spacer(4.0));
        }

        story.push(styles.heading("Skills"));
        if !record.skills.is_empty() {
            let rows = record
                .skills
                .iter()
                .map(|skill| vec![Cell::from(skill.as_str())])
                .collect();
            let style = TableStyle::new(styles.body_font.clone())
                .align(Align::Center)
                .text_color(palette.skills);
            story.push(Table::new(vec![SKILL_COLUMN], rows, style).into());
        }

        Ok(story)
    }

    fn education_table(&self, record: &ResumeRecord, styles: &Styles, palette: &Palette) -> Table {
        let mut rows = vec![EDUCATION_HEADINGS.map(Cell::from).to_vec()];
        rows.extend(
            record
                .education
                .iter()
                .map(|row| row.cells().map(Cell::from).to_vec()),
        );

        let style = TableStyle::new(styles.body_font.clone())
            .align(Align::Center)
            .text_color(palette.body)
            .grid(0.25, palette.grid)
            .header(HeaderStyle {
                background: Some(palette.table_header_background),
                text_color: palette.table_header_text,
                font: styles.body_font.with_style(FontStyle::Bold),
                bottom_padding: 6.0,
            });

        Table::new(EDUCATION_COLUMNS.to_vec(), rows, style)
    }

    /// Lay out the record into a new document
    pub fn build_document(&self, record: &ResumeRecord) -> Result<PdfDocument> {
        let mut doc = PdfDocument::new();
        doc.set_compression(self.compress);
        self.load_fonts(&mut doc)?;
        doc.set_info(self.document_info(record));

        let story = self.build_story(record)?;
        let pages = DocTemplate::new(PageSize::A4, PAGE_MARGIN).build(&mut doc, &story)?;
        tracing::debug!(pages, flowables = story.len(), "resume laid out");

        Ok(doc)
    }

    /// Render to PDF bytes
    pub fn render_to_bytes(&self, record: &ResumeRecord) -> Result<Vec<u8>> {
        let mut doc = self.build_document(record)?;
        Ok(doc.to_bytes()?)
    }

    /// Render to a file, overwriting it if it exists
    ///
    /// # Returns
    /// The path written
    pub fn render(&self, record: &ResumeRecord, path: impl AsRef<Path>) -> Result<PathBuf> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "rendering resume");

        let mut doc = self.build_document(record)?;
        let pages = doc.page_count();
        doc.save(path)?;

        tracing::info!(path = %path.display(), pages, "resume saved");
        Ok(path.to_path_buf())
    }
}

fn read_font(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| ResumeError::FontRead {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EducationRow, ExperienceEntry};
    use pretty_assertions::assert_eq;

    fn record() -> ResumeRecord {
        ResumeRecord {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "555-1234".to_string(),
            summary: "Builds things.".to_string(),
            education: vec![EducationRow {
                degree: "BS".to_string(),
                institution: "MIT".to_string(),
                year: "2020".to_string(),
                percentage: "3.9".to_string(),
            }],
            experience: vec![ExperienceEntry {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2020-2022".to_string(),
                points: vec!["Built X".to_string(), "Shipped Y".to_string()],
            }],
            skills: vec!["Go".to_string(), "Rust".to_string()],
        }
    }

    fn kind(flowable: &Flowable) -> &'static str {
        match flowable {
            Flowable::Paragraph(_) => "paragraph",
            Flowable::Spacer(_) => "spacer",
            Flowable::Rule(_) => "rule",
            Flowable::Table(_) => "table",
            Flowable::BulletList(_) => "list",
        }
    }

    #[test]
    fn test_story_section_order() {
        let story = ResumeRenderer::new().build_story(&record()).unwrap();
        let kinds: Vec<&str> = story.iter().map(kind).collect();
        assert_eq!(
            kinds,
            vec![
                "table", "spacer", "rule", "spacer", // header
                "paragraph", "paragraph", "spacer", // summary
                "paragraph", "table", "spacer", // education
                "paragraph", "paragraph", "list", "spacer", // experience
                "paragraph", "table", // skills
            ]
        );
    }

    #[test]
    fn test_header_table_geometry() {
        let story = ResumeRenderer::new().build_story(&record()).unwrap();
        let Flowable::Table(header) = &story[0] else {
            panic!("header is not a table");
        };
        assert_eq!(header.col_widths, vec![300.0, 200.0]);

        let Cell::Paragraph(contact) = &header.rows[0][1] else {
            panic!("contact cell is not a paragraph");
        };
        assert_eq!(contact.runs[0].text, "jane@x.com\n555-1234");
        assert_eq!(contact.style.align, Align::Right);
        assert_eq!(contact.style.leading, 12.0);
    }

    #[test]
    fn test_education_table_rows() {
        let story = ResumeRenderer::new().build_story(&record()).unwrap();
        let Flowable::Table(table) = &story[8] else {
            panic!("education is not a table");
        };
        assert_eq!(table.col_widths, vec![120.0, 200.0, 80.0, 80.0]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1][2], Cell::from("2020"));
        assert!(table.style.header.is_some());
        assert!(table.style.grid.is_some());
    }

    #[test]
    fn test_empty_record_keeps_headings() {
        let story = ResumeRenderer::new()
            .build_story(&ResumeRecord::default())
            .unwrap();

        let headings: Vec<String> = story
            .iter()
            .filter_map(|f| match f {
                Flowable::Paragraph(p) if p.style.upper_case => Some(p.runs[0].text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(headings, vec!["Summary", "Education", "Experience", "Skills"]);

        // education header row only, no skills grid
        let tables: Vec<usize> = story
            .iter()
            .filter_map(|f| match f {
                Flowable::Table(t) => Some(t.rows.len()),
                _ => None,
            })
            .collect();
        assert_eq!(tables, vec![1, 1]);
    }

    #[test]
    fn test_experience_title_runs() {
        let story = ResumeRenderer::new().build_story(&record()).unwrap();
        let Flowable::Paragraph(title) = &story[11] else {
            panic!("experience title is not a paragraph");
        };
        let runs: Vec<(&str, FontStyle)> = title
            .runs
            .iter()
            .map(|r| (r.text.as_str(), r.style))
            .collect();
        assert_eq!(
            runs,
            vec![
                ("Engineer", FontStyle::Bold),
                (" \u{2013} Acme ", FontStyle::Regular),
                ("(2020-2022)", FontStyle::Italic),
            ]
        );
    }

    #[test]
    fn test_theme_applies_to_story() {
        let theme = ResumeTheme {
            section_color: "#FF0000".to_string(),
            body_size: 12.0,
            ..Default::default()
        };
        let story = ResumeRenderer::new()
            .with_theme(theme)
            .build_story(&record())
            .unwrap();

        let Flowable::Paragraph(heading) = &story[4] else {
            panic!("summary heading is not a paragraph");
        };
        assert_eq!(heading.style.color, pdf_core::Color::from_rgb(0xFF, 0, 0));

        let Flowable::Paragraph(summary) = &story[5] else {
            panic!("summary is not a paragraph");
        };
        assert_eq!(summary.style.font.size, 12.0);
        assert!((summary.style.leading - 15.6).abs() < 1e-9);
    }

    #[test]
    fn test_bad_theme_colour_fails_render() {
        let theme = ResumeTheme {
            rule_color: "#12".to_string(),
            ..Default::default()
        };
        let err = ResumeRenderer::new()
            .with_theme(theme)
            .render_to_bytes(&record())
            .unwrap_err();
        assert!(matches!(err, ResumeError::Pdf(_)));
    }

    #[test]
    fn test_missing_font_file() {
        let renderer = ResumeRenderer::new().with_fonts(FontSource::TrueType(TrueTypeFonts {
            regular: PathBuf::from("/nonexistent/font.ttf"),
            ..Default::default()
        }));
        let err = renderer.render_to_bytes(&record()).unwrap_err();
        assert!(matches!(err, ResumeError::FontRead { .. }));
    }

    #[test]
    fn test_document_info() {
        let renderer = ResumeRenderer::new().with_creation_date("D:20240101000000Z");
        let info = renderer.document_info(&record());
        assert_eq!(info.title.as_deref(), Some("Resume - Jane Doe"));
        assert_eq!(info.author.as_deref(), Some("Jane Doe"));
        assert_eq!(info.creation_date.as_deref(), Some("D:20240101000000Z"));

        let info = ResumeRenderer::new().document_info(&ResumeRecord::default());
        assert_eq!(info.title.as_deref(), Some("Resume"));
        assert!(info.author.is_none());
        assert!(info.creation_date.unwrap().starts_with("D:"));
    }
}
