//! Integration tests for pdf-core
//!
//! These tests build documents from scratch, save them, and inspect the
//! result with lopdf.

use lopdf::content::Content;
use lopdf::{Document, Object};
use pdf_core::{
    Align, Color, DocumentInfo, FontFamilyBuilder, FontStyle, FontWeight, PageSize, PdfDocument,
    PdfError, StandardFamily,
};

/// New uncompressed document with one A4 page and Helvetica registered
fn new_doc() -> PdfDocument {
    let mut doc = PdfDocument::new();
    doc.add_blank_page(PageSize::A4).expect("Failed to add page");
    doc.register_standard_family("helvetica", StandardFamily::Helvetica)
        .expect("Failed to register font");
    doc.set_compression(false);
    doc
}

/// Decoded content stream operations of a page
fn page_operations(data: &[u8], page: u32) -> Vec<(String, Vec<Object>)> {
    let doc = Document::load_mem(data).expect("Failed to load PDF");
    let page_id = *doc.get_pages().get(&page).expect("Missing page");
    let content = doc.get_page_content(page_id).expect("Missing content");
    Content::decode(&content)
        .expect("Failed to decode content")
        .operations
        .into_iter()
        .map(|op| (op.operator, op.operands))
        .collect()
}

/// All strings shown with Tj on a page
fn shown_strings(data: &[u8], page: u32) -> Vec<Vec<u8>> {
    page_operations(data, page)
        .into_iter()
        .filter(|(op, _)| op == "Tj")
        .filter_map(|(_, operands)| match operands.first() {
            Some(Object::String(bytes, _)) => Some(bytes.clone()),
            _ => None,
        })
        .collect()
}

fn number(obj: &Object) -> f64 {
    match obj {
        Object::Integer(i) => *i as f64,
        Object::Real(r) => *r as f64,
        other => panic!("not a number: {other:?}"),
    }
}

#[test]
fn test_empty_document_roundtrip() {
    let mut doc = new_doc();
    let saved_data = doc.to_bytes().expect("Failed to save PDF");

    let loaded = Document::load_mem(&saved_data).expect("Failed to re-open PDF");
    assert_eq!(loaded.get_pages().len(), 1);
}

#[test]
fn test_media_box_is_a4() {
    let mut doc = new_doc();
    let saved_data = doc.to_bytes().unwrap();

    let loaded = Document::load_mem(&saved_data).unwrap();
    let page_id = *loaded.get_pages().get(&1).unwrap();
    let page = loaded.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();

    assert!((number(&media_box[2]) - 595.28).abs() < 0.01);
    assert!((number(&media_box[3]) - 841.89).abs() < 0.01);
}

#[test]
fn test_insert_text_basic() {
    let mut doc = new_doc();
    doc.set_font("helvetica", 12.0).expect("Failed to set font");
    doc.insert_text("Hello", 1, 100.0, 141.89, Align::Left)
        .expect("Failed to insert text");

    let saved_data = doc.to_bytes().expect("Failed to save PDF");
    let ops = page_operations(&saved_data, 1);

    let td = ops.iter().find(|(op, _)| op == "Td").expect("No Td");
    assert_eq!(number(&td.1[0]), 100.0);
    assert!((number(&td.1[1]) - 700.0).abs() < 0.001);
    assert_eq!(shown_strings(&saved_data, 1), vec![b"Hello".to_vec()]);
}

#[test]
fn test_insert_text_alignment() {
    let mut doc = new_doc();
    doc.set_font("helvetica", 10.0).unwrap();
    let width = doc.text_width("Center").unwrap();

    doc.insert_text("Center", 1, 300.0, 100.0, Align::Center)
        .unwrap();

    let saved_data = doc.to_bytes().unwrap();
    let ops = page_operations(&saved_data, 1);
    let td = ops.iter().find(|(op, _)| op == "Td").unwrap();

    assert!((number(&td.1[0]) - (300.0 - width / 2.0)).abs() < 0.001);
}

#[test]
fn test_font_variants_use_separate_resources() {
    let mut doc = new_doc();
    doc.set_font("helvetica", 10.0).unwrap();
    doc.insert_text("Regular", 1, 40.0, 40.0, Align::Left).unwrap();
    doc.set_font_weight(FontWeight::Bold).unwrap();
    doc.insert_text("Bold", 1, 40.0, 60.0, Align::Left).unwrap();
    doc.set_font_weight(FontWeight::Regular).unwrap();
    doc.set_font_style(FontStyle::Italic).unwrap();
    doc.insert_text("Italic", 1, 40.0, 80.0, Align::Left).unwrap();

    let saved_data = doc.to_bytes().unwrap();
    let loaded = Document::load_mem(&saved_data).unwrap();
    let page_id = *loaded.get_pages().get(&1).unwrap();
    let page = loaded.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();

    let mut base_fonts: Vec<String> = fonts
        .iter()
        .map(|(_, font_ref)| {
            let dict = loaded
                .get_dictionary(font_ref.as_reference().unwrap())
                .unwrap();
            String::from_utf8(dict.get(b"BaseFont").unwrap().as_name().unwrap().to_vec())
                .unwrap()
        })
        .collect();
    base_fonts.sort();

    assert_eq!(
        base_fonts,
        vec!["Helvetica", "Helvetica-Bold", "Helvetica-Oblique"]
    );
}

#[test]
fn test_text_on_multiple_pages() {
    let mut doc = new_doc();
    doc.add_blank_page(PageSize::A4).unwrap();
    doc.set_font("helvetica", 12.0).unwrap();

    doc.insert_text("Page 1", 1, 100.0, 100.0, Align::Left)
        .unwrap();
    doc.insert_text("Page 2", 2, 100.0, 100.0, Align::Left)
        .unwrap();

    let saved_data = doc.to_bytes().unwrap();
    assert_eq!(shown_strings(&saved_data, 1), vec![b"Page 1".to_vec()]);
    assert_eq!(shown_strings(&saved_data, 2), vec![b"Page 2".to_vec()]);
}

#[test]
fn test_winansi_and_unmapped_characters() {
    let mut doc = new_doc();
    doc.set_font("helvetica", 12.0).unwrap();
    doc.insert_text("Dev – Café ส", 1, 10.0, 10.0, Align::Left)
        .unwrap();

    let saved_data = doc.to_bytes().unwrap();
    let shown = shown_strings(&saved_data, 1);

    assert_eq!(shown, vec![b"Dev \x96 Caf\xe9 ?".to_vec()]);
}

#[test]
fn test_line_and_rect_operators() {
    let mut doc = new_doc();
    doc.draw_line(1, (40.0, 100.0), (540.0, 100.0), 0.5, Color::grey())
        .unwrap();
    doc.stroke_rect(1, 40.0, 200.0, 120.0, 20.0, 0.25, Color::grey())
        .unwrap();

    let saved_data = doc.to_bytes().unwrap();
    let ops = page_operations(&saved_data, 1);
    let names: Vec<&str> = ops.iter().map(|(op, _)| op.as_str()).collect();

    assert!(names.contains(&"m"));
    assert!(names.contains(&"l"));
    assert!(names.contains(&"re"));

    let re = ops.iter().find(|(op, _)| op == "re").unwrap();
    assert!((number(&re.1[1]) - (841.89 - 220.0)).abs() < 0.001);
}

#[test]
fn test_invalid_page_number() {
    let mut doc = new_doc();
    doc.set_font("helvetica", 12.0).unwrap();

    let result = doc.insert_text("Test", 0, 100.0, 700.0, Align::Left);
    assert!(matches!(result, Err(PdfError::InvalidPage(0, 1))));

    let result = doc.fill_rect(5, 0.0, 0.0, 1.0, 1.0, Color::black());
    assert!(matches!(result, Err(PdfError::InvalidPage(5, 1))));
}

#[test]
fn test_output_is_deterministic() {
    let build = || {
        let mut doc = new_doc();
        doc.set_info(DocumentInfo {
            title: Some("Same".to_string()),
            ..Default::default()
        });
        doc.set_font("helvetica", 12.0).unwrap();
        doc.insert_text("Stable", 1, 10.0, 10.0, Align::Left)
            .unwrap();
        doc.to_bytes().unwrap()
    };

    assert_eq!(build(), build());
}

#[test]
fn test_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    let mut doc = new_doc();
    doc.set_font("helvetica", 12.0).unwrap();
    doc.insert_text("File", 1, 10.0, 10.0, Align::Left).unwrap();
    doc.save(&path).expect("Failed to save");

    let loaded = Document::load(&path).expect("Failed to load saved file");
    assert_eq!(loaded.get_pages().len(), 1);
}

#[test]
fn test_unused_fonts_are_not_written() {
    let mut doc = new_doc();
    doc.register_standard_family("mono", StandardFamily::Courier)
        .unwrap();
    doc.set_font("helvetica", 12.0).unwrap();
    doc.insert_text("Only Helvetica", 1, 10.0, 10.0, Align::Left)
        .unwrap();

    let saved_data = doc.to_bytes().unwrap();
    let text = String::from_utf8_lossy(&saved_data);
    assert!(!text.contains("Courier"));
}

fn test_font_data() -> Vec<u8> {
    std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fonts/DejaVuSans.ttf"
    ))
    .expect("Failed to read test font file")
}

#[test]
fn test_truetype_font_embedding() {
    let mut doc = new_doc();
    doc.register_font_family(
        "dejavu",
        FontFamilyBuilder::new().regular(test_font_data()),
    )
    .expect("Failed to register font");
    assert!(matches!(
        doc.register_standard_family("dejavu", StandardFamily::Helvetica),
        Err(PdfError::FontAlreadyExists(_))
    ));

    doc.set_font("dejavu", 12.0).unwrap();
    doc.insert_text("AH", 1, 40.0, 40.0, Align::Left).unwrap();
    // Bold falls back to the regular face
    doc.set_font_weight(FontWeight::Bold).unwrap();
    doc.insert_text("Hi", 1, 40.0, 60.0, Align::Left).unwrap();

    let saved_data = doc.to_bytes().unwrap();

    // Identity-H: two bytes per glyph ID (A = 36, H = 43, i = 76)
    assert_eq!(
        shown_strings(&saved_data, 1),
        vec![
            vec![0x00, 0x24, 0x00, 0x2B],
            vec![0x00, 0x2B, 0x00, 0x4C],
        ]
    );

    let loaded = Document::load_mem(&saved_data).unwrap();
    let page_id = *loaded.get_pages().get(&1).unwrap();
    let page = loaded.get_dictionary(page_id).unwrap();
    let fonts = page
        .get(b"Resources")
        .and_then(Object::as_dict)
        .and_then(|r| r.get(b"Font"))
        .and_then(Object::as_dict)
        .unwrap();
    assert_eq!(fonts.len(), 1);

    let (_, font_ref) = fonts.iter().next().unwrap();
    let type0 = loaded
        .get_dictionary(font_ref.as_reference().unwrap())
        .unwrap();
    assert_eq!(type0.get(b"Subtype").unwrap().as_name().unwrap(), b"Type0");
    assert_eq!(
        type0.get(b"Encoding").unwrap().as_name().unwrap(),
        b"Identity-H"
    );
    assert_eq!(
        type0.get(b"BaseFont").unwrap().as_name().unwrap(),
        b"dejavu-regular"
    );

    let descendants = type0.get(b"DescendantFonts").unwrap().as_array().unwrap();
    assert_eq!(descendants.len(), 1);
    let cid_font = loaded
        .get_dictionary(descendants[0].as_reference().unwrap())
        .unwrap();
    assert_eq!(
        cid_font.get(b"Subtype").unwrap().as_name().unwrap(),
        b"CIDFontType2"
    );

    // Widths of A, H and i at 1000 units per em
    let widths: Vec<i64> = cid_font
        .get(b"W")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|w| match w {
            Object::Integer(gid) => *gid,
            Object::Array(advance) => advance[0].as_i64().unwrap(),
            other => panic!("unexpected /W entry: {other:?}"),
        })
        .collect();
    assert_eq!(widths, vec![36, 684, 43, 752, 76, 278]);

    let descriptor = loaded
        .get_dictionary(
            cid_font
                .get(b"FontDescriptor")
                .unwrap()
                .as_reference()
                .unwrap(),
        )
        .unwrap();
    let font_file = loaded
        .get_object(descriptor.get(b"FontFile2").unwrap().as_reference().unwrap())
        .and_then(Object::as_stream)
        .unwrap();
    assert_eq!(
        font_file.dict.get(b"Length1").unwrap().as_i64().unwrap(),
        test_font_data().len() as i64
    );

    let tounicode = loaded
        .get_object(type0.get(b"ToUnicode").unwrap().as_reference().unwrap())
        .and_then(Object::as_stream)
        .unwrap();
    let cmap = String::from_utf8(tounicode.content.clone()).unwrap();
    assert!(cmap.contains("3 beginbfchar"));
    assert!(cmap.contains("<0024> <0041>"));
    assert!(cmap.contains("<002B> <0048>"));
    assert!(cmap.contains("<004C> <0069>"));
}
