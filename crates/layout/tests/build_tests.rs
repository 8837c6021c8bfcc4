//! Integration tests: layout drawn into a real PDF document

use layout::{
    BulletList, Cell, DocTemplate, Flowable, FontSpec, FontStyle, HeaderStyle, Paragraph,
    ParagraphStyle, Table, TableStyle, TextRun,
};
use lopdf::content::Content;
use lopdf::{Document, Object};
use pdf_core::{Align, Color, PageSize, PdfDocument, StandardFamily};

fn new_doc() -> PdfDocument {
    let mut doc = PdfDocument::new();
    doc.register_standard_family("helvetica", StandardFamily::Helvetica)
        .unwrap();
    doc.set_compression(false);
    doc
}

fn number(obj: &Object) -> f64 {
    match obj {
        Object::Integer(i) => *i as f64,
        Object::Real(r) => *r as f64,
        other => panic!("not a number: {other:?}"),
    }
}

/// (text, x, y) of every string shown, per page
fn page_texts(data: &[u8]) -> Vec<Vec<(String, f64, f64)>> {
    let doc = Document::load_mem(data).unwrap();
    doc.get_pages()
        .values()
        .map(|id| {
            let content = doc.get_page_content(*id).unwrap();
            let mut position = (0.0, 0.0);
            let mut texts = Vec::new();
            for op in Content::decode(&content).unwrap().operations {
                match op.operator.as_str() {
                    "Td" => position = (number(&op.operands[0]), number(&op.operands[1])),
                    "Tj" => {
                        if let Object::String(bytes, _) = &op.operands[0] {
                            let text = String::from_utf8_lossy(bytes).into_owned();
                            texts.push((text, position.0, position.1));
                        }
                    }
                    _ => {}
                }
            }
            texts
        })
        .collect()
}

fn body() -> ParagraphStyle {
    ParagraphStyle::new(FontSpec::new("helvetica", 10.0)).leading(13.0)
}

#[test]
fn test_paragraph_starts_at_frame_top() {
    let mut doc = new_doc();
    let story = vec![Flowable::Paragraph(Paragraph::plain("Hello", body()))];
    let pages = DocTemplate::new(PageSize::A4, 40.0)
        .build(&mut doc, &story)
        .unwrap();
    assert_eq!(pages, 1);

    let data = doc.to_bytes().unwrap();
    let texts = page_texts(&data);
    let (text, x, y) = &texts[0][0];
    assert_eq!(text, "Hello");
    assert_eq!(*x, 40.0);
    // baseline 10pt below the top margin
    assert!((y - (841.89 - 50.0)).abs() < 0.001);
}

#[test]
fn test_long_story_spans_pages() {
    let mut doc = new_doc();
    let story: Vec<Flowable> = (0..120)
        .map(|i| Paragraph::plain(format!("Line {i}"), body()).into())
        .collect();

    let pages = DocTemplate::new(PageSize::A4, 40.0)
        .build(&mut doc, &story)
        .unwrap();
    // 761.89 / 13 = 58 lines per page
    assert_eq!(pages, 3);
    assert_eq!(doc.page_count(), 3);

    let data = doc.to_bytes().unwrap();
    let texts = page_texts(&data);
    assert_eq!(texts[0].len(), 58);
    assert_eq!(texts[1][0].0, "Line 58");
    assert_eq!(texts[2].last().unwrap().0, "Line 119");
}

#[test]
fn test_mixed_story_draws_everything() {
    let mut doc = new_doc();
    let table_style = TableStyle::new(FontSpec::new("helvetica", 10.0))
        .align(Align::Center)
        .grid(0.25, Color::grey())
        .header(HeaderStyle {
            background: Some(Color::from_rgb(0x2E, 0x86, 0xC1)),
            text_color: Color::white(),
            font: FontSpec::new("helvetica", 10.0).with_style(FontStyle::Bold),
            bottom_padding: 6.0,
        });

    let story: Vec<Flowable> = vec![
        Paragraph::new(
            vec![TextRun::bold("Engineer"), TextRun::regular(" at Acme")],
            body(),
        )
        .into(),
        Table::new(
            vec![120.0, 200.0],
            vec![
                vec![Cell::from("Degree"), Cell::from("Institution")],
                vec![Cell::from("BS"), Cell::from("MIT")],
            ],
            table_style,
        )
        .into(),
        BulletList::new(["Built X", "Shipped Y"], &body()).into(),
    ];

    DocTemplate::new(PageSize::A4, 40.0)
        .build(&mut doc, &story)
        .unwrap();
    let data = doc.to_bytes().unwrap();

    let shown: Vec<String> = page_texts(&data)[0].iter().map(|t| t.0.clone()).collect();
    assert_eq!(
        shown,
        vec![
            "Engineer",
            " at Acme",
            "Degree",
            "Institution",
            "BS",
            "MIT",
            "\u{FFFD}",
            "Built X",
            "\u{FFFD}",
            "Shipped Y",
        ]
    );
}

#[test]
fn test_invalid_table_is_an_error() {
    let mut doc = new_doc();
    let story = vec![Flowable::Table(Table::new(
        vec![100.0],
        vec![vec![Cell::from("a"), Cell::from("b")]],
        TableStyle::new(FontSpec::new("helvetica", 10.0)),
    ))];

    let result = DocTemplate::new(PageSize::A4, 40.0).build(&mut doc, &story);
    assert!(matches!(result, Err(layout::LayoutError::InvalidTable(_))));
}

#[test]
fn test_tall_table_row_stays_inside_margins() {
    let mut doc = new_doc();
    let cell = (0..80).map(|i| format!("S{i}")).collect::<Vec<_>>().join("\n");
    let story = vec![
        Flowable::Paragraph(Paragraph::plain("Skills", body())),
        Flowable::Table(Table::new(
            vec![500.0 / 3.0],
            vec![vec![Cell::from(cell)]],
            TableStyle::new(FontSpec::new("helvetica", 10.0)).align(Align::Center),
        )),
    ];

    let pages = DocTemplate::new(PageSize::A4, 40.0)
        .build(&mut doc, &story)
        .unwrap();
    assert_eq!(pages, 3);

    let data = doc.to_bytes().unwrap();
    let texts: Vec<(String, f64, f64)> = page_texts(&data).into_iter().flatten().collect();

    for (text, _, y) in &texts {
        assert!(*y >= 40.0 && *y <= 841.89 - 40.0, "{text} at y = {y}");
    }
    let shown: Vec<&str> = texts.iter().map(|t| t.0.as_str()).collect();
    let expected: Vec<String> = std::iter::once("Skills".to_string())
        .chain((0..80).map(|i| format!("S{i}")))
        .collect();
    assert_eq!(shown, expected);
}
