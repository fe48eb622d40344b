//! Paginated PDF rendering of a summary
//!
//! Layout mirrors a classic single-font report: A4 portrait, Helvetica 12pt,
//! each input line flowed as its own word-wrapped paragraph, and a new page
//! whenever the next row would cross the bottom margin.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::encoding::{encode_winansi, text_width};
use crate::error::{Error, Result};

/// Millimetres to PDF points
const MM: f32 = 72.0 / 25.4;

/// Page geometry and font settings, in points
#[derive(Debug, Clone, Copy)]
pub struct PageLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    /// Inner horizontal padding of each text row
    pub cell_padding: f32,
    pub line_height: f32,
    pub font_size: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            page_width: 210.0 * MM,
            page_height: 297.0 * MM,
            margin_left: 10.0 * MM,
            margin_top: 10.0 * MM,
            margin_right: 10.0 * MM,
            margin_bottom: 15.0 * MM,
            cell_padding: 1.0 * MM,
            line_height: 8.0 * MM,
            font_size: 12.0,
        }
    }
}

impl PageLayout {
    /// Usable width for glyphs on a row
    pub fn text_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right - 2.0 * self.cell_padding
    }

    /// Lowest y (from top) a row may end at
    fn break_threshold(&self) -> f32 {
        self.page_height - self.margin_bottom
    }
}

/// A positioned row of encoded text
#[derive(Debug, Clone, PartialEq)]
struct Row {
    /// Distance from the top of the page to the top of the row
    top: f32,
    text: Vec<u8>,
}

/// Split an encoded line into rows no wider than `max_width`.
///
/// Breaks at the last space that fits; a word wider than the row is broken
/// between characters. An empty line yields one empty row.
pub fn wrap_line(line: &[u8], max_width: f32, font_size: f32) -> Vec<Vec<u8>> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut last_space: Option<usize> = None;
    let mut width = 0.0f32;
    let mut i = 0;

    while i < line.len() {
        let byte = line[i];
        if byte == b' ' {
            last_space = Some(i);
        }
        width += text_width(&[byte], font_size);

        if width > max_width {
            match last_space {
                Some(space) if space > start => {
                    rows.push(line[start..space].to_vec());
                    start = space + 1;
                }
                _ => {
                    // Always make progress, even if one glyph overflows
                    let end = if i == start { i + 1 } else { i };
                    rows.push(line[start..end].to_vec());
                    start = end;
                }
            }
            i = start;
            width = 0.0;
            last_space = None;
            continue;
        }
        i += 1;
    }

    rows.push(line[start..].to_vec());
    rows
}

/// Assign every row of `summary` to a page
fn paginate(summary: &str, layout: &PageLayout) -> Vec<Vec<Row>> {
    let mut pages: Vec<Vec<Row>> = vec![Vec::new()];
    let mut y = layout.margin_top;

    for line in summary.split('\n') {
        let encoded = encode_winansi(line.trim_end_matches('\r'));
        for text in wrap_line(&encoded, layout.text_width(), layout.font_size) {
            if y + layout.line_height > layout.break_threshold() && !pages.last().map_or(true, Vec::is_empty) {
                pages.push(Vec::new());
                y = layout.margin_top;
            }
            if let Some(page) = pages.last_mut() {
                page.push(Row { top: y, text });
            }
            y += layout.line_height;
        }
    }

    pages
}

fn page_operations(rows: &[Row], layout: &PageLayout) -> Vec<Operation> {
    let x = (layout.margin_left + layout.cell_padding).round() as i64;
    let mut operations = Vec::with_capacity(rows.len() * 5);

    for row in rows.iter().filter(|r| !r.text.is_empty()) {
        // Baseline sits in the middle of the row, shifted by 0.3 em
        let baseline = row.top + 0.5 * layout.line_height + 0.3 * layout.font_size;
        let y = (layout.page_height - baseline).round() as i64;

        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec!["F1".into(), Object::Integer(layout.font_size.round() as i64)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(x), Object::Integer(y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(row.text.clone(), StringFormat::Literal)],
        ));
        operations.push(Operation::new("ET", vec![]));
    }

    operations
}

/// Render `summary` as PDF bytes
pub fn render_pdf(summary: &str) -> Result<Vec<u8>> {
    render_pdf_with_layout(summary, &PageLayout::default())
}

/// Render `summary` as PDF bytes using a custom layout
pub fn render_pdf_with_layout(summary: &str, layout: &PageLayout) -> Result<Vec<u8>> {
    let pages = paginate(summary, layout);

    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let media_box = vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(layout.page_width.round() as i64),
        Object::Integer(layout.page_height.round() as i64),
    ];

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for rows in &pages {
        let content = Content {
            operations: page_operations(rows, layout),
        };
        let encoded = content
            .encode()
            .map_err(|e| Error::export(format!("Failed to encode page content: {}", e)))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => media_box.clone(),
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| Error::export(format!("Failed to serialize PDF: {}", e)))?;

    tracing::debug!("Rendered summary PDF: {} pages, {} bytes", page_count, bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_line_single_row() {
        let rows = wrap_line(b"Quantum computing uses qubits.", 500.0, 12.0);
        assert_eq!(rows, vec![b"Quantum computing uses qubits.".to_vec()]);
    }

    #[test]
    fn test_wrap_empty_line_keeps_blank_row() {
        assert_eq!(wrap_line(b"", 500.0, 12.0), vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_wrap_breaks_at_spaces() {
        let line = "word ".repeat(60);
        let encoded = line.trim_end().as_bytes().to_vec();
        let rows = wrap_line(&encoded, 100.0, 12.0);

        assert!(rows.len() > 1);
        for row in &rows {
            assert!(text_width(row, 12.0) <= 100.0);
            assert!(!row.starts_with(b" "));
        }
        let rejoined = rows
            .iter()
            .map(|r| String::from_utf8_lossy(r).into_owned())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, line.trim_end());
    }

    #[test]
    fn test_wrap_hard_breaks_long_word() {
        let word = vec![b'm'; 200];
        let rows = wrap_line(&word, 100.0, 12.0);
        assert!(rows.len() > 1);
        assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), 200);
    }

    #[test]
    fn test_wide_latin1_glyphs_stay_inside_margins() {
        let layout = PageLayout::default();
        let encoded = encode_winansi(&"Æ".repeat(200));
        let rows = wrap_line(&encoded, layout.text_width(), layout.font_size);

        assert!(rows.len() > 1);
        for row in &rows {
            assert!(text_width(row, layout.font_size) <= layout.text_width());
        }
        assert_eq!(rows.iter().map(Vec::len).sum::<usize>(), 200);
    }

    #[test]
    fn test_paginate_breaks_before_bottom_margin() {
        let layout = PageLayout::default();
        let summary = (0..100).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let pages = paginate(&summary, &layout);

        assert!(pages.len() >= 3);
        for page in &pages {
            for row in page {
                assert!(row.top + layout.line_height <= layout.page_height - layout.margin_bottom + 0.01);
            }
        }
        assert_eq!(pages.iter().map(Vec::len).sum::<usize>(), 100);
    }

    #[test]
    fn test_render_produces_loadable_pdf() {
        let bytes = render_pdf("First paragraph.\n\nSecond paragraph.").unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_long_summary_spans_pages() {
        let summary = "A sentence that keeps going. ".repeat(400);
        let bytes = render_pdf(&summary).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() > 1);
    }

    #[test]
    fn test_render_non_latin_text_does_not_fail() {
        assert!(render_pdf("Résumé — “quoted” 量子计算").is_ok());
    }
}
