//! HTML rendering of the summarizer page

use std::fmt::Write;

use crate::types::{preview, SummaryLength};

use super::session::{InteractionState, Notice, NoticeLevel};

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 760px; margin: 2rem auto; padding: 0 1rem; color: #333; }
h1, .tagline { text-align: center; }
textarea { width: 100%; box-sizing: border-box; }
button { background-color: #d9d4fc; color: #4b4b4b; border-radius: 10px; padding: 8px 16px; font-size: 16px; border: none; cursor: pointer; }
.notice { padding: 0.6rem 1rem; border-radius: 6px; margin: 0.5rem 0; }
.notice.success { background: #e3f6e8; }
.notice.warning { background: #fff4d6; }
.notice.error { background: #fde2e1; }
.actions { display: flex; gap: 1rem; margin: 1rem 0; }
.summary { white-space: pre-wrap; background: #f7f6fe; padding: 1rem; border-radius: 8px; }
.downloads a { margin-right: 1rem; }
"#;

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn render_notices(notices: &[Notice]) -> String {
    let mut html = String::new();
    for notice in notices {
        let class = match notice.level {
            NoticeLevel::Success => "success",
            NoticeLevel::Warning => "warning",
            NoticeLevel::Error => "error",
        };
        let _ = write!(
            html,
            r#"<div class="notice {}">{}</div>"#,
            class,
            escape_html(&notice.message)
        );
    }
    html
}

fn render_preview(state: &InteractionState, preview_chars: usize) -> String {
    let Some(document) = &state.document else {
        return String::new();
    };
    let (text, _) = preview(&document.text, preview_chars);
    format!(
        r#"<h4>Extracted Text Preview: {name} ({pages} pages)</h4>
<textarea rows="8" readonly>{text}</textarea>"#,
        name = escape_html(&document.filename),
        pages = document.page_count,
        text = escape_html(&text),
    )
}

fn render_length_options(selected: SummaryLength) -> String {
    SummaryLength::ALL
        .iter()
        .map(|length| {
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                length.as_str(),
                if *length == selected { " selected" } else { "" },
                length.label()
            )
        })
        .collect()
}

fn render_summary(state: &InteractionState) -> String {
    let Some(summary) = &state.summary else {
        return String::new();
    };
    format!(
        r#"<h3>Summary:</h3>
<div class="summary">{}</div>
<p class="downloads"><a href="/download/txt">Download as TXT</a><a href="/download/pdf">Download as PDF</a></p>"#,
        escape_html(summary)
    )
}

/// Full page for the current state; `notices` are shown once
pub fn render_page(state: &InteractionState, notices: &[Notice], preview_chars: usize) -> String {
    let final_text = state.final_text();
    let counts = if final_text.is_empty() {
        String::new()
    } else {
        let stats = final_text.stats();
        format!(
            "<p><strong>Words:</strong> {} &bull; <strong>Characters:</strong> {}</p>",
            stats.words, stats.chars
        )
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>AI Notes Summarizer</title>
<style>{style}</style>
</head>
<body>
<h1>AI Notes Summarizer</h1>
<p class="tagline">Upload PDFs or paste notes, get clean summaries instantly.</p>
{notices}
<form method="post" enctype="multipart/form-data" action="/generate">
<h3>Upload a PDF file (optional):</h3>
<input type="file" name="file" accept=".pdf,application/pdf">
<button type="submit" formaction="/upload">Upload</button>
{preview}
<h3>Or paste text manually:</h3>
<textarea name="manual_text" rows="12" placeholder="Enter long notes, textbooks, articles...">{manual}</textarea>
{counts}
<label>Select summary length:
<select name="length">{options}</select>
</label>
<div class="actions">
<button type="submit" formaction="/generate">Generate Summary</button>
<button type="submit" formaction="/clear">Clear / Reset</button>
</div>
</form>
{summary}
</body>
</html>
"#,
        style = STYLE,
        notices = render_notices(notices),
        preview = render_preview(state, preview_chars),
        manual = escape_html(&state.manual_text),
        counts = counts,
        options = render_length_options(state.length),
        summary = render_summary(state),
    )
}
