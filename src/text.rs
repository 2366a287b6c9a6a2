use crate::encode::clamp01;
use crate::ir::{NodeId, NodeKind};

pub const ELLIPSIS: char = '…';

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Shortens already-escaped text to at most `max_chars` characters, the
/// ellipsis included. An entity split by the cut is dropped whole.
pub fn trim_label(escaped: &str, max_chars: usize) -> String {
    if escaped.chars().count() <= max_chars {
        return escaped.to_string();
    }
    if max_chars == 0 {
        return String::new();
    }
    let cut = escaped
        .char_indices()
        .nth(max_chars - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(escaped.len());
    let mut head = &escaped[..cut];
    if let Some(amp) = head.rfind('&') {
        if !head[amp..].contains(';') {
            head = &head[..amp];
        }
    }
    format!("{head}{ELLIPSIS}")
}

pub fn node_label(kind: NodeKind, title: Option<&str>, code: Option<&str>, id: &NodeId) -> String {
    let source = match title.or(code) {
        Some(text) => escape_html(text),
        None => escape_html(&id.to_string()),
    };
    trim_label(&source, kind.label_cap())
}

/// Raw tooltip inputs. `score` is set only for objective nodes.
#[derive(Debug, Clone, Default)]
pub struct TooltipFields<'a> {
    pub title: Option<&'a str>,
    pub code: Option<&'a str>,
    pub topic: Option<&'a str>,
    pub grade: Option<&'a str>,
    pub test: Option<&'a str>,
    pub score: Option<f64>,
}

/// HTML tooltip with one line per present field. Empty when the record
/// carries none of them.
pub fn tooltip(fields: &TooltipFields<'_>) -> String {
    let mut html = String::new();
    if let Some(title) = fields.title {
        html.push_str(&format!("<b>{}</b>", escape_html(title)));
    }
    let lines = [
        ("Kod", fields.code),
        ("Konu", fields.topic),
        ("Sınıf", fields.grade),
        ("Test", fields.test),
    ];
    for (caption, value) in lines {
        if let Some(value) = value {
            html.push_str(&format!("<div>{caption}: {}</div>", escape_html(value)));
        }
    }
    if let Some(score) = fields.score {
        let percent = (clamp01(score) * 100.0).round() as u32;
        html.push_str(&format!("<div>Başarı: {percent}%</div>"));
    }
    html
}
