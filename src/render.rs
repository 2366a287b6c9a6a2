use crate::config::RenderConfig;
use crate::ir::{Link, Node};
use crate::text::escape_html;
use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/graph.html");

static PLACEHOLDER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{\s*(nodes_json|links_json|title)\s*\}\}").unwrap());

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template has no {{{{ {0} }}}} placeholder")]
    MissingPlaceholder(&'static str),
    #[error("failed to serialize graph data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serializes `value` for embedding inside a `<script>` element. `<`, `>`
/// and `&` only occur inside JSON strings, so they are written as `\u` escapes
/// and no record text can open a comment or close the element.
pub fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            _ => out.push(ch),
        }
    }
    Ok(out)
}

pub fn render_html(
    template: &str,
    nodes: &[Node],
    links: &[Link],
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let mut seen_nodes = false;
    let mut seen_links = false;
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        match &caps[1] {
            "nodes_json" => seen_nodes = true,
            "links_json" => seen_links = true,
            _ => {}
        }
    }
    if !seen_nodes {
        return Err(RenderError::MissingPlaceholder("nodes_json"));
    }
    if !seen_links {
        return Err(RenderError::MissingPlaceholder("links_json"));
    }

    let nodes_json = script_json(nodes)?;
    let links_json = script_json(links)?;
    let title = escape_html(&config.title);

    let html = PLACEHOLDER_RE.replace_all(template, |caps: &Captures| match &caps[1] {
        "nodes_json" => nodes_json.clone(),
        "links_json" => links_json.clone(),
        _ => title.clone(),
    });
    Ok(html.into_owned())
}

pub fn load_template(config: &RenderConfig) -> Result<String> {
    match &config.template {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display())),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

pub fn write_output(contents: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, contents)
                .with_context(|| format!("failed to write {}", path.display()))?;
        }
        None => {
            print!("{}", contents);
        }
    }
    Ok(())
}
