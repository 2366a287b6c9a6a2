use crate::ir::{Link, Node, NodeId};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// `{"status": "success", "data": ...}` or `{"status": "error", "message": ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success { data: T },
    Error { message: String },
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self::Success { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GraphDump<'a> {
    pub nodes: &'a [Node],
    pub links: &'a [Link],
    pub metadata: Metadata,
}

#[derive(Debug, Serialize)]
pub struct Metadata {
    pub total_nodes: usize,
    pub total_links: usize,
    pub node_types: BTreeMap<String, usize>,
}

#[derive(Debug, Serialize)]
pub struct NodesDump<'a> {
    pub nodes: Vec<&'a Node>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct LinksDump<'a> {
    pub links: &'a [Link],
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_links: usize,
    pub node_types: BTreeMap<String, usize>,
    pub link_types: BTreeMap<String, usize>,
    pub average_connections: f64,
}

impl<'a> GraphDump<'a> {
    pub fn new(nodes: &'a [Node], links: &'a [Link]) -> Self {
        Self {
            nodes,
            links,
            metadata: Metadata {
                total_nodes: nodes.len(),
                total_links: links.len(),
                node_types: node_type_counts(nodes),
            },
        }
    }
}

impl<'a> NodesDump<'a> {
    /// Keeps only nodes of `node_type` when one is given.
    pub fn new(nodes: &'a [Node], node_type: Option<&str>) -> Self {
        let nodes: Vec<&Node> = nodes
            .iter()
            .filter(|node| node_type.is_none_or(|wanted| node.node_type == wanted))
            .collect();
        let count = nodes.len();
        Self { nodes, count }
    }
}

impl<'a> LinksDump<'a> {
    pub fn new(links: &'a [Link]) -> Self {
        Self {
            links,
            count: links.len(),
        }
    }
}

impl GraphStats {
    pub fn from_graph(nodes: &[Node], links: &[Link]) -> Self {
        Self {
            total_nodes: nodes.len(),
            total_links: links.len(),
            node_types: node_type_counts(nodes),
            link_types: link_type_counts(nodes, links),
            average_connections: average_connections(nodes.len(), links.len()),
        }
    }
}

pub fn node_type_counts(nodes: &[Node]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for node in nodes {
        *counts.entry(node.node_type.clone()).or_insert(0) += 1;
    }
    counts
}

pub fn link_type_counts(nodes: &[Node], links: &[Link]) -> BTreeMap<String, usize> {
    // later duplicates win, matching the processor's id index
    let by_id: HashMap<&NodeId, &Node> = nodes.iter().map(|node| (&node.id, node)).collect();
    let mut counts = BTreeMap::new();
    for link in links {
        let (Some(source), Some(target)) = (by_id.get(&link.source), by_id.get(&link.target)) else {
            continue;
        };
        let key = format!("{} → {}", source.node_type, target.node_type);
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Mean degree, rounded to two decimals; 0 for an empty graph.
pub fn average_connections(node_count: usize, link_count: usize) -> f64 {
    if node_count == 0 {
        return 0.0;
    }
    let average = (link_count * 2) as f64 / node_count as f64;
    (average * 100.0).round() / 100.0
}

pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

pub fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>, pretty: bool) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            write_json_to(BufWriter::new(file), value, pretty)
        }
        None => write_json_to(io::stdout().lock(), value, pretty),
    }
}

fn write_json_to<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
