use crate::encode::encode;
use crate::ir::{GraphData, Link, Node, NodeId, NodeKind, OBJECTIVE_TYPE};
use crate::record::Record;
use crate::text::{TooltipFields, node_label, tooltip};
use crate::theme::Palette;
use std::collections::HashMap;
use tracing::{debug, info};

/// Turns curriculum records into force-graph nodes and links.
///
/// Nodes are built in a first pass so that a child listed before its parent
/// still resolves its link in the second pass. The id index is rebuilt on
/// every call; a processor can be reused but is not shared between threads.
#[derive(Debug, Clone, Default)]
pub struct GraphProcessor {
    palette: Palette,
    index: HashMap<NodeId, usize>,
}

impl GraphProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: Palette) -> Self {
        Self {
            palette,
            index: HashMap::new(),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn process(&mut self, records: &[Record]) -> (Vec<Node>, Vec<Link>) {
        self.index.clear();
        let nodes = self.build_nodes(records);
        let links = self.build_links(records);
        info!(
            records = records.len(),
            nodes = nodes.len(),
            links = links.len(),
            "built curriculum graph"
        );
        (nodes, links)
    }

    fn build_nodes(&mut self, records: &[Record]) -> Vec<Node> {
        let mut nodes = Vec::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let Some(node) = self.build_node(record) else {
                debug!(position, "skipping record without a usable id");
                continue;
            };
            // Duplicates stay in the output; the index keeps the last one.
            if self.index.insert(node.id.clone(), nodes.len()).is_some() {
                debug!(id = %node.id, position, "duplicate node id");
            }
            nodes.push(node);
        }
        nodes
    }

    pub fn build_node(&self, record: &Record) -> Option<Node> {
        let id = record.id()?;
        let node_type = record.type_tag().unwrap_or(OBJECTIVE_TYPE).to_string();
        let kind = NodeKind::from_tag(&node_type);
        let score = record.success_score();
        let encoding = encode(&self.palette, &node_type, kind, score, record.size_hint());

        let title = record.title();
        let code = record.code();
        let topic = record.topic();
        let grade = record.grade();
        let test = record.test();

        let label = node_label(kind, title.as_deref(), code.as_deref(), &id);
        let title = tooltip(&TooltipFields {
            title: title.as_deref(),
            code: code.as_deref(),
            topic: topic.as_deref(),
            grade: grade.as_deref(),
            test: test.as_deref(),
            score: kind.is_objective().then_some(score),
        });

        Some(Node {
            id,
            node_type,
            r: encoding.r,
            color: encoding.color,
            label,
            title,
        })
    }

    fn build_links(&self, records: &[Record]) -> Vec<Link> {
        let mut links = Vec::new();
        for record in records {
            let (Some(child), Some(parent)) = (record.id(), record.parent_id()) else {
                continue;
            };
            if !self.index.contains_key(&child) {
                continue;
            }
            if !self.index.contains_key(&parent) {
                debug!(child = %child, parent = %parent, "dropping link to unknown parent");
                continue;
            }
            links.push(Link {
                source: parent,
                target: child,
            });
        }
        links
    }
}

pub fn create_graph_data(records: &[Record]) -> (Vec<Node>, Vec<Link>) {
    GraphProcessor::new().process(records)
}

impl GraphData {
    pub fn from_records(records: &[Record]) -> Self {
        let (nodes, links) = create_graph_data(records);
        Self { nodes, links }
    }

    pub fn from_records_with(records: &[Record], palette: Palette) -> Self {
        let (nodes, links) = GraphProcessor::with_palette(palette).process(records);
        Self { nodes, links }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Rgb;
    use serde_json::{Value, json};
    use std::collections::HashSet;

    fn records(value: Value) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn single_objective() {
        let (nodes, links) = create_graph_data(&records(json!([
            {"id": "k1", "baslik": "Objective One", "basari_puani": 0.9}
        ])));
        assert_eq!(nodes.len(), 1);
        assert!(links.is_empty());
        let node = &nodes[0];
        assert_eq!(node.id, NodeId::from("k1"));
        assert_eq!(node.node_type, OBJECTIVE_TYPE);
        assert_eq!(node.r, 19);
        assert_eq!(node.label, "Objective One");
        assert!(node.title.ends_with("<div>Başarı: 90%</div>"));
        let stops = &Palette::curriculum().score_stops;
        let color: Rgb = node.color.parse().unwrap();
        assert!(color.g > color.r, "high scores lean green: {}", node.color);
        assert_ne!(color, stops[0]);
    }

    #[test]
    fn topic_and_child() {
        let (nodes, links) = create_graph_data(&records(json!([
            {"id": "p1", "type": "konu", "baslik": "Topic"},
            {"id": "k1", "parent_id": "p1", "baslik": "Obj", "basari_puani": 0.2}
        ])));
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].node_type, "konu");
        assert!(!nodes[0].title.contains("Başarı"));
        assert_eq!(
            links,
            vec![Link {
                source: NodeId::from("p1"),
                target: NodeId::from("k1"),
            }]
        );
    }

    #[test]
    fn dangling_parent_is_dropped() {
        let (nodes, links) = create_graph_data(&records(json!([
            {"id": "k1", "parent_id": "missing"}
        ])));
        assert_eq!(nodes.len(), 1);
        assert!(links.is_empty());
    }

    #[test]
    fn records_without_id_are_skipped() {
        let (nodes, links) = create_graph_data(&records(json!([
            {"name": "no id field"},
            {"id": "", "baslik": "empty"},
            {"id": null},
            {"id": 0}
        ])));
        assert!(nodes.is_empty());
        assert!(links.is_empty());
    }

    #[test]
    fn child_before_parent_still_links() {
        let (nodes, links) = create_graph_data(&records(json!([
            {"id": "k1", "parent_id": "g1"},
            {"id": "g1", "node_type": "grup", "parent_id": "t1"},
            {"id": "t1", "node_type": "konu"}
        ])));
        assert_eq!(nodes.len(), 3);
        let pairs: Vec<(String, String)> = links
            .iter()
            .map(|l| (l.source.to_string(), l.target.to_string()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("g1".to_string(), "k1".to_string()),
                ("t1".to_string(), "g1".to_string()),
            ]
        );
    }

    #[test]
    fn duplicate_ids_keep_every_node() {
        let (nodes, links) = create_graph_data(&records(json!([
            {"id": "t1", "node_type": "konu", "baslik": "First"},
            {"id": "t1", "node_type": "konu", "baslik": "Second"},
            {"id": "k1", "parent_id": "t1"},
            {"id": "k1", "parent_id": "t1"}
        ])));
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes[0].label, "First");
        assert_eq!(nodes[1].label, "Second");
        // duplicated parent/child pairs are not collapsed
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn numeric_ids_link_to_numeric_parents() {
        let (nodes, links) = create_graph_data(&records(json!([
            {"id": 1, "node_type": "konu"},
            {"id": 2, "parent_id": 1},
            {"id": 3, "parent_id": "1"}
        ])));
        assert_eq!(nodes.len(), 3);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].source, NodeId::from(1));
        assert_eq!(nodes[1].label, "2");
    }

    #[test]
    fn float_parent_ids_resolve_integer_nodes() {
        let (nodes, links) = create_graph_data(&records(json!([
            {"id": 1, "type": "konu"},
            {"id": 2, "parent_id": 1.0}
        ])));
        assert_eq!(nodes.len(), 2);
        assert_eq!(links, vec![Link { source: NodeId::from(1), target: NodeId::from(2) }]);
    }

    #[test]
    fn size_hint_grows_group_nodes() {
        let processor = GraphProcessor::new();
        let input = records(json!([{"id": "g", "node_type": "grup", "node_size": 6}]));
        let node = processor.build_node(&input[0]).unwrap();
        assert_eq!(node.r, processor.palette().base_radius("grup") + 6);
        assert_eq!(node.color, processor.palette().color_for("grup").to_hex());
    }

    #[test]
    fn custom_palette_is_used() {
        let mut palette = Palette::curriculum();
        palette.colors.insert("unit".to_string(), Rgb::new(1, 2, 3));
        palette.radii.insert("unit".to_string(), 30);
        let data = GraphData::from_records_with(
            &records(json!([{"id": "u", "type": "unit"}])),
            palette,
        );
        assert_eq!(data.nodes[0].color, "#010203");
        assert_eq!(data.nodes[0].r, 30);
    }

    #[test]
    fn processing_is_repeatable() {
        let input = records(json!([
            {"id": "p1", "type": "konu"},
            {"id": "k1", "parent_id": "p1", "basari_puani": 0.4},
            {"id": "k2", "parent_id": "nope"}
        ]));
        let mut processor = GraphProcessor::new();
        let first = processor.process(&input);
        let second = processor.process(&input);
        assert_eq!(first, second);

        let ids: HashSet<&NodeId> = first.0.iter().map(|n| &n.id).collect();
        for link in &first.1 {
            assert!(ids.contains(&link.source) && ids.contains(&link.target));
        }
    }

    #[test]
    fn reuse_does_not_leak_index() {
        let mut processor = GraphProcessor::new();
        processor.process(&records(json!([{"id": "p1", "type": "konu"}])));
        let (_, links) = processor.process(&records(json!([{"id": "k1", "parent_id": "p1"}])));
        assert!(links.is_empty());
    }
}
