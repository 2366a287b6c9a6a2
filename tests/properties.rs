use std::collections::HashSet;

use edugraph::encode::{clamp01, objective_radius, score_to_color};
use edugraph::text::{escape_html, trim_label};
use edugraph::{NodeId, Palette, Record, create_graph_data};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

fn arb_id() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        Just(json!("")),
        Just(json!(0)),
        (0u8..12).prop_map(|n| json!(format!("n{n}"))),
        (1i64..6).prop_map(|n| json!(n)),
    ]
}

fn arb_type() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![
        Just(None),
        Just(Some("kazanım")),
        Just(Some("konu")),
        Just(Some("grup")),
        Just(Some("alt_grup")),
        Just(Some("unit")),
    ]
}

prop_compose! {
    fn arb_record()(
        id in arb_id(),
        parent in arb_id(),
        node_type in arb_type(),
        title in proptest::option::of(".{0,60}"),
        score in proptest::option::of(-2.0f64..3.0),
        size in proptest::option::of(-5i64..20),
    ) -> Record {
        let mut fields = Map::new();
        fields.insert("id".to_string(), id);
        fields.insert("parent_id".to_string(), parent);
        if let Some(tag) = node_type {
            fields.insert("node_type".to_string(), json!(tag));
        }
        if let Some(title) = title {
            fields.insert("baslik".to_string(), json!(title));
        }
        if let Some(score) = score {
            fields.insert("basari_puani".to_string(), json!(score));
        }
        if let Some(size) = size {
            fields.insert("node_size".to_string(), json!(size));
        }
        Record::new(fields)
    }
}

proptest! {
    #[test]
    fn clamp01_stays_in_unit_interval(x in proptest::num::f64::ANY) {
        let clamped = clamp01(x);
        prop_assert!((0.0..=1.0).contains(&clamped));
        prop_assert_eq!(clamp01(clamped), clamped);
    }

    #[test]
    fn clamp01_is_monotonic(a in -10.0f64..10.0, b in -10.0f64..10.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(clamp01(lo) <= clamp01(hi));
    }

    #[test]
    fn objective_radius_is_at_least_eight(base in 0u32..40, score in -5.0f64..5.0) {
        prop_assert!(objective_radius(base, score) >= 8);
    }

    #[test]
    fn score_color_is_deterministic(score in -1.0f64..2.0) {
        let stops = Palette::curriculum().score_stops;
        prop_assert_eq!(score_to_color(score, &stops), score_to_color(score, &stops));
    }

    #[test]
    fn trimmed_labels_respect_cap(text in ".{0,80}", cap in 1usize..50) {
        let label = trim_label(&escape_html(&text), cap);
        prop_assert!(label.chars().count() <= cap);
        // no half entity right before the ellipsis
        if let Some(head) = label.strip_suffix('…') {
            if let Some(amp) = head.rfind('&') {
                prop_assert!(head[amp..].contains(';'));
            }
        }
    }

    #[test]
    fn escaped_text_has_no_metacharacters(text in ".{0,80}") {
        let escaped = escape_html(&text);
        prop_assert!(!escaped.contains('<') && !escaped.contains('>'));
        prop_assert!(!escaped.contains('"') && !escaped.contains('\''));
        let bare_amp = escaped
            .match_indices('&')
            .any(|(idx, _)| !["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;"].iter().any(|e| escaped[idx..].starts_with(e)));
        prop_assert!(!bare_amp);
    }

    #[test]
    fn graphs_have_no_dangling_links(records in proptest::collection::vec(arb_record(), 0..40)) {
        let (nodes, links) = create_graph_data(&records);
        let ids: HashSet<&NodeId> = nodes.iter().map(|n| &n.id).collect();
        for link in &links {
            prop_assert!(ids.contains(&link.source));
            prop_assert!(ids.contains(&link.target));
        }
        let usable = records.iter().filter(|r| r.id().is_some()).count();
        prop_assert_eq!(nodes.len(), usable);
        for node in &nodes {
            prop_assert!(node.label.chars().count() <= node.kind().label_cap());
            prop_assert!(node.r >= 1);
        }
    }

    #[test]
    fn processing_is_idempotent(records in proptest::collection::vec(arb_record(), 0..30)) {
        prop_assert_eq!(create_graph_data(&records), create_graph_data(&records));
    }
}
