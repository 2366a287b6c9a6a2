use edugraph::report::{Envelope, GraphDump, GraphStats, LinksDump, NodesDump, to_json};
use edugraph::{GraphProcessor, PaletteOverlay, parse_records};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum View {
    #[default]
    Data,
    Nodes,
    Links,
    Stats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphOptions {
    view: Option<View>,
    node_type: Option<String>,
    palette: Option<PaletteOverlay>,
}

/// Builds the requested envelope. Record-level failures become an error
/// envelope rather than an exception so callers always get JSON back.
fn build_envelope(records_json: &str, options: GraphOptions) -> Result<String, serde_json::Error> {
    let loaded = match parse_records(records_json) {
        Ok(loaded) => loaded,
        Err(error) => return to_json(&Envelope::<()>::error(error.to_string()), false),
    };
    let palette = match options.palette.unwrap_or_default().into_palette() {
        Ok(palette) => palette,
        Err(error) => return to_json(&Envelope::<()>::error(format!("{error:#}")), false),
    };
    let mut processor = GraphProcessor::with_palette(palette);
    let (nodes, links) = processor.process(&loaded.records);

    match options.view.unwrap_or_default() {
        View::Data => to_json(&Envelope::success(GraphDump::new(&nodes, &links)), false),
        View::Nodes => to_json(
            &Envelope::success(NodesDump::new(&nodes, options.node_type.as_deref())),
            false,
        ),
        View::Links => to_json(&Envelope::success(LinksDump::new(&links)), false),
        View::Stats => to_json(&Envelope::success(GraphStats::from_graph(&nodes, &links)), false),
    }
}

#[wasm_bindgen]
pub fn curriculum_graph(records_json: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<GraphOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        GraphOptions::default()
    };

    build_envelope(records_json, options).map_err(|error| JsValue::from_str(&error.to_string()))
}
