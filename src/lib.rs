#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod encode;
pub mod ir;
pub mod loader;
pub mod processor;
pub mod record;
pub mod render;
pub mod report;
pub mod text;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, PaletteOverlay, RenderConfig, load_config};
pub use ir::{GraphData, Link, Node, NodeId, NodeKind};
pub use loader::{LoadError, LoadOutput, LoadReport, load_records, parse_records};
pub use processor::{GraphProcessor, create_graph_data};
pub use record::Record;
pub use render::{DEFAULT_TEMPLATE, RenderError, render_html};
pub use theme::{Palette, Rgb};
