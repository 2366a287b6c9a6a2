use crate::config::load_config;
use crate::loader::{LoadOutput, parse_records};
use crate::processor::GraphProcessor;
use crate::render::{load_template, render_html, write_output};
use crate::report::{Envelope, GraphDump, GraphStats, LinksDump, NodesDump, write_json};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "edugraph", version, about = "Curriculum records to force-graph nodes and links")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Input JSON file or '-' for stdin
    #[arg(short = 'i', long = "input", global = true)]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output", global = true)]
    pub output: Option<PathBuf>,

    /// Config JSON5 file (colors, radii, score stops, page title, template)
    #[arg(short = 'c', long = "configFile", global = true)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// More log output (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Render the interactive HTML page
    Html {
        /// HTML template with {{ nodes_json }} and {{ links_json }} placeholders
        #[arg(short = 't', long = "template")]
        template: Option<PathBuf>,

        /// Page title
        #[arg(long = "title")]
        title: Option<String>,
    },
    /// Nodes, links and metadata in a success envelope
    Data,
    /// Nodes only, optionally filtered by type
    Nodes {
        #[arg(long = "type")]
        node_type: Option<String>,
    },
    /// Links only
    Links,
    /// Counts, type distributions and average connections
    Stats,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if args.pretty {
        config.render.pretty = true;
    }
    if let Command::Html { template, title } = &args.command {
        if let Some(template) = template {
            config.render.template = Some(template.clone());
        }
        if let Some(title) = title {
            config.render.title = title.clone();
        }
    }

    let input = read_input(args.input.as_deref())?;
    let LoadOutput { records, report } = parse_records(&input).context("failed to load records")?;
    if report.dropped > 0 {
        warn!(dropped = report.dropped, total = report.total, "records without a usable id were skipped");
    }
    info!(usable = report.usable, "loaded records");

    let mut processor = GraphProcessor::with_palette(config.palette.clone());
    let (nodes, links) = processor.process(&records);
    let output = args.output.as_deref();
    let pretty = config.render.pretty;

    match &args.command {
        Command::Html { .. } => {
            let template = load_template(&config.render)?;
            let html = render_html(&template, &nodes, &links, &config.render)?;
            write_output(&html, output)?;
        }
        Command::Data => {
            write_json(&Envelope::success(GraphDump::new(&nodes, &links)), output, pretty)?;
        }
        Command::Nodes { node_type } => {
            let dump = NodesDump::new(&nodes, node_type.as_deref());
            write_json(&Envelope::success(dump), output, pretty)?;
        }
        Command::Links => {
            write_json(&Envelope::success(LinksDump::new(&links)), output, pretty)?;
        }
        Command::Stats => {
            write_json(&Envelope::success(GraphStats::from_graph(&nodes, &links)), output, pretty)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}
