mod app;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use orgflow_layout::EngineConfig;
use tracing::{Level, info};

use crate::app::{GraphSource, OrgFlowApp};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph snapshot or workflow model JSON. Shows a demo organization when omitted.
    #[arg(long)]
    graph: Option<PathBuf>,

    /// Engine configuration JSON (simulation, viewport and node extents).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .init();

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let source = args.graph.map_or(GraphSource::Demo, GraphSource::File);
    info!(?source, "starting viewer");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "OrgFlow",
        options,
        Box::new(move |cc| Ok(Box::new(OrgFlowApp::new(cc, source, config)))),
    )
    .map_err(|error| anyhow!("viewer exited with an error: {error}"))
}
