mod app;
mod graph;
mod layout;
mod records;
mod render;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON array of knowledge-source records.
    #[arg(long)]
    knowledge: Option<PathBuf>,

    /// JSON array of memory records.
    #[arg(long)]
    memories: Option<PathBuf>,

    /// Tracing filter directive, used when RUST_LOG is unset.
    #[arg(long, default_value = "knowledge_graph_viewer=info")]
    log_filter: String,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 820.0)]
    height: f32,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_filter);

    let paths = app::RecordPaths {
        knowledge: args.knowledge,
        memories: args.memories,
    };
    tracing::info!(?paths, "starting knowledge graph viewer");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height]),
        ..Default::default()
    };

    eframe::run_native(
        "Knowledge graph",
        options,
        Box::new(move |cc| Ok(Box::new(app::KnowledgeGraphApp::new(cc, paths)))),
    )
}
