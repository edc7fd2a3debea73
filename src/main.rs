use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Parser;
use eframe::egui;
use tweet_swarm::app::TweetSwarmApp;
use tweet_swarm::color::ColorMetric;
use tweet_swarm::config::ChartConfig;
use tweet_swarm::data::loader;
use tweet_swarm::state::AppState;
use tweet_swarm::svg;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Tweet table to open (.json, .csv or .parquet).
    input: Option<PathBuf>,

    /// Metric used to color the markers.
    #[arg(long, value_enum, default_value_t = ColorMetric::Sentiment)]
    metric: ColorMetric,

    /// JSON file overriding chart geometry and force constants.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the chart to this SVG file and exit instead of opening a window.
    #[arg(long, value_name = "FILE")]
    export_svg: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ChartConfig::from_file(path)?,
        None => ChartConfig::default(),
    };
    let mut state = AppState::new(config);
    state.metric = args.metric;

    if let Some(output) = &args.export_svg {
        return export_svg(state, args.input.as_deref(), output);
    }

    if let Some(input) = &args.input {
        match loader::load_file(input) {
            Ok(tweets) => state.set_tweets(tweets),
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", input.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1240.0, 720.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tweet Swarm",
        options,
        Box::new(|_cc| Ok(Box::new(TweetSwarmApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the viewer: {e}"))
}

/// Headless mode: lay out, build the scene and write it as SVG.
fn export_svg(mut state: AppState, input: Option<&Path>, output: &Path) -> Result<()> {
    let Some(input) = input else {
        bail!("--export-svg needs an INPUT file");
    };
    state.set_tweets(loader::load_file(input)?);

    let scene = state.scene();
    let svg = svg::render_svg(scene.as_ref(), state.config.width, state.config.height);
    svg::write_svg(&svg, output)
}
