use std::path::Path;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod app;
mod config;
mod glyph;
mod math;
mod render;
mod sanitize;

use app::VectorApp;
use config::VizConfig;

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = VizConfig::load_or_default(Path::new("vector_viz.json"));

    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "3D Vector Algebra Visualizer",
        options,
        Box::new(move |_cc| Box::new(VectorApp::new(config))),
    )
}
