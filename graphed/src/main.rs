#![warn(clippy::all, rust_2018_idioms)]

use graphed::{Config, GraphEdApp};

const WINDOW_NAME: &str = "GraphEd";
const WINDOW_WIDTH: f32 = 800.0;
const WINDOW_HEIGHT: f32 = 500.0;

fn main() -> eframe::Result {
    env_logger::init();

    let config = if let Ok(config) = Config::from_config_file() {
        config
    } else {
        log::warn!("unable to load config file \".graphed\" from home directory");
        Config::default()
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        WINDOW_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(GraphEdApp::new(cc, config)))),
    )
}
