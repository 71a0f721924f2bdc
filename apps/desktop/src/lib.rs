mod app;
mod commands;
mod config;
mod navigation;
mod state;
mod store;
mod ui;

use anyhow::Context;
use app::App;
use config::AppConfig;
use std::io;
use store::JsonProfileStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter. Fixed so the terminal stays readable; logs go to stderr.
const LOG_FILTER: &str = "warn,quadrolingo_lib=info,lesson_core=info";

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(LOG_FILTER))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Run the app in the terminal until `quit`, Ctrl-C or end of input.
pub fn run() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::default();
    let store = JsonProfileStore::open(&config.data_file);
    let mut app = App::new(config, Box::new(store)).context("failed to load lessons")?;

    ui::terminal::run(&mut app)?;

    tracing::info!("bye");
    Ok(())
}
