#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs Box Pusher in a window or headless.

mod config;
mod scene;
mod script;
mod session;

use std::path::PathBuf;

use anyhow::{Context, Result};
use box_pusher_core::WELCOME_BANNER;
use box_pusher_rendering::{render_report, Palette, Presentation, RenderingBackend};
use box_pusher_rendering_macroquad::MacroquadBackend;
use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

use crate::{config::AppConfig, session::Session};

/// Grid-based box pushing puzzle.
#[derive(Debug, Parser)]
#[command(name = "box-pusher", version, about)]
pub(crate) struct Cli {
    /// TOML configuration file [default: box-pusher.toml when present]
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Seed for the level seed stream
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Board width in cells, border included
    #[arg(long)]
    pub(crate) width: Option<u32>,

    /// Board height in cells, border included
    #[arg(long)]
    pub(crate) height: Option<u32>,

    /// Directory holding game_state_step_<n>.json snapshots
    #[arg(long, value_name = "DIR")]
    pub(crate) save_dir: Option<PathBuf>,

    /// Do not write snapshots
    #[arg(long)]
    pub(crate) no_save: bool,

    /// Ignore existing snapshots and generate a new level
    #[arg(long)]
    pub(crate) fresh: bool,

    /// Actions applied before play starts, e.g. "w,d,space,r"
    #[arg(long, value_name = "ACTIONS")]
    pub(crate) script: Option<String>,

    /// Print the final board instead of opening a window
    #[arg(long)]
    pub(crate) headless: bool,
}

/// Entry point for the Box Pusher command-line interface.
fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::resolve(&cli).context("failed to load configuration")?;
    println!("{WELCOME_BANNER}");

    let mut session = Session::start(&config)?;
    if let Some(source) = &cli.script {
        let actions = script::parse(source).context("failed to parse --script")?;
        script::run(&mut session, &actions);
    }

    if cli.headless {
        println!("{}", render_report(&scene::from_state(session.state())));
        return Ok(());
    }

    let presentation = Presentation::new(
        config.window.title.clone(),
        Palette::CLASSIC,
        scene::from_state(session.state()),
    );
    MacroquadBackend::new()
        .with_window_size(config.window.width, config.window.height)
        .with_vsync(config.window.vsync)
        .run(presentation, move |input, frame| {
            if let Some(action) = input.action {
                if session.handle(action) {
                    *frame = scene::from_state(session.state());
                }
            }
        })
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
