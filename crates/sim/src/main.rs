//! Scripted host for the range overlay.
//!
//! Builds a world from a TOML scenario, drives the overlay with a fixed-rate
//! tick source and prints what the render hook would draw.
//!
//! ```bash
//! # Builtin scenario, options from the environment
//! cargo run -p range-sim
//!
//! # Scenario file plus overlay config file
//! cargo run -p range-sim -- scene.toml overlay.toml
//! ```
mod canvas;
mod scenario;
mod world;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use range_core::{RangeCatalog, RangeError, RangeParams};
use range_overlay::{
    ButtonState, ContextKey, LocalEventHub, OverlayConfig, OverlayController, TickDriver, TileTint,
};

use canvas::AsciiCanvas;
use scenario::Scenario;
use world::ScenarioWorld;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1).map(PathBuf::from);
    let scenario = match args.next() {
        Some(path) => Scenario::load(&path)?,
        None => Scenario::builtin()?,
    };
    let config = match args.next() {
        Some(path) => OverlayConfig::load(&path)?,
        None => OverlayConfig::from_env(),
    };

    let preview = scenario.preview_kinds().inspect_err(|err| {
        tracing::error!(
            severity = err.severity().as_str(),
            code = err.error_code(),
            "{err}"
        );
    })?;
    for kind in preview {
        let mask = RangeCatalog::mask(kind, &RangeParams::default());
        println!("{kind} ({} tiles)", mask.len());
        println!("{}", AsciiCanvas::from_mask(&mask));
    }

    let hub = Arc::new(LocalEventHub::new());
    let world = Arc::new(ScenarioWorld::new(&scenario));
    let controller = OverlayController::from_config(world, hub.clone(), &config);
    tracing::info!(attached = ?controller.attached(), "overlay attached");

    let period = Duration::from_millis(scenario.period_ms.max(1));
    let driver = TickDriver::spawn(hub.clone(), vec![ContextKey::PRIMARY], period);
    for _ in 0..scenario.ticks {
        // Show-range keys are edge-triggered: keep pressing while hovering.
        if scenario.hovered.is_some() {
            hub.fire_buttons(
                ContextKey::PRIMARY,
                ButtonState {
                    show_one_down: !scenario.show_all,
                    show_all_down: scenario.show_all,
                    player_free: true,
                },
            );
        }
        tokio::time::sleep(period).await;
    }
    let ticks = driver.shutdown().await?;

    let mut canvas = AsciiCanvas::default();
    hub.fire_render(ContextKey::PRIMARY, &mut canvas);
    tracing::info!(
        ticks,
        range = canvas.count(TileTint::Range),
        overlap = canvas.count(TileTint::Overlap),
        "rendered"
    );
    print!("{canvas}");

    Ok(())
}
