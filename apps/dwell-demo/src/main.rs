//! Replays a scripted gaze trace against a three-tile board in real time.
//!
//! Usage: `dwell-demo [--threshold-ms N] [--clear-window-ms N]`
//!
//! Run with `RUST_LOG=debug` to watch timers being scheduled and cancelled.

use anyhow::{Context, Result};
use cboard_core::{Millis, SystemClock, TimerRuntime};
use cboard_ui::{
    Board, DwellConfig, Point, PointerEvent, Rect, Size, Tile, TileStyle, TileVariant,
};
use clap::Parser;
use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;

struct GazeStep {
    at: Millis,
    /// `None` means the gaze left the board.
    position: Option<Point>,
}

const fn look_at(at: Millis, x: f32, y: f32) -> GazeStep {
    GazeStep {
        at,
        position: Some(Point::new(x, y)),
    }
}

const fn look_away(at: Millis) -> GazeStep {
    GazeStep { at, position: None }
}

fn gaze_script() -> Vec<GazeStep> {
    vec![
        // Rest on "yes", glance into the gap, come back: progress resumes.
        look_at(0, 50.0, 50.0),
        look_at(400, 110.0, 50.0),
        look_at(500, 40.0, 60.0),
        // Settle on the folder long enough to open it.
        look_at(1500, 170.0, 50.0),
        // Skim "no" too quickly to activate it.
        look_at(2800, 290.0, 50.0),
        look_away(3100),
    ]
}

const TILE_SIZE: Size = Size::new(100.0, 100.0);

#[derive(Parser, Debug)]
#[command(name = "dwell-demo", about = "Replays a gaze trace against a three-tile board")]
struct Cli {
    /// Hover time that activates a tile.
    #[arg(long, env = "CBOARD_DWELL_THRESHOLD_MS")]
    threshold_ms: Option<Millis>,

    /// Absence after which partial progress is forgotten.
    #[arg(long, env = "CBOARD_DWELL_CLEAR_WINDOW_MS")]
    clear_window_ms: Option<Millis>,
}

impl Cli {
    fn dwell_config(&self) -> Result<DwellConfig> {
        let mut config = DwellConfig::default();
        if let Some(threshold) = self.threshold_ms {
            config = config
                .with_threshold_ms(threshold)
                .context("invalid --threshold-ms")?;
        }
        if let Some(clear_window) = self.clear_window_ms {
            config = config.with_clear_window_ms(clear_window);
        }
        Ok(config)
    }
}

/// Sleeps until `target`, firing timers that fall due on the way.
fn run_until(runtime: &TimerRuntime, target: Millis) {
    loop {
        runtime.pump();
        let now = runtime.now_millis();
        if now >= target {
            return;
        }
        let wake = runtime
            .next_deadline()
            .map_or(target, |deadline| deadline.clamp(now, target));
        thread::sleep(Duration::from_millis(wake.saturating_sub(now).max(1)));
    }
}

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let config = Cli::parse().dwell_config()?;
    log::info!(
        "dwell threshold {} ms, clear window {} ms",
        config.threshold_ms(),
        config.clear_window_ms()
    );

    let runtime = TimerRuntime::new(SystemClock::new());
    let mut board = Board::new(runtime.handle());
    let activations: Rc<RefCell<Vec<(Millis, &'static str)>>> = Rc::new(RefCell::new(Vec::new()));

    let tiles = [
        (1, "yes", 0.0, TileVariant::Button, "rgb(200, 230, 201)"),
        (2, "food", 120.0, TileVariant::Folder, "rgb(255, 241, 118)"),
        (3, "no", 240.0, TileVariant::Button, "#ffcdd2"),
    ];
    for (id, label, x, variant, background) in tiles {
        let style = TileStyle::from_css(Some(background), None)
            .with_context(|| format!("bad color for tile {label}"))?;
        let timers = board.timers().clone();
        let on_click = {
            let activations = Rc::clone(&activations);
            let timers = timers.clone();
            move || {
                let now = timers.now_millis();
                log::info!("tile '{label}' activated at {now} ms");
                activations.borrow_mut().push((now, label));
            }
        };
        board.mount(
            Tile::new(id, label, Rect::from_origin_size(Point::new(x, 0.0), TILE_SIZE), timers)
                .with_variant(variant)
                .with_style(style)
                .with_dwell_config(config)
                .with_on_click(on_click),
        );
    }

    let script = gaze_script();
    let mut last_position = Point::ZERO;
    for step in &script {
        run_until(&runtime, step.at);
        let event = match step.position {
            Some(position) => {
                last_position = position;
                PointerEvent::moved(position)
            }
            None => PointerEvent::exit(last_position),
        };
        for (id, transition) in board.dispatch(event) {
            log::debug!("tile {id}: {transition:?}");
        }
    }
    let end = script.last().map_or(0, |step| step.at) + config.threshold_ms();
    run_until(&runtime, end);

    println!("=== Dwell activations ===");
    for (at, label) in activations.borrow().iter() {
        println!("{at:>6} ms  {label}");
    }
    Ok(())
}
