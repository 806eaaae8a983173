// SnapScore — Host Entry Point
//
// Replays a recorded rotation trace through the gesture engine:
//
//   snapscore [SETTINGS_JSON] < samples.csv
//
//   1. Load settings (defaults when no path is given).
//   2. Spawn the replay task reading stdin into the command channel.
//   3. Spawn the gesture task that owns the detector and the score.
//   4. Join both and print the final score as JSON.

use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use anyhow::{anyhow, Context};
use tracing_subscriber::EnvFilter;

use snapscore::config::*;
use snapscore::drivers::haptic::LogHaptics;
use snapscore::session::ScoringSession;
use snapscore::tasks;

fn main() -> anyhow::Result<()> {
    // `log` records are bridged into the subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();
    log::info!("SnapScore starting…");

    // ---- Settings ---------------------------------------------------------
    let settings = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Settings::load(&path)?,
        None => Settings::default(),
    };
    log::info!(
        "Settings: {:?} wrist, snap >= {:.2}, rest variance < {:.3}",
        settings.profile.dominant_wrist,
        settings.gesture.single_snap_threshold,
        settings.gesture.low_activity_variance
    );

    // ---- Channel ----------------------------------------------------------
    let (cmd_tx, cmd_rx) = mpsc::channel();

    // ---- Spawn tasks ------------------------------------------------------
    let replay = thread::Builder::new()
        .name(THREAD_REPLAY.into())
        .stack_size(STACK_REPLAY)
        .spawn(move || tasks::sensor::replay_task(io::stdin().lock(), cmd_tx))
        .context("spawning replay task")?;

    let session = ScoringSession::new(settings, LogHaptics::new());
    let gesture = thread::Builder::new()
        .name(THREAD_GESTURE.into())
        .stack_size(STACK_GESTURE)
        .spawn(move || tasks::gesture::gesture_task(cmd_rx, session))
        .context("spawning gesture task")?;

    let sent = replay
        .join()
        .map_err(|_| anyhow!("replay task panicked"))??;
    let session = gesture
        .join()
        .map_err(|_| anyhow!("gesture task panicked"))?;

    log::info!("Replayed {} samples", sent);
    println!("{}", serde_json::to_string(&session.scores())?);
    Ok(())
}
