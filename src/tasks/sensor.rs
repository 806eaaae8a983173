// SnapScore — Sensor Replay Task
//
// Stands in for the watch's motion stream: reads recorded samples, one
// `time,rotation,accel` line each, and pushes them into the gesture task's
// channel in order.

use std::io::BufRead;
use std::sync::mpsc::Sender;

use anyhow::Context;

use crate::events::{Command, Sample};

pub fn replay_task<R: BufRead>(reader: R, tx: Sender<Command>) -> anyhow::Result<usize> {
    log::info!("Replay task started");

    let mut sent = 0;
    let mut last_time = f64::NEG_INFINITY;

    for (index, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("reading sample line {}", index + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let sample = match parse_sample(trimmed) {
            Some(s) => s,
            None => {
                log::warn!("Skipping malformed sample on line {}: {:?}", index + 1, trimmed);
                continue;
            }
        };

        // The detector assumes a monotonic stream.
        if sample.time < last_time {
            log::warn!(
                "Skipping out-of-order sample on line {} ({:.3}s < {:.3}s)",
                index + 1,
                sample.time,
                last_time
            );
            continue;
        }
        last_time = sample.time;

        if tx.send(Command::Sample(sample)).is_err() {
            log::warn!("Gesture channel closed — exiting replay task");
            return Ok(sent);
        }
        sent += 1;
    }

    log::info!("Replay finished after {} samples", sent);
    Ok(sent)
}

/// `time,rotation[,accel]`; accel defaults to 0.
pub fn parse_sample(line: &str) -> Option<Sample> {
    let mut fields = line.split(',').map(str::trim);
    let time: f64 = fields.next()?.parse().ok()?;
    let rotation_rate: f64 = fields.next()?.parse().ok()?;
    let accel_magnitude: f64 = match fields.next() {
        Some(raw) => raw.parse().ok()?,
        None => 0.0,
    };
    if fields.next().is_some() || !time.is_finite() || !rotation_rate.is_finite() {
        return None;
    }
    Some(Sample::new(time, rotation_rate, accel_magnitude))
}
