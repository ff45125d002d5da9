//! Deterministic metadata generator standing in for a camera's face detector

use std::f64::consts::TAU;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender};

use crate::application::ports::MetadataSink;
use crate::domain::config::MAX_FPS;
use crate::domain::{MetadataKind, MetadataObject, Rect};

/// Shape of the generated feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Frames per second, clamped to `1..=MAX_FPS`
    pub fps: u32,
    /// Faces per frame
    pub faces: usize,
}

impl FeedConfig {
    /// Time between two frames
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.clamp(1, MAX_FPS)))
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { fps: 15, faces: 1 }
    }
}

const FACE_SIZE: f64 = 0.18;
const BARCODE_EVERY: u64 = 7;
const EDGE_FACE_EVERY: u64 = 11;

/// Build the metadata batch for frame `frame`.
///
/// Faces orbit the centre of the unit frame. Every few frames a barcode is
/// mixed in, and one face drifts over the right edge.
pub fn frame_batch(config: &FeedConfig, frame: u64) -> Vec<MetadataObject> {
    let t = frame as f64 * 0.08;
    let mut batch: Vec<MetadataObject> = (0..config.faces)
        .map(|i| {
            let phase = i as f64 * TAU / config.faces.max(1) as f64;
            let cx = 0.5 + 0.25 * (t + phase).cos();
            let cy = 0.5 + 0.2 * (t + phase).sin();
            MetadataObject::face(Rect::new(
                cx - FACE_SIZE / 2.0,
                cy - FACE_SIZE / 2.0,
                FACE_SIZE,
                FACE_SIZE,
            ))
        })
        .collect();

    if frame % EDGE_FACE_EVERY == EDGE_FACE_EVERY - 1 {
        if let Some(first) = batch.first_mut() {
            first.bounds.x = 1.0 - FACE_SIZE / 2.0;
        }
    }
    if frame % BARCODE_EVERY == BARCODE_EVERY - 1 {
        batch.push(MetadataObject::new(
            MetadataKind::Barcode,
            Rect::new(0.05, 0.8, 0.2, 0.1),
        ));
    }
    batch
}

/// Running feed thread. Stops and joins on drop.
pub struct FeedHandle {
    stop: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl FeedHandle {
    pub fn spawn(config: FeedConfig, sink: MetadataSink) -> std::io::Result<Self> {
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
        let interval = config.interval();

        let thread = thread::Builder::new()
            .name("synthetic-feed".into())
            .spawn(move || {
                let mut frame = 0u64;
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            sink(frame_batch(&config, frame));
                            frame += 1;
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                tracing::debug!(frames = frame, "synthetic feed stopped");
            })?;

        tracing::debug!(fps = config.fps, faces = config.faces, "synthetic feed started");
        Ok(Self {
            stop: Some(stop_tx),
            thread: Some(thread),
        })
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.stop.take();
        if let Some(thread) = self.thread.take() {
            // the feed thread itself may end up releasing the last handle
            if thread.thread().id() != thread::current().id() {
                let _ = thread.join();
            }
        }
    }
}
