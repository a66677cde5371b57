//! Debounced, cancelable preview rendering.
//!
//! Rapid parameter edits coalesce into a single render after a short
//! quiescence window, and at most one preview render is in flight at a
//! time. Cancellation is a single-slot "latest request" scheme: every edit
//! bumps a shared generation counter, the worker re-checks the counter
//! before publishing, and stale completions are discarded instead of
//! applied.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::image::RgbImage;
use crate::models::GlowParameters;
use crate::pipeline::GlowRenderer;
use crate::verbose_println;

/// Debounce window applied to bursts of edits (matches the editor's 60 ms).
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(60);

/// A published preview frame.
pub struct PreviewFrame {
    /// Rendered preview image.
    pub image: RgbImage,

    /// Generation of the request that produced this frame. Strictly
    /// increasing across published frames.
    pub generation: u64,

    /// Parameter snapshot the frame was rendered with.
    pub params: GlowParameters,
}

struct Request {
    params: GlowParameters,
    generation: u64,
}

/// Single-worker preview scheduler.
///
/// Owns the source image and renderer; `request` hands over an immutable
/// parameter snapshot, so concurrent edits can never corrupt an in-flight
/// render. Dropping the scheduler shuts the worker down and joins it.
pub struct PreviewScheduler {
    generation: Arc<AtomicU64>,
    sender: Option<mpsc::Sender<Request>>,
    worker: Option<JoinHandle<()>>,
}

impl PreviewScheduler {
    /// Spawn the worker. `on_frame` runs on the worker thread for every
    /// non-stale completed render.
    pub fn new<F>(
        renderer: GlowRenderer,
        source: RgbImage,
        max_size: u32,
        debounce: Duration,
        mut on_frame: F,
    ) -> Self
    where
        F: FnMut(PreviewFrame) + Send + 'static,
    {
        let generation = Arc::new(AtomicU64::new(0));
        let latest = Arc::clone(&generation);
        let (sender, receiver) = mpsc::channel::<Request>();

        let worker = std::thread::spawn(move || {
            loop {
                let mut request = match receiver.recv() {
                    Ok(request) => request,
                    Err(_) => break,
                };

                // Debounce: keep swallowing newer requests until the burst
                // goes quiet for a full window.
                loop {
                    match receiver.recv_timeout(debounce) {
                        Ok(newer) => request = newer,
                        Err(RecvTimeoutError::Timeout) => break,
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }

                // A newer edit may have arrived during the last window tick.
                if latest.load(Ordering::SeqCst) != request.generation {
                    continue;
                }

                match renderer.render_preview(&source, &request.params, max_size) {
                    Ok(image) => {
                        // Superseded while rendering: discard, never publish.
                        if latest.load(Ordering::SeqCst) == request.generation {
                            on_frame(PreviewFrame {
                                image,
                                generation: request.generation,
                                params: request.params,
                            });
                        }
                    }
                    Err(e) => {
                        verbose_println!("[glowlab] Preview render failed: {}", e);
                    }
                }
            }
        });

        Self {
            generation,
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Schedule a render for this parameter snapshot, superseding any
    /// queued or in-flight request.
    pub fn request(&self, params: GlowParameters) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(sender) = &self.sender {
            // A closed channel means the worker is gone; nothing to do.
            let _ = sender.send(Request { params, generation });
        }
    }

    /// Generation of the most recent request.
    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}

impl Drop for PreviewScheduler {
    fn drop(&mut self) {
        // Closing the channel lets the worker drain out and exit.
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
