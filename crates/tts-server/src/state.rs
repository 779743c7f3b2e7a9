//! Shared server state.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use runtime::SynthesisEngine;

/// Process-lifetime state handed to every handler.
///
/// The engine mutates KV caches during generation, so it sits behind a
/// blocking mutex locked from inside `spawn_blocking`; requests serialize
/// on it.
pub struct AppState {
    pub engine: Arc<Mutex<SynthesisEngine>>,
    pub start_time: Instant,
}

impl AppState {
    /// Wrap a loaded engine for sharing across requests.
    pub fn new(engine: SynthesisEngine) -> Arc<Self> {
        Arc::new(Self {
            engine: Arc::new(Mutex::new(engine)),
            start_time: Instant::now(),
        })
    }
}
