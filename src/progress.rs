//! # Progress — Atomic Search Progress Counters
//!
//! Thread-safe progress tracking shared between the tiled rayon search and a
//! background status reporter. Counters are atomics so parallel workers never
//! take a lock on the hot path; a Mutex guards only the current-tile string,
//! which is updated once per tile, not per candidate.
//!
//! The reporter thread logs tested count, caboose count, candidate rate, and
//! the tile currently in flight every 10 seconds, and shuts down via the
//! `shutdown` flag once the search drains.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

pub struct Progress {
    /// Candidates c whose caboose predicate has been fully decided.
    pub tested: AtomicU64,
    /// Caboose numbers emitted so far.
    pub found: AtomicU64,
    /// Human-readable description of the tile in flight, e.g. "c=[4097..8192]".
    pub current: Mutex<String>,
    start: Instant,
    shutdown: AtomicBool,
}

impl Progress {
    pub fn new() -> Arc<Self> {
        Arc::new(Progress {
            tested: AtomicU64::new(0),
            found: AtomicU64::new(0),
            current: Mutex::new(String::new()),
            start: Instant::now(),
            shutdown: AtomicBool::new(false),
        })
    }

    pub fn start_reporter(self: &Arc<Self>) -> thread::JoinHandle<()> {
        let progress = Arc::clone(self);
        thread::spawn(move || loop {
            thread::sleep(Duration::from_secs(10));
            if progress.shutdown.load(Ordering::Relaxed) {
                break;
            }
            progress.print_status();
        })
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let tested = self.tested.load(Ordering::Relaxed);
        let found = self.found.load(Ordering::Relaxed);
        let current = self.current.lock().unwrap().clone();
        let rate = if elapsed.as_secs() > 0 {
            tested as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        info!(
            current = %current,
            tested,
            rate = format_args!("{:.0}", rate),
            found,
            elapsed = format_args!("{:.1}s", elapsed.as_secs_f64()),
            "search progress"
        );
    }

    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
