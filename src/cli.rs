//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim: rayon pool
//! configuration and the search driver (progress wiring, timing lines,
//! stdout emission).

use anyhow::Result;
use caboose::{caboose as engine, progress};
use std::io::Write;
use std::time::Instant;
use tracing::{info, warn};

use super::Cli;

/// Run the search: spin up the progress reporter, stream hits to stdout,
/// log elapsed wall time.
pub fn run_search(cli: &Cli) -> Result<()> {
    let num_cores = rayon::current_num_threads();
    info!(cores = num_cores, limit = cli.limit, "caboose search starting");

    let progress = progress::Progress::new();
    let reporter_handle = progress.start_reporter();

    let stdout = std::io::stdout();
    let mut sink = stdout.lock();

    let search_start = Instant::now();
    let result = engine::search(cli.limit, &progress, &mut sink);
    sink.flush()?;

    progress.stop();
    let _ = reporter_handle.join();
    progress.print_status();

    let hits = result?;
    info!(
        found = hits.len(),
        elapsed = format_args!("{:.3}s", search_start.elapsed().as_secs_f64()),
        "search complete"
    );
    Ok(())
}

/// Configure the global rayon thread pool. `num_threads = 0` keeps the rayon
/// default (all logical cores). On macOS, `qos` pins worker threads to the
/// user-initiated QoS class for P-core scheduling on Apple Silicon.
pub fn configure_rayon(threads: Option<usize>, qos: bool) {
    let num_threads = threads.unwrap_or(0);

    #[cfg(target_os = "macos")]
    if qos {
        let result = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .spawn_handler(|thread| {
                std::thread::Builder::new().spawn(move || {
                    // SAFETY: pthread_set_qos_class_self_np is a well-defined macOS API
                    // that sets the QoS class for the current thread. No memory safety concerns.
                    unsafe {
                        libc::pthread_set_qos_class_self_np(
                            libc::qos_class_t::QOS_CLASS_USER_INITIATED,
                            0,
                        );
                    }
                    thread.run();
                })?;
                Ok(())
            })
            .build_global();

        match result {
            Ok(()) => {
                info!("Rayon threads configured with macOS QoS: user-initiated (P-core scheduling)");
            }
            Err(e) => {
                warn!(error = %e, "Could not configure rayon thread pool");
            }
        }
        return;
    }

    #[cfg(not(target_os = "macos"))]
    if qos {
        warn!("--qos flag is only effective on macOS, ignoring");
    }

    if num_threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
        {
            warn!(error = %e, "Could not configure rayon thread pool");
        }
    }
}
