//! Shared fixtures for engine tests.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use pagesim_core::Simulation;
use pagesim_core::common::{PageId, ProcessId};
use pagesim_core::config::{Algorithm, RefToken, SimConfig};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Belady's anomaly sequence.
pub const BELADY: [PageId; 12] = [1, 2, 3, 4, 1, 2, 5, 1, 2, 3, 4, 5];

/// The textbook 20-reference string.
pub const CLASSIC: [PageId; 20] = [7, 0, 1, 2, 0, 3, 0, 4, 2, 3, 0, 3, 2, 1, 2, 0, 1, 7, 0, 1];

/// Installs a test-writer subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

/// Starts a global-mode run over bare pages.
pub fn start_global(pages: &[PageId], frames: usize, algorithm: Algorithm) -> Simulation {
    init_tracing();
    Simulation::new(SimConfig::from_pages(pages, frames, algorithm)).expect("valid config")
}

/// Runs a global-mode simulation to completion.
pub fn run_global(pages: &[PageId], frames: usize, algorithm: Algorithm) -> Simulation {
    let mut sim = start_global(pages, frames, algorithm);
    let _ = sim.run_to_end();
    sim
}

/// `process:page` tokens.
pub fn pairs(refs: &[(ProcessId, PageId)]) -> Vec<RefToken> {
    refs.iter().map(|&(process, page)| RefToken::pair(process, page)).collect()
}

/// Asserts two percentages agree to 1e-9.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

/// In-memory log sink shared with a scoped subscriber.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a thread-local subscriber at `level` and returns what it logged.
pub fn capture_logs(level: Level, f: impl FnOnce()) -> String {
    let buffer = LogBuffer::default();
    let sink = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || sink.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buffer.0.lock().unwrap_or_else(PoisonError::into_inner).clone();
    String::from_utf8_lossy(&bytes).into_owned()
}
