pub mod builders;
pub mod capture;

use std::sync::{Mutex, MutexGuard, Once, PoisonError};
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();
static SERIAL: Mutex<()> = Mutex::new(());

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Serialise tests that fork or touch the standard descriptors.
///
/// The test harness runs tests on several threads, and forking while another
/// thread is mid-way through rebinding stdio gives the child a half-rebound
/// view. Hold the returned guard for the whole test.
pub fn serial() -> MutexGuard<'static, ()> {
    // A panicking test must not wedge every test after it.
    SERIAL.lock().unwrap_or_else(PoisonError::into_inner)
}
