#![allow(dead_code)]

pub use minish_test_utils::{builders, init_tracing, serial};

use std::fs;
use std::path::Path;

/// Run a future with a 5-second timeout.
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("Test timed out after 5 seconds")
}

/// Poll until `path` exists and is non-empty, for output written by
/// background jobs.
pub fn wait_for_file(path: &Path) -> String {
    for _ in 0..200 {
        if let Ok(contents) = fs::read_to_string(path) {
            if !contents.is_empty() {
                return contents;
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(25));
    }
    panic!("{} never appeared", path.display());
}
