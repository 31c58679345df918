//! Integration test for the file-logging sink
//!
//! Lives in its own binary so no sibling test can lower the global level
//! or claim the sink while output is being asserted.

#![cfg(all(feature = "file-logging", feature = "log-info"))]

use logger::{error, info, init_file_logging, set_level, warn, Level};
use std::fs;

#[test]
fn tagged_messages_land_in_the_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = dir.path().join("glossmap.log");

    assert!(init_file_logging(&log_path));
    set_level(Level::Info);

    info!("annotation run started");
    warn!("definition lookup took 3 retries");
    error!("backend unreachable");

    // Verbose output is console-only and must never reach the sink.
    #[cfg(feature = "verbose")]
    {
        logger::enable_verbose();
        logger::verbose!("progress 4/10");
    }

    let contents = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert!(contents.contains("[INFO] annotation run started"));
    assert!(contents.contains("[WARN] definition lookup took 3 retries"));
    assert!(contents.contains("[ERROR] backend unreachable"));
    assert!(!contents.contains("progress 4/10"));
}
