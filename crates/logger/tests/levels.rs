//! Integration tests for level parsing and runtime gating

use logger::{debug, error, info, verbose, warn};
use logger::{set_level, set_level_from_str, Level};

#[test]
fn known_level_names_parse() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("err"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("warning"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn unknown_level_names_are_rejected() {
    assert!(!set_level_from_str("chatty"));
    assert!(!set_level_from_str(""));
    assert!(!set_level_from_str("warn "));
}

#[test]
fn every_macro_emits_without_panicking() {
    set_level(Level::Debug);
    error!("wiring check {}", 1);
    warn!("wiring check {}", 2);
    info!("wiring check {}", 3);
    debug!("wiring check {}", 4);
    verbose!("wiring check {}", 5);
}

#[cfg(feature = "log-debug")]
#[test]
fn debug_flag_toggles_at_runtime() {
    use logger::{disable_debug, enable_debug, is_debug_enabled};
    disable_debug();
    assert!(!is_debug_enabled());
    enable_debug();
    assert!(is_debug_enabled());
}

#[cfg(feature = "verbose")]
#[test]
fn verbose_flag_toggles_at_runtime() {
    use logger::{disable_verbose, enable_verbose, is_verbose_enabled};
    enable_verbose();
    assert!(is_verbose_enabled());
    disable_verbose();
    assert!(!is_verbose_enabled());
}
