//! Integration tests for the Diagnostics logging system
//!
//! These tests verify the logging system through the public API.
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use gfx_bootstrap::gfxboot::Diagnostics;
use gfx_bootstrap::gfxboot::log::{Logger, LogEntry, LogSeverity};
use gfx_bootstrap::gfxboot::{BootstrapConfig, Error};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    Diagnostics::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Diagnostics::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());
    Diagnostics::log(LogSeverity::Error, "test::module", "Test error message".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[2].severity, LogSeverity::Error);
        assert!(captured.iter().all(|e| e.source == "test::module"));
        assert_eq!(captured[2].message, "Test error message");
    }

    Diagnostics::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_macro_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    gfx_bootstrap::gfx_error!("test::error", "CreateSwapChain failed with 0x{:08X}", 0x887A0001u32);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);

        let entry = &captured[0];
        assert_eq!(entry.severity, LogSeverity::Error);
        assert_eq!(entry.message, "CreateSwapChain failed with 0x887A0001");
        assert!(entry.file.unwrap().ends_with("logging_integration_tests.rs"));
        assert!(entry.line.is_some());
    }

    Diagnostics::reset_logger();
}

#[test]
#[serial]
fn test_integration_err_macro_builds_backend_error() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    fn missing_window() -> gfx_bootstrap::gfxboot::Result<()> {
        gfx_bootstrap::gfx_bail!("test::window", "Window handle is not a Win32 handle");
    }

    match missing_window() {
        Err(Error::BackendError(msg)) => assert_eq!(msg, "Window handle is not a Win32 handle"),
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(entries.lock().unwrap().len(), 1);

    Diagnostics::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    Diagnostics::log(LogSeverity::Info, "test", "Message 1".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);

    Diagnostics::reset_logger();

    // Goes to the default logger, not captured
    Diagnostics::log(LogSeverity::Info, "test", "Message 2".to_string());
    assert_eq!(entries.lock().unwrap().len(), 1);
}

#[test]
#[serial]
fn test_integration_single_buffer_warning() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    BootstrapConfig::default().with_buffer_count(1).validate().unwrap();

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Warn);
        assert_eq!(captured[0].source, "gfxboot::Config");
    }

    Diagnostics::reset_logger();
}

#[test]
#[serial]
fn test_integration_concurrent_logging() {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);

    let handles: Vec<_> = (0..4)
        .map(|t| {
            std::thread::spawn(move || {
                for i in 0..25 {
                    gfx_bootstrap::gfx_debug!("test::threads", "thread {} message {}", t, i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(entries.lock().unwrap().len(), 100);

    Diagnostics::reset_logger();
}
