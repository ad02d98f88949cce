/// D3D12 info-queue forwarding - routes debug layer messages into the logger
///
/// With the `d3d12-info-queue` feature the device registers a message callback
/// on `ID3D12InfoQueue1`; every message passes the severity filter, is counted,
/// grouped with identical earlier messages and forwarded to `Diagnostics`.
/// The filtering and statistics half is platform-agnostic.

use colored::*;
use gfx_bootstrap::{gfx_debug, gfx_error, gfx_info, gfx_warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

const SOURCE: &str = "gfxboot::d3d12::InfoQueue";

/// Global debug configuration (shared across callbacks)
static DEBUG_CONFIG: Mutex<Option<Config>> = Mutex::new(None);

/// Global validation statistics (thread-safe atomic counters)
static VALIDATION_STATS: ValidationStatsTracker = ValidationStatsTracker::new();

/// Global message tracker for grouping identical messages
static MESSAGE_TRACKER: Mutex<Option<MessageTracker>> = Mutex::new(None);

/// Which debug layer messages are forwarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSeverity {
    /// Corruption and error messages
    ErrorsOnly,
    /// Errors plus warnings
    ErrorsAndWarnings,
    /// Everything, including info and plain messages
    All,
}

/// Debug configuration for the callback
#[derive(Debug, Clone)]
pub struct Config {
    pub severity: DebugSeverity,
    /// Abort the process on the first error (to attach a debugger)
    pub break_on_error: bool,
    /// Panic on the first error (strict mode for tests)
    pub panic_on_error: bool,
    pub enable_stats: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            severity: DebugSeverity::ErrorsAndWarnings,
            break_on_error: false,
            panic_on_error: false,
            enable_stats: true,
        }
    }
}

/// Counters of forwarded debug layer messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationStats {
    /// Corruption and error messages
    pub errors: u32,
    pub warnings: u32,
    pub info: u32,
    pub messages: u32,
}

impl ValidationStats {
    pub fn total(&self) -> u32 {
        self.errors + self.warnings + self.info + self.messages
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Severity of one debug layer message
#[cfg_attr(not(all(windows, feature = "d3d12-info-queue")), allow(dead_code))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageSeverity {
    Corruption,
    Error,
    Warning,
    Info,
    Message,
}

#[cfg_attr(not(all(windows, feature = "d3d12-info-queue")), allow(dead_code))]
impl MessageSeverity {
    fn is_error(self) -> bool {
        matches!(self, MessageSeverity::Corruption | MessageSeverity::Error)
    }

    fn passes(self, filter: DebugSeverity) -> bool {
        match filter {
            DebugSeverity::ErrorsOnly => self.is_error(),
            DebugSeverity::ErrorsAndWarnings => self.is_error() || self == MessageSeverity::Warning,
            DebugSeverity::All => true,
        }
    }
}

/// Thread-safe validation statistics tracker
struct ValidationStatsTracker {
    errors: AtomicU32,
    warnings: AtomicU32,
    info: AtomicU32,
    messages: AtomicU32,
}

impl ValidationStatsTracker {
    const fn new() -> Self {
        Self {
            errors: AtomicU32::new(0),
            warnings: AtomicU32::new(0),
            info: AtomicU32::new(0),
            messages: AtomicU32::new(0),
        }
    }

    #[cfg_attr(not(all(windows, feature = "d3d12-info-queue")), allow(dead_code))]
    fn increment(&self, severity: MessageSeverity) {
        let counter = match severity {
            MessageSeverity::Corruption | MessageSeverity::Error => &self.errors,
            MessageSeverity::Warning => &self.warnings,
            MessageSeverity::Info => &self.info,
            MessageSeverity::Message => &self.messages,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn get_stats(&self) -> ValidationStats {
        ValidationStats {
            errors: self.errors.load(Ordering::Relaxed),
            warnings: self.warnings.load(Ordering::Relaxed),
            info: self.info.load(Ordering::Relaxed),
            messages: self.messages.load(Ordering::Relaxed),
        }
    }

    fn reset(&self) {
        self.errors.store(0, Ordering::Relaxed);
        self.warnings.store(0, Ordering::Relaxed);
        self.info.store(0, Ordering::Relaxed);
        self.messages.store(0, Ordering::Relaxed);
    }
}

/// Message tracker for grouping identical messages
#[derive(Default)]
struct MessageTracker {
    messages: HashMap<String, u32>,
}

#[cfg_attr(not(all(windows, feature = "d3d12-info-queue")), allow(dead_code))]
impl MessageTracker {
    fn track_message(&mut self, message: &str) -> u32 {
        let count = self.messages.entry(message.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    fn duplicate_count(&self) -> usize {
        self.messages.values().filter(|&&count| count > 1).count()
    }
}

/// Initialize debug configuration
///
/// Resets the statistics and the message grouping.
pub fn init_debug_config(config: Config) {
    VALIDATION_STATS.reset();

    if let Ok(mut tracker) = MESSAGE_TRACKER.lock() {
        *tracker = Some(MessageTracker::default());
    }
    if let Ok(mut current) = DEBUG_CONFIG.lock() {
        *current = Some(config);
    }
}

/// Get current validation statistics
pub fn get_validation_stats() -> ValidationStats {
    VALIDATION_STATS.get_stats()
}

/// Print validation statistics report
pub fn print_validation_stats_report() {
    let stats = get_validation_stats();

    if stats.total() == 0 {
        println!("\n{}", "✓ No D3D12 debug layer messages".green().bold());
        return;
    }

    println!("\n{}", "=== D3D12 Debug Layer Report ===".bright_blue().bold());

    if stats.errors > 0 {
        println!("  {} {}", "Errors:".red().bold(), stats.errors);
    }
    if stats.warnings > 0 {
        println!("  {} {}", "Warnings:".yellow().bold(), stats.warnings);
    }
    if stats.info > 0 {
        println!("  {} {}", "Info:".cyan(), stats.info);
    }
    if stats.messages > 0 {
        println!("  {} {}", "Messages:".bright_black(), stats.messages);
    }

    println!("  {} {}", "Total:".white().bold(), stats.total());

    if let Ok(guard) = MESSAGE_TRACKER.lock() {
        let duplicates = guard.as_ref().map_or(0, MessageTracker::duplicate_count);
        if duplicates > 0 {
            println!("\n  {} {} message(s) appeared multiple times", "ℹ".cyan(), duplicates);
        }
    }

    println!("{}\n", "================================".bright_blue().bold());
}

/// Filter, count and forward one debug layer message
///
/// Returns `true` when the message was forwarded. Messages are dropped while
/// no configuration has been installed.
#[cfg_attr(not(all(windows, feature = "d3d12-info-queue")), allow(dead_code))]
pub(crate) fn report_message(severity: MessageSeverity, category: &str, id: i32, description: &str) -> bool {
    let config = match DEBUG_CONFIG.lock() {
        Ok(guard) => match guard.as_ref() {
            Some(cfg) => cfg.clone(),
            None => return false,
        },
        Err(_) => return false,
    };

    if !severity.passes(config.severity) {
        return false;
    }

    let occurrence_count = if config.enable_stats {
        VALIDATION_STATS.increment(severity);
        match MESSAGE_TRACKER.lock() {
            Ok(mut guard) => guard.get_or_insert_with(MessageTracker::default).track_message(description),
            Err(_) => 1,
        }
    } else {
        1
    };

    let repeat_indicator = if occurrence_count > 1 {
        format!(" [×{}]", occurrence_count)
    } else {
        String::new()
    };

    match severity {
        MessageSeverity::Corruption => {
            gfx_error!(SOURCE, "CORRUPTION [{}] #{}{}: {}", category, id, repeat_indicator, description)
        }
        MessageSeverity::Error => {
            gfx_error!(SOURCE, "[{}] #{}{}: {}", category, id, repeat_indicator, description)
        }
        MessageSeverity::Warning => {
            gfx_warn!(SOURCE, "[{}] #{}{}: {}", category, id, repeat_indicator, description)
        }
        MessageSeverity::Info => {
            gfx_info!(SOURCE, "[{}] #{}{}: {}", category, id, repeat_indicator, description)
        }
        MessageSeverity::Message => {
            gfx_debug!(SOURCE, "[{}] #{}{}: {}", category, id, repeat_indicator, description)
        }
    }

    if config.panic_on_error && severity.is_error() {
        panic!(
            "\n⚠️  PANIC ON ERROR (Strict Mode)\n\
            Message ID: {}\n\
            Category: {}\n\
            Message: {}\n",
            id, category, description
        );
    }

    if config.break_on_error && severity.is_error() {
        eprintln!(
            "\n{}\n  Context: #{} [{}]\n  Message: {}\n",
            "⚠️  BREAK ON DEBUG LAYER ERROR - Aborting execution".red().bold(),
            id.to_string().yellow(),
            category.cyan(),
            description.white()
        );
        std::process::abort();
    }

    true
}

#[cfg(all(windows, feature = "d3d12-info-queue"))]
mod callback {
    use super::{report_message, MessageSeverity};
    use std::ffi::c_void;
    use windows::core::PCSTR;
    use windows::Win32::Graphics::Direct3D12::*;

    fn severity(severity: D3D12_MESSAGE_SEVERITY) -> MessageSeverity {
        match severity {
            D3D12_MESSAGE_SEVERITY_CORRUPTION => MessageSeverity::Corruption,
            D3D12_MESSAGE_SEVERITY_ERROR => MessageSeverity::Error,
            D3D12_MESSAGE_SEVERITY_WARNING => MessageSeverity::Warning,
            D3D12_MESSAGE_SEVERITY_INFO => MessageSeverity::Info,
            _ => MessageSeverity::Message,
        }
    }

    fn category(category: D3D12_MESSAGE_CATEGORY) -> &'static str {
        match category {
            D3D12_MESSAGE_CATEGORY_APPLICATION_DEFINED => "Application",
            D3D12_MESSAGE_CATEGORY_INITIALIZATION => "Initialization",
            D3D12_MESSAGE_CATEGORY_CLEANUP => "Cleanup",
            D3D12_MESSAGE_CATEGORY_COMPILATION => "Compilation",
            D3D12_MESSAGE_CATEGORY_STATE_CREATION => "StateCreation",
            D3D12_MESSAGE_CATEGORY_STATE_SETTING => "StateSetting",
            D3D12_MESSAGE_CATEGORY_STATE_GETTING => "StateGetting",
            D3D12_MESSAGE_CATEGORY_RESOURCE_MANIPULATION => "Resource",
            D3D12_MESSAGE_CATEGORY_EXECUTION => "Execution",
            D3D12_MESSAGE_CATEGORY_SHADER => "Shader",
            _ => "Miscellaneous",
        }
    }

    /// D3D12 info-queue message callback
    ///
    /// Registered with `ID3D12InfoQueue1::RegisterMessageCallback`; called by
    /// the debug layer on the thread that triggered the message.
    pub(crate) unsafe extern "system" fn d3d12_message_callback(
        message_category: D3D12_MESSAGE_CATEGORY,
        message_severity: D3D12_MESSAGE_SEVERITY,
        message_id: D3D12_MESSAGE_ID,
        description: PCSTR,
        _context: *mut c_void,
    ) {
        let text = if description.is_null() {
            "No message".to_string()
        } else {
            description
                .to_string()
                .unwrap_or_else(|_| "Invalid UTF-8".to_string())
        };

        report_message(severity(message_severity), category(message_category), message_id.0, &text);
    }
}

#[cfg(all(windows, feature = "d3d12-info-queue"))]
pub(crate) use callback::d3d12_message_callback;

#[cfg(test)]
#[path = "debug_tests.rs"]
mod tests;
