//! Logging configuration for Track Manager
//!
//! Logs go to the terminal and to `track-manager.log` in the platform log
//! directory (`~/Library/Logs/Track-Manager/` on macOS).

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const LOG_DIR_NAME: &str = "Track-Manager";
const LOG_FILE_NAME: &str = "track-manager.log";

/// Logs larger than this are moved aside at startup
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Get the log directory path
pub fn get_log_directory() -> Option<PathBuf> {
    if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Logs").join(LOG_DIR_NAME))
    } else {
        // Fallback for other platforms
        dirs::data_local_dir().map(|d| d.join(LOG_DIR_NAME).join("logs"))
    }
}

/// Initialize terminal + file logging
///
/// Returns the path to the log file on success. Without a usable log
/// directory only the terminal logger is installed.
pub fn init_logging(verbose: bool) -> Option<PathBuf> {
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_dir = match get_log_directory() {
        Some(d) => d,
        None => {
            eprintln!("Warning: Could not determine log directory");
            init_terminal_only(term_level);
            return None;
        }
    };

    // Create log directory if it doesn't exist
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Warning: Could not create log directory: {}", e);
        init_terminal_only(term_level);
        return None;
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    if let Ok(metadata) = fs::metadata(&log_path)
        && metadata.len() > MAX_LOG_SIZE
    {
        let backup_path = log_dir.join("track-manager.log.old");
        let _ = fs::rename(&log_path, &backup_path);
    }

    // Open log file (append mode)
    let log_file = match OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not open log file: {}", e);
            // Fall back to terminal-only logging
            init_terminal_only(term_level);
            return None;
        }
    };

    // Configure logging format
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off) // Don't show thread IDs
        .set_target_level(LevelFilter::Off) // Don't show module targets
        .build();

    // Set up combined logger (terminal + file)
    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(term_level, config.clone(), TerminalMode::Mixed, ColorChoice::Auto),
        // The file always gets debug output for bug reports
        WriteLogger::new(LevelFilter::Debug, config, log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    // Write session start marker
    log::info!("=== Track Manager session started ===");
    log::info!("Log file: {}", log_path.display());

    Some(log_path)
}

/// Initialize terminal-only logging (fallback if file logging fails)
fn init_terminal_only(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();

    let term_logger = TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto);
    let _ = CombinedLogger::init(vec![term_logger]);
}
