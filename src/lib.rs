//! NewReleases CLI Library
//!
//! This library provides the building blocks of the `newreleases` command-line
//! client: a thin client for the NewReleases HTTP API, configuration
//! handling and the command implementations that translate flags into API
//! calls and render the results as tables.
//!
//! # Modules
//!
//! - `api` - NewReleases API client and service traits
//! - `cli` - Command implementations
//! - `config` - Configuration resolution from flags, environment and file
//! - `management` - Configuration file persistence
//! - `terminal` - Prompt and masked input helpers
//! - `types` - Data structures and table rows
//! - `utils` - Parsing and formatting helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod terminal;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Command functions return this boxed error so that API, configuration and
/// terminal errors can all be propagated with `?` up to `main`.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// ```ignore
/// info!("No projects found.");
/// info!("No projects found on page {}.", page);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message to standard error and exits with status 1.
///
/// Only `main` should use this; everything below it returns errors.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("{} {}", "Error:".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark to standard error.
///
/// Used for outcomes that are not failures, such as a missing project.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
