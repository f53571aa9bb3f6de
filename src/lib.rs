//! Spotify Taste Check Web App Library
//!
//! This library implements a small web application that authenticates a user
//! against the Spotify Web API using the OAuth2 authorization-code flow,
//! fetches their listening statistics, and optionally asks a language model
//! for a judgment of their taste.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the web server endpoints
//! - `config` - Configuration management and environment variables
//! - `error` - Error types carrying upstream HTTP diagnostics
//! - `fetch` - The refresh-and-retry-once request orchestrator
//! - `judge` - Text-generation capability for taste commentary
//! - `server` - HTTP server and route table
//! - `session` - Per-browser session store and signed cookies
//! - `spotify` - Spotify Web API client (auth + resources)
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use tastecheck::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> tastecheck::Res<()> {
//!     config::load_env();
//!     // Build state and start the server...
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fetch;
pub mod judge;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
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

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1. Only used for unrecoverable
/// startup failures (missing configuration, unusable listen address).
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, such as a token response that carries no
/// refresh token or a failed upstream call that degrades to a login redirect.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
