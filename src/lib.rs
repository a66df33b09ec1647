//! spotmeta: a Spotify Web API metadata client.
//!
//! The library turns typed calls into authenticated requests, executes them,
//! maps failures to one [`Error`] type and decodes responses into typed
//! objects, tolerating objects the server only returns in part.
//!
//! # Modules
//!
//! - `encode` - query string and JSON body encoding
//! - `request` - authenticated request descriptors
//! - `executor` - HTTP execution and the mock-response queue
//! - `error` - error type and response mapping
//! - `decode` - entity, page and list decoding with partial objects
//! - `paging` - listing pages
//! - `multiget` - chunked, sequential batch lookups
//! - `dispatch` - serial callback delivery
//! - `client` - [`SpotifyClient`], with endpoint wrappers in `spotify`
//! - `config` - environment configuration
//! - `management` - token persistence for the CLI
//! - `cli` - command implementations of the `spotmeta` binary
//!
//! # Example
//!
//! ```ignore
//! use spotmeta::{SpotifyClient, config};
//!
//! #[tokio::main]
//! async fn main() -> spotmeta::Result<()> {
//!     let client = SpotifyClient::new("BQC...")?;
//!     let album = client.album("4aawyAB9vmqN3uQ7FjRGTy").await?;
//!     println!("{:?}", album.name());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod decode;
pub mod dispatch;
pub mod encode;
pub mod error;
pub mod executor;
pub mod management;
pub mod multiget;
pub mod paging;
pub mod request;
pub mod spotify;
pub mod types;

pub use client::SpotifyClient;
pub use decode::{Decoded, Entity, ObjectKind, PartialObject, Resource, Shape};
pub use dispatch::CallbackQueue;
pub use error::{Error, ErrorKind, Result};
pub use executor::{Executor, HttpTransport, MockTransport, RawResponse, Transport};
pub use multiget::sequential_multiget;
pub use paging::Page;
pub use request::{AccessToken, RequestDescriptor};

/// Prints a status line marked with a blue `o`.
///
/// ```ignore
/// info!("Fetching {} albums...", ids.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line marked with a green check.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line marked with a red `!` and exits with status 1.
///
/// Only for the binary: nothing after the call runs.
///
/// ```ignore
/// error!("No access token. Run spotmeta token set <TOKEN>");
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a line marked with a yellow `!`.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
