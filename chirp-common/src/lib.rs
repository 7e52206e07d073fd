//! Shared plumbing for the Chirp workspace.
//!
//! Right now this is only the [`observability`] module, which the `chirp` binary
//! uses to set up `tracing`.
//!
//! ```rust
//! use chirp_common::observability::{LogConfig, LogFormat};
//!
//! let cfg = LogConfig {
//!     format: LogFormat::Json,
//!     ..LogConfig::default()
//! };
//! assert_eq!(cfg.app_name, "chirp");
//! ```
pub mod observability;

pub use observability::{init_logging, LogConfig, LogFormat};
