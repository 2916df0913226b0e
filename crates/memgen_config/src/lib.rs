//! Parsing and validation of `memgen.toml` project configuration files.
//!
//! A project file names the target dialect, the output directory, the
//! clock-bus layout of the design's clock generators, and one `[[ram]]`
//! table per memory instance with its attributes and terminal connections.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use types::*;
