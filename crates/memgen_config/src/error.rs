//! Error types for configuration loading and validation.

/// Errors that can occur when loading or validating a `memgen.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A connection names a terminal the RAM instance does not have.
    #[error("RAM '{instance}' has no terminal named '{terminal}' (expected one of: {expected})")]
    UnknownTerminal {
        /// The instance name.
        instance: String,
        /// The offending connection key.
        terminal: String,
        /// The terminal names the instance accepts, comma separated.
        expected: String,
    },

    /// A referenced instance name does not exist in the configuration.
    #[error("unknown RAM instance '{0}'")]
    UnknownInstance(String),
}
