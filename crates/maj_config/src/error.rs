//! Errors raised while reading `majsynth.toml`.

/// Why a configuration could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read {file}: {0}", file = crate::CONFIG_FILE_NAME)]
    IoError(#[from] std::io::Error),

    /// The file is not valid TOML or does not match the schema.
    #[error("malformed {file}: {0}", file = crate::CONFIG_FILE_NAME)]
    ParseError(String),

    /// A key parsed but holds an unusable value.
    #[error("invalid `{key}`: {reason}")]
    InvalidValue {
        /// Dotted key, e.g. `synth.width`.
        key: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
}
