use thiserror::Error;

/// The Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while splitting, combining, or moving shares in and out of text.
#[derive(Debug, Error)]
pub enum Error {
    /// Split parameters out of range: threshold below 2, more parts than the
    /// field has nonzero points, threshold above parts, or an empty secret.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// A share set that cannot be interpolated: empty, ragged, or carrying
    /// zero or repeated identifiers.
    #[error("malformed share set: {0}")]
    MalformedShareSet(String),

    /// Division by zero in GF(256). Upstream validation keeps this
    /// unreachable, so seeing it means a logic defect.
    #[error("division by zero in GF(256)")]
    DivisionByZero,

    /// A share line that is not valid hex.
    #[error("invalid share encoding: {0}")]
    Encoding(#[from] hex::FromHexError),

    /// No input file was given and stdin is an interactive terminal.
    #[error("nothing to read from stdin")]
    NoInput,

    /// Reading input or writing the default config file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The config file or environment overrides could not be loaded.
    #[error(transparent)]
    Config(#[from] config::ConfigError),

    /// The default settings could not be rendered as TOML.
    #[error(transparent)]
    Toml(#[from] toml::ser::Error),
}

impl Error {
    pub(crate) fn invalid_parameters<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters(msg.into())
    }

    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::MalformedShareSet(msg.into())
    }
}
