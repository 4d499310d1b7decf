use thiserror::Error;

/// Errors that abort a mining run.
///
/// Empty input, an empty rule set and undefined per-rule metrics are not
/// errors: they surface as empty collections or as `None` metric values.
#[derive(Debug, Error)]
pub enum MiningError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("failed to read configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MiningError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        MiningError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MiningError>;
