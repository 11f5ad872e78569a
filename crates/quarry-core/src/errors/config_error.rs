/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("invalid config: {reason}")]
    Parse { reason: String },

    #[error("config value out of range: {field} {reason}")]
    OutOfRange { field: String, reason: String },
}
