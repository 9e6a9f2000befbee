use sortviz_core::InputError;
use sortviz_runtime::ConfigError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("failed to initialize logging: {message}")]
    Logging { message: String },
}

impl CliError {
    /// Process exit code: 2 for bad input or configuration, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input(_) | Self::InvalidArgument { .. } => 2,
            Self::Config(ConfigError::Io(_)) => 1,
            Self::Config(_) => 2,
            Self::Io(_) | Self::Json(_) | Self::Logging { .. } => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CliError;
    use sortviz_core::InputError;
    use sortviz_runtime::ConfigError;

    #[test]
    fn invalid_constructor_sets_message_and_usage_code() {
        let error = CliError::invalid("bad height");
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "invalid argument: bad height");
    }

    #[test]
    fn input_errors_pass_message_through() {
        let error = CliError::from(InputError::Empty);
        assert_eq!(error.exit_code(), 2);
        assert_eq!(error.to_string(), "Please enter valid comma-separated numbers.");
    }

    #[test]
    fn config_io_is_an_io_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(CliError::from(ConfigError::Io(io)).exit_code(), 1);
        let invalid = ConfigError::Validation(vec!["size must be in 5..=50, got 2".into()]);
        assert_eq!(CliError::from(invalid).exit_code(), 2);
    }

    #[test]
    fn io_error_maps_to_exit_one() {
        let io = std::io::Error::other("broken pipe");
        assert_eq!(CliError::from(io).exit_code(), 1);
    }
}
