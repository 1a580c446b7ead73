use crate::errors::XtabsError;

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Invalid command: cannot be empty")]
    EmptyCommand,

    #[error("Failed to parse command '{command}': {message}")]
    ParseFailed { command: String, message: String },

    #[error("Failed to spawn '{program}': {source}")]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },
}

impl XtabsError for LaunchError {
    fn error_code(&self) -> &'static str {
        match self {
            LaunchError::EmptyCommand => "LAUNCH_EMPTY_COMMAND",
            LaunchError::ParseFailed { .. } => "LAUNCH_PARSE_FAILED",
            LaunchError::SpawnFailed { .. } => "LAUNCH_SPAWN_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            LaunchError::EmptyCommand | LaunchError::ParseFailed { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_error_codes() {
        assert_eq!(LaunchError::EmptyCommand.error_code(), "LAUNCH_EMPTY_COMMAND");
        assert!(LaunchError::EmptyCommand.is_user_error());

        let error = LaunchError::SpawnFailed {
            program: "nonexistent".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(error.error_code(), "LAUNCH_SPAWN_FAILED");
        assert!(!error.is_user_error());
        assert!(error.to_string().starts_with("Failed to spawn 'nonexistent'"));
    }
}
