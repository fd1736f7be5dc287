use crate::domain::model::ParticipantId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MixError {
    #[error("Invalid pool: {reason}")]
    InvalidInput { reason: String },

    #[error("No valid team partitions available with the current constraints")]
    NoValidPartition,

    #[error("A team mix is already in progress")]
    MixInProgress,

    #[error("No level registered for participant {participant}")]
    MissingLevel { participant: ParticipantId },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Permission denied for command '{command}'")]
    PermissionDenied { command: String },

    #[error("Bad arguments, usage: {usage}")]
    UsageError { usage: String },

    #[error("Channel error: {message}")]
    ChannelError { message: String },
}

impl MixError {
    /// Text sent back to the chat when a command fails.
    pub fn user_friendly_message(&self) -> String {
        match self {
            MixError::InvalidInput { .. } => "There must be exactly 10 members (voice channel members minus exclusions plus extras) to start a mix.".to_string(),
            MixError::NoValidPartition => {
                "No valid team partitions available with the current constraints.".to_string()
            }
            MixError::MixInProgress => {
                "A team mix is already in progress. Please wait until it is finished.".to_string()
            }
            MixError::MissingLevel { participant } => format!(
                "{} has no level yet. Ask a bot admin to add one.",
                participant.mention()
            ),
            MixError::PermissionDenied { command } => {
                format!("You are not allowed to use the {} command.", command)
            }
            MixError::UsageError { usage } => format!("Usage: {}", usage),
            MixError::IoError(_) | MixError::SerializationError(_) => {
                "Could not read or write the member list.".to_string()
            }
            MixError::ConfigError { message } => format!("Configuration problem: {}", message),
            MixError::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            MixError::ChannelError { message } => format!("Error: {}", message),
        }
    }

    /// Whether the failure is the caller's fault rather than the bot's.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            MixError::InvalidInput { .. }
                | MixError::NoValidPartition
                | MixError::MixInProgress
                | MixError::MissingLevel { .. }
                | MixError::PermissionDenied { .. }
                | MixError::UsageError { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_message_matches_chat_reply() {
        assert_eq!(
            MixError::MixInProgress.user_friendly_message(),
            "A team mix is already in progress. Please wait until it is finished."
        );
    }

    #[test]
    fn test_missing_level_mentions_participant() {
        let err = MixError::MissingLevel {
            participant: ParticipantId(42),
        };
        assert!(err.user_friendly_message().contains("<@42>"));
        assert!(err.is_user_error());
    }

    #[test]
    fn test_config_error_message_not_repeated() {
        let err = MixError::ConfigError {
            message: "TOML parsing error: expected `]`".to_string(),
        };
        assert_eq!(
            err.user_friendly_message(),
            "Configuration problem: TOML parsing error: expected `]`"
        );
    }

    #[test]
    fn test_io_error_is_not_user_error() {
        let err = MixError::from(std::io::Error::other("disk gone"));
        assert!(!err.is_user_error());
    }
}
