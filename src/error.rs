//! Error types for persona-flow.

use crate::flow::StepId;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Persona error: {0}")]
    Persona(#[from] PersonaError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Guided-flow errors.
///
/// `EmptyAnswer` and `UnrecognizedOption` are recoverable: the session is left
/// untouched and the caller should re-prompt the same step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    #[error("Invalid flow definition: {reason}")]
    InvalidFlowDefinition { reason: String },

    #[error("Empty answer for step {step_id}")]
    EmptyAnswer { step_id: StepId },

    #[error("Unrecognized option {answer:?} for step {step_id} (expected one of: {})", .options.join(", "))]
    UnrecognizedOption {
        step_id: StepId,
        answer: String,
        options: Vec<String>,
    },

    #[error("Flow already completed")]
    AlreadyCompleted,
}

impl FlowError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidFlowDefinition {
            reason: reason.into(),
        }
    }

    /// Whether the caller can recover by re-prompting the current step.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyAnswer { .. } | Self::UnrecognizedOption { .. })
    }
}

/// Persona lookup errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PersonaError {
    #[error("Unknown persona: {0}")]
    Unknown(String),

    #[error("No persona matches selection {0:?}")]
    NoMatch(String),
}

/// Presentation channel errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecognized_option_lists_choices() {
        let err = FlowError::UnrecognizedOption {
            step_id: 3,
            answer: "Banana".to_string(),
            options: vec!["Yes".to_string(), "No".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("\"Banana\""));
        assert!(msg.contains("Yes, No"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn definition_errors_are_not_recoverable() {
        assert!(!FlowError::invalid("empty").is_recoverable());
        assert!(!FlowError::AlreadyCompleted.is_recoverable());
    }

    #[test]
    fn flow_error_converts_into_top_level() {
        let err: Error = FlowError::EmptyAnswer { step_id: 0 }.into();
        assert!(matches!(err, Error::Flow(FlowError::EmptyAnswer { step_id: 0 })));
    }
}
