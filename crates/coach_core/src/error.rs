use thiserror::Error;

use crate::coach::Category;
use crate::roster::Position;

/// How a caller should treat a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The engine already fell back (or the operation simply did not happen).
    Recoverable,
    /// The host supplied something it explicitly asked for and it is unusable.
    Fatal,
}

#[derive(Error, Debug)]
pub enum CoachingError {
    #[error("Data format error in {source_name}: {message}")]
    DataFormat { source_name: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Coach '{name}' is already employed")]
    AlreadyEmployed { name: String },

    #[error("No roster position for {category} coaches")]
    UnsupportedPosition { category: Category },

    #[error("No coach to fire for {position}")]
    SlotEmpty { position: Position },

    #[error("Placeholder records cannot be hired")]
    PlaceholderNotHireable,

    #[error("Team with ID {team_id} not found")]
    TeamNotFound { team_id: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoachingError {
    pub fn data_format(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        CoachingError::DataFormat { source_name: source_name.into(), message: message.into() }
    }

    pub fn severity(&self) -> Severity {
        match self {
            CoachingError::Config(_) => Severity::Fatal,
            _ => Severity::Recoverable,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.severity() == Severity::Recoverable
    }
}

impl From<serde_json::Error> for CoachingError {
    fn from(err: serde_json::Error) -> Self {
        CoachingError::data_format("json", err.to_string())
    }
}

impl From<serde_yaml::Error> for CoachingError {
    fn from(err: serde_yaml::Error) -> Self {
        CoachingError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CoachingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_violations_are_recoverable() {
        let err = CoachingError::UnsupportedPosition { category: Category::SpecialTeams };
        assert!(err.is_recoverable());
        assert_eq!(err.to_string(), "No roster position for Special Teams coaches");

        let err = CoachingError::SlotEmpty { position: Position::Defense };
        assert_eq!(err.severity(), Severity::Recoverable);
    }

    #[test]
    fn config_errors_are_fatal() {
        let err: CoachingError = serde_yaml::from_str::<u32>("[not, a, number]").unwrap_err().into();
        assert_eq!(err.severity(), Severity::Fatal);
    }

    #[test]
    fn json_errors_become_data_format() {
        let err: CoachingError = serde_json::from_str::<u32>("{").unwrap_err().into();
        assert!(matches!(err, CoachingError::DataFormat { .. }));
    }
}
