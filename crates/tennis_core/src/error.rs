use thiserror::Error;

/// Errors raised while building or driving a match.
#[derive(Error, Debug)]
pub enum ScoreError {
    #[error("Invalid team index: {index} (expected 0 or 1)")]
    InvalidTeam { index: usize },

    #[error("Invalid match configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid roster: {0}")]
    Roster(#[from] RosterError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },
}

impl ScoreError {
    /// Input errors leave the engine untouched, so the operator can simply retry.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ScoreError::InvalidTeam { .. })
    }
}

/// Setup-time validation failures. Raised before an engine exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{sets} sets is not a valid {} format", format_name(.doubles))]
    InvalidNumberOfSets { doubles: bool, sets: u8 },

    #[error("Match type label must not be empty")]
    EmptyMatchType,

    #[error("Team {team} has {found} player(s), expected {expected}")]
    DoublesRosterMismatch {
        team: usize,
        expected: usize,
        found: usize,
    },
}

fn format_name(doubles: &bool) -> &'static str {
    if *doubles {
        "doubles"
    } else {
        "singles"
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("Malformed player entry: {0:?}")]
    MalformedEntry(String),

    #[error("Invalid rank: {0:?}")]
    InvalidRank(String),

    #[error("Player listed more than once: {0}")]
    DuplicatePlayer(String),
}

pub type Result<T> = std::result::Result<T, ScoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = ScoreError::InvalidTeam { index: 7 };
        assert_eq!(err.to_string(), "Invalid team index: 7 (expected 0 or 1)");
        assert!(err.is_input_error());

        let err = ConfigError::InvalidNumberOfSets { doubles: false, sets: 4 };
        assert_eq!(err.to_string(), "4 sets is not a valid singles format");
    }

    #[test]
    fn test_config_error_converts() {
        let err: ScoreError = ConfigError::EmptyMatchType.into();
        assert!(matches!(err, ScoreError::Config(ConfigError::EmptyMatchType)));
        assert!(!err.is_input_error());
    }
}
