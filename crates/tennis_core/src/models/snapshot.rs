//! Serializable view of a match at one moment.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::config::TeamSide;
use crate::engine::{MatchEngine, Pair};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreSnapshot {
    pub match_type: String,
    pub teams: [String; 2],
    pub game_score: Pair,
    /// Game score as called on court ("15", "AD", ...).
    pub labels: [String; 2],
    pub set_scores: Vec<Pair>,
    pub match_score: Pair,
    pub current_set: usize,
    pub tiebreak: bool,
    pub tiebreak_to_win: u32,
    pub server: Option<TeamSide>,
    pub winner: Option<TeamSide>,
    pub message: String,
    pub points_played: usize,
}

impl ScoreSnapshot {
    pub fn capture(engine: &MatchEngine) -> Self {
        let state = engine.state();
        Self {
            match_type: engine.config().match_type.clone(),
            teams: engine.teams().clone().map(|team| team.name),
            game_score: state.game_score,
            labels: engine.labels(),
            set_scores: state.set_scores.clone(),
            match_score: state.match_score,
            current_set: state.current_set,
            tiebreak: state.tiebreak,
            tiebreak_to_win: state.tiebreak_to_win,
            server: state.server,
            winner: state.winner,
            message: state.message.clone(),
            points_played: engine.points_played().len(),
        }
    }

    /// Sets that have been started, including the one in progress.
    pub fn sets_in_play(&self) -> &[Pair] {
        let end = (self.current_set + 1).min(self.set_scores.len());
        &self.set_scores[..end]
    }

    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ScoreSnapshot)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
