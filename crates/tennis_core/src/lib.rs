//! # tennis_core - Tennis Match Scoring Engine
//!
//! Point-by-point scoring for singles and doubles matches, with observable
//! scoreboard fields for presentation layers.
//!
//! ## Features
//! - Game, set and match scoring with deuce/advantage and tiebreaks
//! - Split-sets doubles decided by a 10-point match tiebreak
//! - Advantage final set (no ending tiebreak)
//! - Scoreboard messages ("Double Break Point", "Deuce #2", ...)
//! - JSON API for replaying a point sequence

pub mod api;
pub mod engine;
pub mod error;
pub mod models;
pub mod observable;

pub use api::{match_request_schema, replay_match, replay_match_json, MatchRequest, MatchResponse};
pub use engine::{MatchEngine, PointOutcome, ScoreMessage, ScoreboardFeed};
pub use error::{ConfigError, Result, RosterError, ScoreError};
pub use models::{
    Category, MatchConfig, NameContext, Player, ScoreSnapshot, Team, TeamIdentity, TeamSide,
};
pub use observable::{Observable, SubscriberId};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;
