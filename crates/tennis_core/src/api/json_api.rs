//! JSON API
//!
//! Replays a recorded point sequence and returns the final scoreboard. The
//! request carries its own config, so a response is fully reproducible from
//! the request alone.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::engine::{MatchEngine, PointOutcome};
use crate::error::{Result, ScoreError};
use crate::models::config::MatchConfig;
use crate::models::roster::TeamIdentity;
use crate::models::snapshot::ScoreSnapshot;
use crate::SCHEMA_VERSION;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MatchRequest {
    pub schema_version: u8,
    pub config: MatchConfig,
    #[serde(default)]
    pub teams: [TeamIdentity; 2],
    /// Winning team index (0 or 1) of every point, in order.
    #[serde(default)]
    pub points: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub schema_version: u8,
    pub snapshot: ScoreSnapshot,
    /// Scoreboard message after each accepted point.
    pub messages: Vec<String>,
    /// Points received after the match was decided.
    pub ignored_points: usize,
}

/// Typed entry point behind [`replay_match_json`].
pub fn replay_match(request: MatchRequest) -> Result<MatchResponse> {
    if request.schema_version != SCHEMA_VERSION {
        log::warn!("Unsupported schema version: {}", request.schema_version);
        return Err(ScoreError::UnsupportedSchema {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }

    let MatchRequest {
        config,
        teams,
        points,
        ..
    } = request;

    let mut engine = MatchEngine::new(config, teams)?;
    let mut messages = Vec::with_capacity(points.len());
    let mut ignored_points = 0;
    for team in points {
        match engine.record_point(team)? {
            PointOutcome::Ignored => ignored_points += 1,
            _ => messages.push(engine.current_message().to_string()),
        }
    }

    if ignored_points > 0 {
        log::debug!("{} points after match end were ignored", ignored_points);
    }

    Ok(MatchResponse {
        schema_version: SCHEMA_VERSION,
        snapshot: engine.snapshot(),
        messages,
        ignored_points,
    })
}

/// Replay a `MatchRequest` JSON document and return a `MatchResponse` JSON
/// document. An out-of-range team index anywhere in `points` fails the whole
/// request.
pub fn replay_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = replay_match(request)?;
    Ok(serde_json::to_string(&response)?)
}

/// JSON schema of [`MatchRequest`], pretty-printed.
pub fn match_request_schema() -> Result<String> {
    let schema = schemars::schema_for!(MatchRequest);
    Ok(serde_json::to_string_pretty(&schema)?)
}
