pub mod json_api;

pub use json_api::{
    match_request_schema, replay_match, replay_match_json, MatchRequest, MatchResponse,
};
