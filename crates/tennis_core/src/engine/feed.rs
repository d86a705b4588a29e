//! Scoreboard Feed
//!
//! Observable mirror of the score state. The engine commits a point to its
//! [`ScoreState`] first and only then publishes here, so subscribers never
//! see a half-applied point.

use super::score::{Pair, ScoreState};
use crate::models::config::TeamSide;
use crate::models::roster::TeamIdentity;
use crate::observable::Observable;

#[derive(Debug)]
pub struct ScoreboardFeed {
    pub teams: Observable<[TeamIdentity; 2]>,
    pub game_score: Observable<Pair>,
    pub set_scores: Observable<Vec<Pair>>,
    pub match_score: Observable<Pair>,
    pub current_set: Observable<usize>,
    pub tiebreak: Observable<bool>,
    pub server: Observable<Option<TeamSide>>,
    pub winner: Observable<Option<TeamSide>>,
    pub message: Observable<String>,
}

impl ScoreboardFeed {
    pub fn new(teams: [TeamIdentity; 2], state: &ScoreState) -> Self {
        Self {
            teams: Observable::new(teams),
            game_score: Observable::new(state.game_score),
            set_scores: Observable::new(state.set_scores.clone()),
            match_score: Observable::new(state.match_score),
            current_set: Observable::new(state.current_set),
            tiebreak: Observable::new(state.tiebreak),
            server: Observable::new(state.server),
            winner: Observable::new(state.winner),
            message: Observable::new(state.message.clone()),
        }
    }

    /// Push a committed point. Game score and message go out on every point;
    /// the rest only when they moved. Score fields publish before the
    /// server/winner/message fields that depend on them.
    pub fn publish(&mut self, state: &ScoreState) {
        self.set_scores.set_if_changed(state.set_scores.clone());
        self.match_score.set_if_changed(state.match_score);
        self.current_set.set_if_changed(state.current_set);
        self.tiebreak.set_if_changed(state.tiebreak);
        self.game_score.set(state.game_score);
        self.server.set_if_changed(state.server);
        self.winner.set_if_changed(state.winner);
        self.message.set(state.message.clone());
    }

    /// Replay every current value to subscribers, e.g. after a view attaches.
    pub fn refresh(&mut self) {
        self.teams.notify();
        self.set_scores.notify();
        self.match_score.notify();
        self.current_set.notify();
        self.tiebreak.notify();
        self.game_score.notify();
        self.server.notify();
        self.winner.notify();
        self.message.notify();
    }
}
