//! Score State
//!
//! The single aggregate the engine mutates. Counters that the message logic
//! depends on live here too, so every reset is a named operation.

use crate::models::config::{MatchConfig, TeamSide};

/// Points, games or sets for both sides, indexed by [`TeamSide::index`].
pub type Pair = [u32; 2];

/// Normal tiebreak length.
pub const TIEBREAK_POINTS: u32 = 7;
/// Deciding match tiebreak in split-sets doubles.
pub const MATCH_TIEBREAK_POINTS: u32 = 10;

/// Side that is ahead, or `None` when level.
pub fn leader(score: Pair) -> Option<TeamSide> {
    use std::cmp::Ordering;
    match score[0].cmp(&score[1]) {
        Ordering::Greater => Some(TeamSide::First),
        Ordering::Less => Some(TeamSide::Second),
        Ordering::Equal => None,
    }
}

pub fn score_delta(score: Pair) -> u32 {
    score[0].abs_diff(score[1])
}

/// Occurrence counters behind the "#N" messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counters {
    pub match_point: Pair,
    pub set_point: Pair,
    pub break_point: Pair,
    pub deuce: u32,
}

impl Counters {
    /// Called whenever a game (regular or tiebreak) ends.
    pub fn reset_game(&mut self) {
        self.break_point = [0, 0];
        self.deuce = 0;
    }

    /// Called when a set is won on games. A tiebreak set win keeps the count.
    pub fn reset_set(&mut self) {
        self.set_point = [0, 0];
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreState {
    pub game_score: Pair,
    /// One entry per set slot. Unplayed sets stay at 0-0.
    pub set_scores: Vec<Pair>,
    pub match_score: Pair,
    pub current_set: usize,
    pub tiebreak: bool,
    pub tiebreak_to_win: u32,
    pub server: Option<TeamSide>,
    pub winner: Option<TeamSide>,
    pub message: String,
    pub counters: Counters,
}

impl ScoreState {
    pub fn new(config: &MatchConfig) -> Self {
        Self {
            game_score: [0, 0],
            set_scores: vec![[0, 0]; config.set_slots()],
            match_score: [0, 0],
            current_set: 0,
            tiebreak: false,
            tiebreak_to_win: TIEBREAK_POINTS,
            server: Some(config.opening_server()),
            winner: None,
            message: config.match_type.clone(),
            counters: Counters::default(),
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Games in the set being played.
    pub fn current_set_score(&self) -> Pair {
        self.set_scores
            .get(self.current_set)
            .copied()
            .unwrap_or([0, 0])
    }

    /// Games in the set being played, growing the board if needed.
    pub(crate) fn current_set_games_mut(&mut self) -> &mut Pair {
        let index = self.current_set;
        if index >= self.set_scores.len() {
            self.set_scores.resize(index + 1, [0, 0]);
        }
        &mut self.set_scores[index]
    }

    pub fn toggle_server(&mut self) {
        self.server = self.server.map(TeamSide::opponent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::Category;

    #[test]
    fn test_leader_and_delta() {
        assert_eq!(leader([3, 1]), Some(TeamSide::First));
        assert_eq!(leader([2, 4]), Some(TeamSide::Second));
        assert_eq!(leader([3, 3]), None);
        assert_eq!(score_delta([1, 5]), 4);
        assert_eq!(score_delta([5, 1]), 4);
    }

    #[test]
    fn test_fresh_state() {
        let cfg = MatchConfig::for_category(Category::Men, false)
            .with_first_server(TeamSide::Second)
            .with_match_type("Final");
        let state = ScoreState::new(&cfg);
        assert_eq!(state.set_scores.len(), 5);
        assert_eq!(state.server, Some(TeamSide::Second));
        assert_eq!(state.tiebreak_to_win, TIEBREAK_POINTS);
        assert_eq!(state.message, "Final");
        assert!(!state.is_over());
    }

    #[test]
    fn test_counter_resets() {
        let mut c = Counters {
            match_point: [1, 2],
            set_point: [3, 0],
            break_point: [0, 4],
            deuce: 3,
        };
        c.reset_game();
        assert_eq!(c.break_point, [0, 0]);
        assert_eq!(c.deuce, 0);
        assert_eq!(c.set_point, [3, 0]);
        c.reset_set();
        assert_eq!(c.set_point, [0, 0]);
        assert_eq!(c.match_point, [1, 2]);
    }

    #[test]
    fn test_toggle_server_keeps_none() {
        let cfg = MatchConfig::for_category(Category::Women, false).with_first_server(TeamSide::First);
        let mut state = ScoreState::new(&cfg);
        state.toggle_server();
        assert_eq!(state.server, Some(TeamSide::Second));
        state.server = None;
        state.toggle_server();
        assert_eq!(state.server, None);
    }
}
