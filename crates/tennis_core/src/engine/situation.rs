//! Point Situations
//!
//! Layered predicates, each one a refinement of the previous:
//! game point -> set point -> match point, and game point -> break point.
//! All are evaluated against a game score that has already been updated.

use super::score::{leader, Pair, ScoreState};
use crate::models::config::MatchConfig;

/// The leading side needs exactly one more point to take the game.
pub fn game_point(state: &ScoreState, score: Pair) -> bool {
    let Some(side) = leader(score) else {
        return false;
    };
    let points = score[side.index()];
    if state.tiebreak {
        points + 2 > state.tiebreak_to_win
    } else {
        points > 2
    }
}

/// Game point held by the receiver. Never in a tiebreak.
pub fn break_point(state: &ScoreState, score: Pair) -> bool {
    if !game_point(state, score) || state.tiebreak {
        return false;
    }
    match leader(score) {
        Some(side) => state.server != Some(side),
        None => false,
    }
}

/// Game point that also closes the set.
pub fn set_point(state: &ScoreState, score: Pair) -> bool {
    if !game_point(state, score) {
        return false;
    }
    if state.tiebreak {
        return true;
    }
    let games = state.current_set_score();
    match (leader(games), leader(score)) {
        (Some(set_leader), Some(game_leader)) => {
            set_leader == game_leader && games[set_leader.index()] > 4
        }
        _ => false,
    }
}

/// Set point that also closes the match.
///
/// Doubles treats any set point in the last scheduled set as match point,
/// without looking at the match score.
pub fn match_point(state: &ScoreState, config: &MatchConfig, score: Pair) -> bool {
    if !set_point(state, score) {
        return false;
    }
    if config.doubles && state.current_set == config.final_set_index() {
        return true;
    }
    match leader(score) {
        Some(side) => state.match_score[side.index()] + 1 == config.win_sets(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::score::MATCH_TIEBREAK_POINTS;
    use crate::models::config::{Category, TeamSide};

    fn singles() -> (MatchConfig, ScoreState) {
        let cfg = MatchConfig::for_category(Category::Women, false)
            .with_first_server(TeamSide::First)
            .with_match_type("Semifinal");
        let state = ScoreState::new(&cfg);
        (cfg, state)
    }

    #[test]
    fn test_game_point_regular() {
        let (_, state) = singles();
        assert!(!game_point(&state, [0, 0]));
        assert!(!game_point(&state, [2, 0]));
        assert!(game_point(&state, [3, 0]));
        assert!(game_point(&state, [3, 2]));
        assert!(!game_point(&state, [3, 3]));
        assert!(game_point(&state, [4, 3]));
    }

    #[test]
    fn test_game_point_tiebreak() {
        let (_, mut state) = singles();
        state.tiebreak = true;
        assert!(!game_point(&state, [5, 4]));
        assert!(game_point(&state, [6, 4]));
        assert!(!game_point(&state, [6, 6]));
        assert!(game_point(&state, [8, 7]));

        state.tiebreak_to_win = MATCH_TIEBREAK_POINTS;
        assert!(!game_point(&state, [8, 2]));
        assert!(game_point(&state, [9, 2]));
    }

    #[test]
    fn test_break_point_needs_receiver_ahead() {
        let (_, mut state) = singles();
        // First serves: Second leading is a break point.
        assert!(break_point(&state, [0, 3]));
        assert!(!break_point(&state, [3, 0]));
        state.tiebreak = true;
        assert!(!break_point(&state, [0, 6]));
    }

    #[test]
    fn test_set_point_requires_five_games_and_set_lead() {
        let (_, mut state) = singles();
        state.set_scores[0] = [5, 3];
        assert!(set_point(&state, [3, 1]));
        assert!(!set_point(&state, [1, 3]));

        state.set_scores[0] = [4, 3];
        assert!(!set_point(&state, [3, 1]));

        state.set_scores[0] = [5, 5];
        assert!(!set_point(&state, [3, 1]));

        state.set_scores[0] = [6, 5];
        assert!(set_point(&state, [3, 1]));
    }

    #[test]
    fn test_tiebreak_game_point_is_set_point() {
        let (_, mut state) = singles();
        state.set_scores[0] = [6, 6];
        state.tiebreak = true;
        assert!(set_point(&state, [2, 6]));
    }

    #[test]
    fn test_match_point_singles() {
        let (cfg, mut state) = singles();
        state.set_scores[0] = [5, 2];
        assert!(!match_point(&state, &cfg, [3, 0]));

        state.match_score = [1, 0];
        state.current_set = 1;
        state.set_scores[1] = [5, 2];
        assert!(match_point(&state, &cfg, [3, 0]));
    }

    #[test]
    fn test_match_point_doubles_final_set() {
        let cfg = MatchConfig::for_category(Category::Mixed, true).with_first_server(TeamSide::First);
        let mut state = ScoreState::new(&cfg);
        state.current_set = 2;
        state.match_score = [1, 1];
        state.set_scores[2] = [5, 4];
        assert!(match_point(&state, &cfg, [3, 1]));
    }
}
