//! Match Engine
//!
//! Rules engine that turns a stream of "side X won the point" events into
//! game, set and match state.
//!
//! ```text
//!  record_point(team)
//!        │
//!        ▼
//!  ┌─────────────┐  game won   ┌────────────┐  set won   ┌──────────────┐
//!  │ game score  │ ──────────► │ set score  │ ─────────► │ match score  │──► winner
//!  │ (deuce/ad,  │             │ (6-6 →     │            │ (1-1 split   │   (terminal)
//!  │  tiebreak)  │ ◄────────── │  tiebreak) │            │  doubles →   │
//!  └─────────────┘  tiebreak   └────────────┘            │  10-pt TB)   │
//!        │                                               └──────────────┘
//!        ▼
//!  derive_message → ScoreboardFeed::publish
//! ```
//!
//! Single-threaded: one caller records points in sequence, each call runs to
//! completion before subscribers are notified.

pub mod feed;
pub mod labels;
pub mod message;
pub mod score;
pub mod situation;


pub use feed::ScoreboardFeed;
pub use labels::point_labels;
pub use message::{derive_message, magnitude_prefix, PointKind, ScoreMessage};
pub use score::{
    leader, score_delta, Counters, Pair, ScoreState, MATCH_TIEBREAK_POINTS, TIEBREAK_POINTS,
};

use crate::error::Result;
use crate::models::config::{MatchConfig, TeamSide};
use crate::models::roster::TeamIdentity;
use crate::models::snapshot::ScoreSnapshot;

/// What a single recorded point did, at its largest scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    /// Match already decided; the point was dropped.
    Ignored,
    Point,
    Game(TeamSide),
    Set(TeamSide),
    Match(TeamSide),
}

pub struct MatchEngine {
    config: MatchConfig,
    teams: [TeamIdentity; 2],
    state: ScoreState,
    feed: ScoreboardFeed,
    points: Vec<TeamSide>,
    last_message: Option<ScoreMessage>,
}

impl MatchEngine {
    /// Validates `config` and starts a match at 0-0, first set.
    pub fn new(config: MatchConfig, teams: [TeamIdentity; 2]) -> Result<Self> {
        config.validate()?;
        let state = ScoreState::new(&config);
        let feed = ScoreboardFeed::new(teams.clone(), &state);
        log::info!(
            "New {} match: {} vs {}, {} sets, {:?} serves first",
            config.match_type,
            teams[0],
            teams[1],
            config.number_of_sets,
            state.server
        );
        Ok(Self {
            config,
            teams,
            state,
            feed,
            points: Vec::new(),
            last_message: None,
        })
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Record a point for the raw operator index `team` (0 or 1).
    ///
    /// An out-of-range index fails without touching the state. Points after
    /// the match is decided are silently ignored.
    pub fn record_point(&mut self, team: usize) -> Result<PointOutcome> {
        let side = TeamSide::from_index(team).map_err(|err| {
            log::warn!("Rejected point for team index {}", team);
            err
        })?;
        Ok(self.score_point(side))
    }

    /// Record a point for `side`.
    pub fn score_point(&mut self, side: TeamSide) -> PointOutcome {
        if self.state.is_over() {
            log::debug!("Match over, ignoring point for {:?}", side);
            return PointOutcome::Ignored;
        }

        self.points.push(side);
        let outcome = self.apply_point(side);

        let score = self.state.game_score;
        let message = derive_message(&mut self.state, &self.config, &self.teams, score);
        self.state.message = message.to_string();
        self.last_message = Some(message);

        log::debug!(
            "Point {:?}: game {:?}, set {} {:?}, match {:?}, msg {:?}",
            side,
            self.state.game_score,
            self.state.current_set,
            self.state.current_set_score(),
            self.state.match_score,
            self.state.message
        );

        self.feed.publish(&self.state);
        outcome
    }

    fn apply_point(&mut self, side: TeamSide) -> PointOutcome {
        let i = side.index();
        let mut score = self.state.game_score;
        score[i] += 1;

        if !self.state.tiebreak {
            // Advantage lost: back to deuce.
            if score == [4, 4] {
                score = [3, 3];
            }
            if score[i] > 3 && score_delta(score) > 1 {
                log::debug!("{} wins game", self.teams[i]);
                self.state.game_score = [0, 0];
                self.state.counters.reset_game();
                let outcome = self.win_game(side);
                if !self.state.is_over() {
                    self.state.toggle_server();
                }
                return outcome;
            }
            self.state.game_score = score;
            return PointOutcome::Point;
        }

        // Tiebreak: serve changes after every odd-numbered point.
        if (score[0] + score[1]) % 2 == 1 {
            self.state.toggle_server();
        }
        if score[i] >= self.state.tiebreak_to_win && score_delta(score) > 1 {
            log::debug!("{} wins tiebreak {:?}", self.teams[i], score);
            self.state.current_set_games_mut()[i] += 1;
            self.state.game_score = [0, 0];
            self.state.counters.reset_game();
            self.state.tiebreak = false;
            return self.win_set(side);
        }
        self.state.game_score = score;
        PointOutcome::Point
    }

    /// Game won outside a tiebreak: add it to the set and check the set.
    fn win_game(&mut self, side: TeamSide) -> PointOutcome {
        let i = side.index();
        let this_set = self.state.current_set;
        let games = {
            let games = self.state.current_set_games_mut();
            games[i] += 1;
            *games
        };

        if games[i] > 5 && score_delta(games) > 1 {
            // Set points held in a tiebreak carry over; only a set won on
            // games clears them.
            self.state.counters.reset_set();
            return self.win_set(side);
        }

        let advantage_final_set = !self.config.doubles
            && self.config.no_ending_tiebreak
            && this_set == self.config.final_set_index();
        if !advantage_final_set && games == [6, 6] {
            log::info!("Set {} at 6-6, entering tiebreak", this_set + 1);
            self.state.tiebreak = true;
            self.state.game_score = [0, 0];
        }
        PointOutcome::Game(side)
    }

    fn win_set(&mut self, side: TeamSide) -> PointOutcome {
        let i = side.index();
        log::info!(
            "{} wins set {} {:?}",
            self.teams[i],
            self.state.current_set + 1,
            self.state.current_set_score()
        );
        self.state.match_score[i] += 1;

        if self.state.match_score[i] == self.config.win_sets() {
            log::info!("{} won {}!", self.teams[i], self.config.match_word());
            self.state.winner = Some(side);
            self.state.server = None;
            return PointOutcome::Match(side);
        }

        if self.config.has_match_tiebreak() && self.state.match_score == [1, 1] {
            log::info!("Sets split, deciding {}-point match tiebreak", MATCH_TIEBREAK_POINTS);
            self.state.tiebreak = true;
            self.state.tiebreak_to_win = MATCH_TIEBREAK_POINTS;
        }
        self.state.current_set += 1;
        PointOutcome::Set(side)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn teams(&self) -> &[TeamIdentity; 2] {
        &self.teams
    }

    pub fn state(&self) -> &ScoreState {
        &self.state
    }

    pub fn game_score(&self) -> Pair {
        self.state.game_score
    }

    pub fn set_scores(&self) -> &[Pair] {
        &self.state.set_scores
    }

    pub fn match_score(&self) -> Pair {
        self.state.match_score
    }

    pub fn current_set(&self) -> usize {
        self.state.current_set
    }

    pub fn tiebreak(&self) -> bool {
        self.state.tiebreak
    }

    pub fn tiebreak_to_win(&self) -> u32 {
        self.state.tiebreak_to_win
    }

    pub fn server(&self) -> Option<TeamSide> {
        self.state.server
    }

    pub fn winner(&self) -> Option<TeamSide> {
        self.state.winner
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Current scoreboard message.
    pub fn current_message(&self) -> &str {
        &self.state.message
    }

    /// Structured form of the last derived message, if any point was played.
    pub fn last_message(&self) -> Option<&ScoreMessage> {
        self.last_message.as_ref()
    }

    pub fn points_played(&self) -> &[TeamSide] {
        &self.points
    }

    pub fn is_game_point(&self) -> bool {
        situation::game_point(&self.state, self.state.game_score)
    }

    pub fn is_break_point(&self) -> bool {
        situation::break_point(&self.state, self.state.game_score)
    }

    pub fn is_set_point(&self) -> bool {
        situation::set_point(&self.state, self.state.game_score)
    }

    pub fn is_match_point(&self) -> bool {
        situation::match_point(&self.state, &self.config, self.state.game_score)
    }

    pub fn labels(&self) -> [String; 2] {
        point_labels(self.state.game_score, self.state.tiebreak)
    }

    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot::capture(self)
    }

    // ========================================================================
    // Notification
    // ========================================================================

    pub fn feed(&self) -> &ScoreboardFeed {
        &self.feed
    }

    /// Subscribe or unsubscribe presentation callbacks.
    pub fn feed_mut(&mut self) -> &mut ScoreboardFeed {
        &mut self.feed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreError;
    use crate::models::config::Category;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> MatchEngine {
        let cfg = MatchConfig::for_category(Category::Women, false)
            .with_first_server(TeamSide::First)
            .with_match_type("Semifinal");
        MatchEngine::new(cfg, [TeamIdentity::new("Halep"), TeamIdentity::new("Kvitova")]).unwrap()
    }

    #[test]
    fn test_invalid_team_leaves_state_unchanged() {
        let mut e = engine();
        e.record_point(0).unwrap();
        let before = e.state().clone();
        let err = e.record_point(2).unwrap_err();
        assert!(matches!(err, ScoreError::InvalidTeam { index: 2 }));
        assert_eq!(e.state(), &before);
        assert_eq!(e.points_played().len(), 1);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let cfg = MatchConfig::for_category(Category::Women, false).with_number_of_sets(4);
        let result = MatchEngine::new(cfg, Default::default());
        assert!(matches!(result, Err(ScoreError::Config(_))));
    }

    #[test]
    fn test_outcomes_escalate() {
        let mut e = engine();
        assert_eq!(e.record_point(1).unwrap(), PointOutcome::Point);
        for _ in 0..3 {
            e.record_point(0).unwrap();
        }
        assert_eq!(e.record_point(0).unwrap(), PointOutcome::Game(TeamSide::First));
    }

    #[test]
    fn test_feed_publishes_after_commit() {
        let mut e = engine();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        e.feed_mut().game_score.subscribe(move |s| sink.borrow_mut().push(*s));
        let servers = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&servers);
        e.feed_mut().server.subscribe(move |s| sink.borrow_mut().push(*s));

        for _ in 0..4 {
            e.record_point(0).unwrap();
        }

        assert_eq!(*seen.borrow(), vec![[1, 0], [2, 0], [3, 0], [0, 0]]);
        assert_eq!(*servers.borrow(), vec![Some(TeamSide::Second)]);
        assert_eq!(e.feed().game_score.get(), &[0, 0]);
        assert_eq!(e.feed().set_scores.get()[0], [1, 0]);
    }

    #[test]
    fn test_message_republished_every_point() {
        let mut e = engine();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        e.feed_mut().message.subscribe(move |_| *sink.borrow_mut() += 1);
        e.record_point(0).unwrap();
        e.record_point(1).unwrap();
        assert_eq!(*count.borrow(), 2);
        assert_eq!(e.current_message(), "Semifinal");
    }

    #[test]
    fn test_predicates_track_current_score() {
        let mut e = engine();
        for _ in 0..3 {
            e.record_point(1).unwrap();
        }
        assert!(e.is_game_point());
        assert!(e.is_break_point());
        assert!(!e.is_set_point());
        assert!(!e.is_match_point());
        assert_eq!(e.labels(), ["0", "40"]);
        assert_eq!(e.current_message(), "Triple Break Point");
        assert!(matches!(
            e.last_message(),
            Some(ScoreMessage::Point { kind: PointKind::Break, holder: TeamSide::Second, .. })
        ));
    }
}
