//! Scoreboard Messages
//!
//! Derived once per recorded point. Priority (first match wins):
//! 1. Deuce
//! 2. Match decided
//! 3. Match point > set point > break point
//! 4. "Tiebreak" or the round label

use std::fmt;

use super::score::{leader, score_delta, Pair, ScoreState};
use super::situation::{break_point, game_point, match_point, set_point};
use crate::models::config::{MatchConfig, TeamSide};
use crate::models::roster::TeamIdentity;

/// Magnitude words, indexed by the game-score lead. A 10-point match
/// tiebreak can reach a lead of nine.
const MAGNITUDE: [&str; 10] = [
    "",
    "",
    "Double ",
    "Triple ",
    "Quadruple ",
    "Quintuple ",
    "Sextuple ",
    "Septuple ",
    "Octuple ",
    "Nonuple ",
];

pub fn magnitude_prefix(lead: u32) -> &'static str {
    MAGNITUDE.get(lead as usize).copied().unwrap_or("")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointKind {
    Match { championship: bool },
    Set,
    Break,
}

impl PointKind {
    fn label(self) -> &'static str {
        match self {
            PointKind::Match { championship: true } => "Championship Point",
            PointKind::Match { championship: false } => "Match Point",
            PointKind::Set => "Set Point",
            PointKind::Break => "Break Point",
        }
    }
}

/// Structured form of the scoreboard message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreMessage {
    /// `count` is the deuce number within the current game, starting at 1.
    Deuce { count: u32 },
    Won { team: String, championship: bool },
    /// `count` is the holder's running occurrence count; `lead` only matters
    /// on the first occurrence.
    Point {
        kind: PointKind,
        holder: TeamSide,
        count: u32,
        lead: u32,
    },
    Tiebreak,
    Label(String),
}

impl fmt::Display for ScoreMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreMessage::Deuce { count } if *count <= 1 => f.write_str("Deuce"),
            ScoreMessage::Deuce { count } => write!(f, "Deuce #{count}"),
            ScoreMessage::Won { team, championship } => {
                let word = if *championship { "championship" } else { "match" };
                write!(f, "{team} won {word}!")
            }
            ScoreMessage::Point {
                kind, count, lead, ..
            } => {
                if *count <= 1 {
                    write!(f, "{}{}", magnitude_prefix(*lead), kind.label())
                } else {
                    write!(f, "{} #{}", kind.label(), count)
                }
            }
            ScoreMessage::Tiebreak => f.write_str("Tiebreak"),
            ScoreMessage::Label(label) => f.write_str(label),
        }
    }
}

/// Evaluate the message for `score`, bumping whichever counter it reports.
pub fn derive_message(
    state: &mut ScoreState,
    config: &MatchConfig,
    teams: &[TeamIdentity; 2],
    score: Pair,
) -> ScoreMessage {
    if !state.tiebreak && score == [3, 3] {
        state.counters.deuce += 1;
        return ScoreMessage::Deuce {
            count: state.counters.deuce,
        };
    }

    let win_sets = config.win_sets();
    if let Some(side) = TeamSide::BOTH
        .into_iter()
        .find(|side| state.match_score[side.index()] == win_sets)
    {
        return ScoreMessage::Won {
            team: teams[side.index()].name.clone(),
            championship: config.match_word() == "championship",
        };
    }

    if let (true, Some(holder)) = (game_point(state, score), leader(score)) {
        let kind = if match_point(state, config, score) {
            Some(PointKind::Match {
                championship: config.is_championship(),
            })
        } else if set_point(state, score) {
            Some(PointKind::Set)
        } else if break_point(state, score) {
            Some(PointKind::Break)
        } else {
            None
        };

        if let Some(kind) = kind {
            let i = holder.index();
            let counter = match kind {
                PointKind::Match { .. } => &mut state.counters.match_point[i],
                PointKind::Set => &mut state.counters.set_point[i],
                PointKind::Break => &mut state.counters.break_point[i],
            };
            *counter += 1;
            return ScoreMessage::Point {
                kind,
                holder,
                count: *counter,
                lead: score_delta(score),
            };
        }
    }

    if state.tiebreak {
        ScoreMessage::Tiebreak
    } else {
        ScoreMessage::Label(config.match_type.clone())
    }
}
