//! Match Configuration
//!
//! Everything the setup flow decides before the first point is played.
//! Read-only once the engine is constructed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ScoreError};

// ============================================================================
// TeamSide
// ============================================================================

/// One of the two sides of the net. Index 0 is the top row of the scoreboard.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    First,
    Second,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::First, TeamSide::Second];

    /// Raw operator index (0 or 1) to side.
    pub fn from_index(index: usize) -> Result<Self, ScoreError> {
        match index {
            0 => Ok(TeamSide::First),
            1 => Ok(TeamSide::Second),
            _ => Err(ScoreError::InvalidTeam { index }),
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            TeamSide::First => 0,
            TeamSide::Second => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::First => TeamSide::Second,
            TeamSide::Second => TeamSide::First,
        }
    }
}

// ============================================================================
// Category
// ============================================================================

/// Draw the match belongs to. Only drives the default number of sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Women,
    Men,
    Mixed,
}

// ============================================================================
// MatchConfig
// ============================================================================

/// Label that switches match wording to "championship".
pub const CHAMPIONSHIP: &str = "Championship";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MatchConfig {
    #[serde(default)]
    pub doubles: bool,
    #[serde(default)]
    pub category: Category,
    pub number_of_sets: u8,
    /// Final set must be won by two games; no deciding tiebreak (singles only).
    #[serde(default)]
    pub no_ending_tiebreak: bool,
    /// Round label shown when nothing special is happening, e.g. "Semifinal".
    pub match_type: String,
    /// Opening server. `None` means a coin toss seeded with `seed`.
    #[serde(default)]
    pub first_server: Option<TeamSide>,
    #[serde(default)]
    pub seed: u64,
}

impl MatchConfig {
    /// Defaults for a draw: men's singles play best of five, everything
    /// else best of three.
    pub fn for_category(category: Category, doubles: bool) -> Self {
        let number_of_sets = if category == Category::Men && !doubles { 5 } else { 3 };
        Self {
            doubles,
            category,
            number_of_sets,
            no_ending_tiebreak: false,
            match_type: "Round 1".to_string(),
            first_server: None,
            seed: 0,
        }
    }

    pub fn with_match_type(mut self, label: impl Into<String>) -> Self {
        self.match_type = label.into();
        self
    }

    pub fn with_number_of_sets(mut self, sets: u8) -> Self {
        self.number_of_sets = sets;
        self
    }

    pub fn with_no_ending_tiebreak(mut self, value: bool) -> Self {
        self.no_ending_tiebreak = value;
        self
    }

    pub fn with_first_server(mut self, side: TeamSide) -> Self {
        self.first_server = Some(side);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets needed to take the match. Doubles is always two.
    pub fn win_sets(&self) -> u32 {
        if self.doubles {
            2
        } else {
            (u32::from(self.number_of_sets) + 1) / 2
        }
    }

    /// Doubles played as two sets plus a 10-point match tiebreak.
    pub fn has_match_tiebreak(&self) -> bool {
        self.doubles && self.number_of_sets == 2
    }

    /// Set slots on the board. The match tiebreak takes an extra slot.
    pub fn set_slots(&self) -> usize {
        usize::from(self.number_of_sets) + usize::from(self.has_match_tiebreak())
    }

    /// Index of the last scheduled set. The match tiebreak of split-sets
    /// doubles sits after it.
    pub fn final_set_index(&self) -> usize {
        usize::from(self.number_of_sets).saturating_sub(1)
    }

    pub fn is_championship(&self) -> bool {
        self.match_type == CHAMPIONSHIP
    }

    /// "match" or "championship", for the winner message.
    pub fn match_word(&self) -> &'static str {
        if self.match_type.eq_ignore_ascii_case(CHAMPIONSHIP) {
            "championship"
        } else {
            "match"
        }
    }

    /// Resolve the opening server, tossing a seeded coin if none was chosen.
    pub fn opening_server(&self) -> TeamSide {
        match self.first_server {
            Some(side) => side,
            None => coin_toss(self.seed),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let allowed: &[u8] = if self.doubles { &[2, 3] } else { &[3, 5] };
        if !allowed.contains(&self.number_of_sets) {
            return Err(ConfigError::InvalidNumberOfSets {
                doubles: self.doubles,
                sets: self.number_of_sets,
            });
        }
        if self.match_type.trim().is_empty() {
            return Err(ConfigError::EmptyMatchType);
        }
        Ok(())
    }
}

/// Deterministic coin toss: same seed, same opening server.
pub fn coin_toss(seed: u64) -> TeamSide {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    if rng.gen_bool(0.5) {
        TeamSide::First
    } else {
        TeamSide::Second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_from_index() {
        assert_eq!(TeamSide::from_index(0).unwrap(), TeamSide::First);
        assert_eq!(TeamSide::from_index(1).unwrap(), TeamSide::Second);
        assert!(matches!(
            TeamSide::from_index(2),
            Err(ScoreError::InvalidTeam { index: 2 })
        ));
        assert_eq!(TeamSide::First.opponent(), TeamSide::Second);
    }

    #[test]
    fn test_category_defaults() {
        assert_eq!(MatchConfig::for_category(Category::Men, false).number_of_sets, 5);
        assert_eq!(MatchConfig::for_category(Category::Women, false).number_of_sets, 3);
        assert_eq!(MatchConfig::for_category(Category::Mixed, true).number_of_sets, 3);
        assert_eq!(MatchConfig::for_category(Category::Men, true).number_of_sets, 3);
    }

    #[test]
    fn test_win_sets() {
        let singles3 = MatchConfig::for_category(Category::Women, false);
        let singles5 = MatchConfig::for_category(Category::Men, false);
        let doubles2 = MatchConfig::for_category(Category::Mixed, true).with_number_of_sets(2);
        assert_eq!(singles3.win_sets(), 2);
        assert_eq!(singles5.win_sets(), 3);
        assert_eq!(doubles2.win_sets(), 2);
        assert!(doubles2.has_match_tiebreak());
        assert_eq!(doubles2.set_slots(), 3);
        assert_eq!(singles5.set_slots(), 5);
        assert_eq!(singles3.final_set_index(), 2);
        assert_eq!(doubles2.final_set_index(), 1);
    }

    #[test]
    fn test_validate_rejects_bad_set_counts() {
        let base = MatchConfig::for_category(Category::Women, false);
        assert!(base.validate().is_ok());
        for sets in [0, 1, 2, 4, 7] {
            assert_eq!(
                base.clone().with_number_of_sets(sets).validate(),
                Err(ConfigError::InvalidNumberOfSets { doubles: false, sets })
            );
        }
        let doubles = MatchConfig::for_category(Category::Men, true);
        assert!(doubles.clone().with_number_of_sets(2).validate().is_ok());
        assert!(doubles.with_number_of_sets(5).validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_label() {
        let cfg = MatchConfig::for_category(Category::Women, false).with_match_type("  ");
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyMatchType));
    }

    #[test]
    fn test_coin_toss_is_deterministic() {
        for seed in 0..32 {
            assert_eq!(coin_toss(seed), coin_toss(seed));
        }
        let sides: std::collections::HashSet<_> = (0..64).map(coin_toss).collect();
        assert_eq!(sides.len(), 2);
    }

    #[test]
    fn test_match_word() {
        let cfg = MatchConfig::for_category(Category::Women, false);
        assert_eq!(cfg.match_word(), "match");
        let cfg = cfg.with_match_type("championship");
        assert_eq!(cfg.match_word(), "championship");
        assert!(!cfg.is_championship());
    }

    #[test]
    fn test_config_from_yaml() {
        let yaml = "number_of_sets: 5\nmatch_type: Championship\nfirst_server: second\n";
        let cfg: MatchConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!cfg.doubles);
        assert_eq!(cfg.opening_server(), TeamSide::Second);
        assert!(cfg.is_championship());
    }
}
