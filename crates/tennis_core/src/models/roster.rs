//! Roster - players, teams and scoreboard names
//!
//! Player lists arrive as lines in the setup format `rank. Last, First (CTY)`.
//! The engine itself only ever sees a [`TeamIdentity`].

use std::collections::HashSet;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RosterError;

/// Countries whose players are written family name first.
const FAMILY_NAME_FIRST: [&str; 2] = ["CHN", "TPE"];

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Player {
    pub rank: u32,
    pub first_name: String,
    pub last_name: String,
    /// IOC three-letter country code.
    pub country: String,
}

impl Player {
    pub fn new(
        rank: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            rank,
            first_name: first_name.into(),
            last_name: last_name.into(),
            country: country.into(),
        }
    }

    /// Name as shown on the scoreboard row.
    ///
    /// Plain last name unless another listed player shares it, in which case
    /// the first initial(s) are prepended.
    pub fn score_name(&self, names: &NameContext) -> String {
        if !names.shared_last_names.contains(&self.last_name) {
            return self.last_name.clone();
        }
        format!("{} {}", self.first_initials(names), self.last_name)
    }

    fn first_initials(&self, names: &NameContext) -> String {
        let special = names.special_cases.iter().any(|(last, initial)| {
            *last == self.last_name && self.first_name.starts_with(*initial)
        });
        if special {
            let two: String = self.first_name.chars().take(2).collect();
            return format!("{two}.");
        }
        initials(&self.first_name)
    }

    fn key(&self) -> (u32, &str) {
        (self.rank, self.last_name.as_str())
    }
}

impl PartialEq for Player {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Player {}

impl std::hash::Hash for Player {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if FAMILY_NAME_FIRST.contains(&self.country.as_str()) {
            write!(f, "{} {}", self.last_name, self.first_name)
        } else {
            write!(f, "{} {}", self.first_name, self.last_name)
        }
    }
}

/// "Maria-Teresa" -> "M.-T.", "Juan Sebastian" -> "J.S."
fn initials(first_name: &str) -> String {
    first_name
        .split_whitespace()
        .map(|word| {
            word.split('-')
                .filter_map(|part| part.chars().next())
                .map(|c| format!("{c}."))
                .collect::<Vec<_>>()
                .join("-")
        })
        .collect()
}

/// Names that need disambiguation on the scoreboard.
#[derive(Debug, Clone, Default)]
pub struct NameContext {
    /// Last names carried by more than one listed player.
    pub shared_last_names: HashSet<String>,
    /// (last name, first initial) pairs that also collide, e.g. Karolina and Kristyna Pliskova.
    pub special_cases: Vec<(String, char)>,
}

impl NameContext {
    /// Derive both tables from a full player list.
    pub fn from_players<'a>(players: impl IntoIterator<Item = &'a Player>) -> Self {
        let mut seen_last = HashSet::new();
        let mut shared_last_names = HashSet::new();
        let mut seen_initial = HashSet::new();
        let mut special_cases = Vec::new();

        for player in players {
            if !seen_last.insert(player.last_name.clone()) {
                shared_last_names.insert(player.last_name.clone());
            }
            if let Some(initial) = player.first_name.chars().next() {
                let key = (player.last_name.clone(), initial);
                if !seen_initial.insert(key.clone()) && !special_cases.contains(&key) {
                    special_cases.push(key);
                }
            }
        }

        Self {
            shared_last_names,
            special_cases,
        }
    }
}

// ============================================================================
// Team
// ============================================================================

/// One player for singles, two for doubles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Team {
    pub players: Vec<Player>,
}

impl Team {
    pub fn singles(player: Player) -> Self {
        Self {
            players: vec![player],
        }
    }

    pub fn doubles(a: Player, b: Player) -> Self {
        Self {
            players: vec![a, b],
        }
    }

    pub fn is_doubles(&self) -> bool {
        self.players.len() == 2
    }

    pub fn score_name(&self, names: &NameContext) -> String {
        self.players
            .iter()
            .map(|p| p.score_name(names))
            .collect::<Vec<_>>()
            .join(" / ")
    }

    pub fn ranks(&self) -> String {
        self.players
            .iter()
            .map(|p| p.rank.to_string())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn countries(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.country.as_str()).collect()
    }

    pub fn identity(&self) -> TeamIdentity {
        TeamIdentity::new(self.to_string())
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.players.iter().map(|p| p.to_string()).collect();
        write!(f, "{}", names.join(" and "))
    }
}

/// What the engine knows about a team: a display name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct TeamIdentity {
    pub name: String,
}

impl TeamIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for TeamIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Parse `"12. Williams, Serena (USA)"`. Only the first three letters inside
/// the parentheses are kept as the country code.
pub fn parse_player_entry(entry: &str) -> Result<Player, RosterError> {
    let malformed = || RosterError::MalformedEntry(entry.to_string());

    let (rank, rest) = entry.split_once('.').ok_or_else(malformed)?;
    let rank = rank.trim();
    let rank: u32 = rank
        .parse()
        .map_err(|_| RosterError::InvalidRank(rank.to_string()))?;

    let (last, rest) = rest.split_once(',').ok_or_else(malformed)?;
    let (first, country) = rest.split_once('(').ok_or_else(malformed)?;
    let country: String = country.chars().take(3).collect();

    let (last, first) = (last.trim(), first.trim());
    if last.is_empty() || first.is_empty() || country.len() != 3 {
        return Err(malformed());
    }

    Ok(Player::new(rank, first, last, country))
}

/// Reject a line-up that names the same player twice.
pub fn ensure_unique<'a>(players: impl IntoIterator<Item = &'a Player>) -> Result<(), RosterError> {
    let mut seen = HashSet::new();
    for player in players {
        if !seen.insert(player) {
            return Err(RosterError::DuplicatePlayer(player.to_string()));
        }
    }
    Ok(())
}
