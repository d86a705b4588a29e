//! Match setup file: roster lines plus match settings, in YAML or JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tennis_core::models::{ensure_unique, parse_player_entry};
use tennis_core::{Category, ConfigError, MatchConfig, NameContext, ScoreError, Team, TeamIdentity, TeamSide};

#[derive(Debug, Deserialize)]
pub struct SetupFile {
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub doubles: bool,
    /// Falls back to the category default.
    #[serde(default)]
    pub number_of_sets: Option<u8>,
    #[serde(default)]
    pub no_ending_tiebreak: bool,
    #[serde(default)]
    pub match_type: Option<String>,
    #[serde(default)]
    pub first_server: Option<TeamSide>,
    #[serde(default)]
    pub seed: u64,
    /// Roster lines per side, e.g. `"3. Halep, Simona (ROU)"`.
    pub teams: [Vec<String>; 2],
}

/// Validated setup, ready to start an engine.
#[derive(Debug)]
pub struct MatchSetup {
    pub config: MatchConfig,
    pub teams: [Team; 2],
    pub names: NameContext,
}

impl MatchSetup {
    /// Scoreboard names, used as engine identities.
    pub fn identities(&self) -> [TeamIdentity; 2] {
        self.teams
            .each_ref()
            .map(|team| TeamIdentity::new(team.score_name(&self.names)))
    }
}

/// Load a setup file. `.json` is parsed as JSON, anything else as YAML.
pub fn load_setup(path: &Path) -> Result<MatchSetup> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read setup file: {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let file: SetupFile = if is_json {
        serde_json::from_str(&text).context("Failed to parse JSON setup")?
    } else {
        serde_yaml::from_str(&text).context("Failed to parse YAML setup")?
    };

    let setup = file
        .resolve()
        .with_context(|| format!("Invalid setup in {}", path.display()))?;
    log::info!("Loaded setup from {}", path.display());
    Ok(setup)
}

impl SetupFile {
    pub fn resolve(self) -> Result<MatchSetup, ScoreError> {
        let mut config = MatchConfig::for_category(self.category, self.doubles)
            .with_no_ending_tiebreak(self.no_ending_tiebreak)
            .with_seed(self.seed);
        if let Some(sets) = self.number_of_sets {
            config = config.with_number_of_sets(sets);
        }
        if let Some(label) = self.match_type {
            config = config.with_match_type(label);
        }
        config.first_server = self.first_server;
        config.validate()?;

        let expected = if self.doubles { 2 } else { 1 };
        let [first, second] = self.teams;
        let first = parse_team(0, &first, expected)?;
        let second = parse_team(1, &second, expected)?;

        let everyone = first.players.iter().chain(&second.players);
        ensure_unique(everyone.clone())?;
        let names = NameContext::from_players(everyone);

        Ok(MatchSetup {
            config,
            teams: [first, second],
            names,
        })
    }
}

fn parse_team(team: usize, entries: &[String], expected: usize) -> Result<Team, ScoreError> {
    if entries.len() != expected {
        return Err(ConfigError::DoublesRosterMismatch {
            team,
            expected,
            found: entries.len(),
        }
        .into());
    }
    let players = entries
        .iter()
        .map(|entry| parse_player_entry(entry))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Team { players })
}
