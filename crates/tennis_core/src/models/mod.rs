pub mod config;
pub mod roster;
pub mod snapshot;

pub use config::{coin_toss, Category, MatchConfig, TeamSide, CHAMPIONSHIP};
pub use roster::{
    ensure_unique, parse_player_entry, NameContext, Player, Team, TeamIdentity,
};
pub use snapshot::ScoreSnapshot;
