pub mod battle;
pub mod config;
pub mod grid;
pub mod journal;
pub mod replay;
pub mod state;
pub mod stats;
pub mod types;

pub use battle::Battle;
pub use config::{BattleConfig, ConfigError, StatBlock};
pub use grid::{Cell, Grid};
pub use journal::{InputJournal, InputRecord};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use state::{Actor, BattleState};
pub use stats::{RunStats, Trophy, TrophyCase};
pub use types::*;
