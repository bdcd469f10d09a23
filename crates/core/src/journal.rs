use serde::{Deserialize, Serialize};

use crate::config::BattleConfig;
use crate::types::PlayerCommand;

/// Everything needed to reproduce a battle: the seed, the configuration and
/// the ordered player inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputJournal {
    pub format_version: u16,
    pub seed: u64,
    pub config: BattleConfig,
    pub inputs: Vec<InputRecord>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputRecord {
    pub seq: u64,
    pub command: PlayerCommand,
}

impl InputJournal {
    pub fn new(seed: u64, config: BattleConfig) -> Self {
        Self { format_version: 1, seed, config, inputs: Vec::new() }
    }

    pub fn append(&mut self, command: PlayerCommand) {
        let seq = self.inputs.len() as u64;
        self.inputs.push(InputRecord { seq, command });
    }
}
