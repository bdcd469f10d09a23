//! Battle configuration. Validation here is the only fatal error surface;
//! the running turn loop assumes a validated setup.

use serde::{Deserialize, Serialize};

use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub max_health: i32,
    pub min_attack: i32,
    pub max_attack: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BattleConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: f32,
    pub player_moves_per_turn: u32,
    pub enemy_moves_per_turn: u32,
    pub rest_heal_amount: i32,
    /// Added to both attack bounds of the player for every kill.
    pub attack_growth_per_kill: i32,
    pub player_spawn: Pos,
    pub player_stats: StatBlock,
    pub enemy_spawns: Vec<Pos>,
    pub enemy_stats: StatBlock,
    pub boss_spawn: Option<Pos>,
    pub boss_stats: StatBlock,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            cell_size: 1.0,
            player_moves_per_turn: 3,
            enemy_moves_per_turn: 2,
            rest_heal_amount: 25,
            attack_growth_per_kill: 2,
            player_spawn: Pos { x: 5, z: 0 },
            player_stats: StatBlock { max_health: 100, min_attack: 10, max_attack: 20 },
            enemy_spawns: vec![Pos { x: 2, z: 6 }, Pos { x: 5, z: 7 }, Pos { x: 8, z: 6 }],
            enemy_stats: StatBlock { max_health: 30, min_attack: 5, max_attack: 10 },
            boss_spawn: Some(Pos { x: 5, z: 9 }),
            boss_stats: StatBlock { max_health: 150, min_attack: 15, max_attack: 25 },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    GridTooSmall,
    SpawnOutOfBounds(Pos),
    SpawnOverlap(Pos),
    AttackRangeInverted,
    NonPositiveHealth,
}

impl BattleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::GridTooSmall);
        }

        for stats in [self.player_stats, self.enemy_stats, self.boss_stats] {
            if stats.min_attack > stats.max_attack {
                return Err(ConfigError::AttackRangeInverted);
            }
            if stats.max_health <= 0 {
                return Err(ConfigError::NonPositiveHealth);
            }
        }

        let mut spawns = vec![self.player_spawn];
        spawns.extend(self.enemy_spawns.iter().copied());
        spawns.extend(self.boss_spawn);

        for (i, pos) in spawns.iter().enumerate() {
            let in_bounds = pos.x >= 0
                && pos.z >= 0
                && (pos.x as usize) < self.grid_width
                && (pos.z as usize) < self.grid_height;
            if !in_bounds {
                return Err(ConfigError::SpawnOutOfBounds(*pos));
            }
            if spawns[..i].contains(pos) {
                return Err(ConfigError::SpawnOverlap(*pos));
            }
        }

        Ok(())
    }
}
