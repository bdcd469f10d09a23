//! Shared fixtures for the battle test suites: small boards with explicit
//! hostile placements. No production logic lives here.

use super::*;

pub(super) const PLAYER_SPAWN: Pos = Pos { x: 5, z: 0 };

/// A 10×10 board with the player at the bottom-center and hostiles exactly
/// where the test puts them.
pub(super) fn skirmish_config(enemy_spawns: &[Pos], boss_spawn: Option<Pos>) -> BattleConfig {
    BattleConfig {
        player_spawn: PLAYER_SPAWN,
        enemy_spawns: enemy_spawns.to_vec(),
        boss_spawn,
        ..BattleConfig::default()
    }
}

pub(super) fn battle_with(enemy_spawns: &[Pos], boss_spawn: Option<Pos>) -> Battle {
    Battle::new(42, &skirmish_config(enemy_spawns, boss_spawn)).expect("fixture config is valid")
}

pub(super) fn enemy_at(battle: &Battle, pos: Pos) -> ActorId {
    battle
        .state()
        .actors
        .iter()
        .find(|(_, actor)| actor.kind != ActorKind::Player && actor.pos == pos)
        .map(|(id, _)| id)
        .expect("an enemy occupies the fixture cell")
}
