//! Board construction and actor spawning.

use slotmap::SlotMap;

use super::*;
use crate::config::ConfigError;
use crate::grid::Grid;
use rand_chacha::rand_core::SeedableRng;

impl Battle {
    /// Builds a battle from a validated configuration. Configuration errors
    /// are the only fatal failures; everything after setup is absorbed at
    /// the actor or orchestrator boundary.
    pub fn new(seed: u64, config: &BattleConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut grid = Grid::new(config.grid_width, config.grid_height, config.cell_size);
        let mut actors: SlotMap<ActorId, Actor> = SlotMap::with_key();
        let mut spawn_order = Vec::new();

        let mut spawn = |kind: ActorKind, name: String, pos: Pos| {
            let stats = match kind {
                ActorKind::Player => config.player_stats,
                ActorKind::Enemy => config.enemy_stats,
                ActorKind::Boss => config.boss_stats,
            };
            let id = actors.insert(Actor {
                id: ActorId::default(),
                kind,
                name,
                max_health: stats.max_health,
                health: stats.max_health,
                min_attack: stats.min_attack,
                max_attack: stats.max_attack,
                pos,
            });
            actors[id].id = id;
            spawn_order.push(id);
            grid.set_occupied(pos.x, pos.z, true, kind.cell_kind());
            id
        };

        let player_id = spawn(ActorKind::Player, "Hero".to_string(), config.player_spawn);
        for (i, pos) in config.enemy_spawns.iter().enumerate() {
            spawn(ActorKind::Enemy, format!("Raider {}", i + 1), *pos);
        }
        let boss_id =
            config.boss_spawn.map(|pos| spawn(ActorKind::Boss, "Warlord".to_string(), pos));

        let mut battle = Self {
            seed,
            config: config.clone(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: BattleState { grid, actors, player_id, boss_id, spawn_order },
            turn: TurnState::Idle,
            round: 0,
            player_moves_remaining: 0,
            player_attacked_this_turn: false,
            enemy_phase: None,
            outcome: None,
            log: Vec::new(),
            stats: RunStats::default(),
            trophies: TrophyCase::default(),
        };

        // A board configured with no hostiles is already won.
        battle.check_victory();
        if battle.outcome.is_none() {
            battle.begin_player_turn();
        }
        Ok(battle)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{skirmish_config, PLAYER_SPAWN};
    use super::*;
    use crate::types::RunOutcome;

    #[test]
    fn setup_occupies_every_spawn_cell() {
        let config = BattleConfig::default();
        let battle = Battle::new(1, &config).expect("battle");
        let occupied = battle.state().grid.occupied_cells().count();
        assert_eq!(occupied, 1 + config.enemy_spawns.len() + 1);
        assert_eq!(battle.state().actors.len(), occupied);
    }

    #[test]
    fn battle_opens_on_the_player_turn_with_a_full_budget() {
        let battle = Battle::new(1, &BattleConfig::default()).expect("battle");
        assert_eq!(battle.turn_state(), TurnState::PlayerTurn);
        assert_eq!(battle.round(), 1);
        assert_eq!(battle.moves_remaining(), 3);
        assert_eq!(battle.stats().player_turns, 1);
    }

    #[test]
    fn hostile_free_board_is_an_immediate_victory() {
        let mut config = skirmish_config(&[], None);
        config.enemy_spawns.clear();
        let battle = Battle::new(1, &config).expect("battle");
        assert_eq!(battle.outcome(), Some(RunOutcome::Victory));
        assert_eq!(battle.turn_state(), TurnState::Idle);
        assert_eq!(battle.state().actors[battle.state().player_id].pos, PLAYER_SPAWN);
    }
}
