//! Turn orchestration root. `Battle` owns the board, the actor arena and the
//! phase state machine; submodules split setup, the pump loop, AI decisions,
//! the player action surface and combat resolution.

mod ai;
mod combat;
mod orchestrator;
mod player;
mod setup;

#[cfg(test)]
mod test_support;

use rand_chacha::ChaCha8Rng;

use crate::config::BattleConfig;
use crate::state::{Actor, BattleState};
use crate::stats::{RunStats, TrophyCase};
use crate::types::*;

pub struct Battle {
    seed: u64,
    config: BattleConfig,
    rng: ChaCha8Rng,
    state: BattleState,
    turn: TurnState,
    round: u64,
    player_moves_remaining: u32,
    player_attacked_this_turn: bool,
    enemy_phase: Option<EnemyPhase>,
    outcome: Option<RunOutcome>,
    log: Vec<BattleEvent>,
    stats: RunStats,
    trophies: TrophyCase,
}

/// Enemy-phase cursor over the snapshot taken at phase entry. `current`
/// holds the one in-flight actor turn; no two turns are ever mid-flight.
struct EnemyPhase {
    order: Vec<ActorId>,
    index: usize,
    current: Option<AiTurn>,
}

/// Resumable per-actor turn. The boss runs the same machine with a zero
/// move budget.
struct AiTurn {
    actor: ActorId,
    moves_remaining: u32,
    attacked: bool,
}

impl Battle {
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn turn_state(&self) -> TurnState {
        self.turn
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn log(&self) -> &[BattleEvent] {
        &self.log
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn trophies(&self) -> &TrophyCase {
        &self.trophies
    }

    /// Canonical state digest in spawn order, for determinism checks.
    pub fn snapshot_hash(&self) -> u64 {
        use std::hash::Hasher;
        use xxhash_rust::xxh3::Xxh3;

        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.round);
        hasher.write_u8(match self.turn {
            TurnState::PlayerTurn => 0,
            TurnState::EnemyTurn => 1,
            TurnState::BossTurn => 2,
            TurnState::Idle => 3,
        });
        hasher.write_u32(self.player_moves_remaining);

        for id in &self.state.spawn_order {
            let Some(actor) = self.state.actors.get(*id) else {
                hasher.write_u8(0);
                continue;
            };
            hasher.write_u8(1);
            hasher.write_i32(actor.pos.x);
            hasher.write_i32(actor.pos.z);
            hasher.write_i32(actor.health);
            hasher.write_i32(actor.min_attack);
            hasher.write_i32(actor.max_attack);
        }

        hasher.finish()
    }

    /// Shared movement primitive: vacate the old cell, occupy the new one,
    /// emit the presentation event. Callers have already validated the
    /// destination.
    fn move_actor(&mut self, id: ActorId, to: Pos) {
        let Some(actor) = self.state.actors.get_mut(id) else {
            return;
        };
        let from = actor.pos;
        let kind = actor.kind;
        actor.pos = to;
        self.state.grid.set_occupied(from.x, from.z, false, CellKind::Empty);
        self.state.grid.set_occupied(to.x, to.z, true, kind.cell_kind());
        self.log.push(BattleEvent::Moved { actor: id, from, to });
    }
}
