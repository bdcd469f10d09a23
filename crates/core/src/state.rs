use slotmap::SlotMap;

use crate::grid::Grid;
use crate::types::{ActorId, ActorKind, Pos};

#[derive(Clone, Debug)]
pub struct Actor {
    pub id: ActorId,
    pub kind: ActorKind,
    pub name: String,
    pub max_health: i32,
    pub health: i32,
    pub min_attack: i32,
    pub max_attack: i32,
    pub pos: Pos,
}

impl Actor {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Clamps at zero. Returns true when this damage was lethal.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        let was_alive = self.is_alive();
        self.health = (self.health - amount.max(0)).max(0);
        was_alive && !self.is_alive()
    }

    /// Clamps at max health. Returns the amount actually recovered.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let recovered = amount.max(0).min(self.max_health - self.health);
        self.health += recovered;
        recovered
    }
}

pub struct BattleState {
    pub grid: Grid,
    pub actors: SlotMap<ActorId, Actor>,
    pub player_id: ActorId,
    pub boss_id: Option<ActorId>,
    /// Stable registration order. Enemy-phase snapshots and the state hash
    /// iterate this, never the slotmap directly.
    pub spawn_order: Vec<ActorId>,
}

impl BattleState {
    pub fn occupant_at(&self, pos: Pos) -> Option<ActorId> {
        self.spawn_order
            .iter()
            .copied()
            .find(|id| self.actors.get(*id).is_some_and(|actor| actor.pos == pos))
    }

    pub fn living_hostiles(&self) -> usize {
        self.actors.values().filter(|actor| actor.kind != ActorKind::Player).count()
    }
}
