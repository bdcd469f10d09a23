//! The player action surface used by the external action menu. Every
//! rejected request leaves the battle untouched and the turn open.

use super::*;
use crate::battle::combat::adjacent;

impl Battle {
    pub fn moves_remaining(&self) -> u32 {
        self.player_moves_remaining
    }

    /// Living hostiles one step away from the player, in spawn order.
    pub fn adjacent_targets(&self) -> Vec<ActorId> {
        let Some(player) = self.state.actors.get(self.state.player_id) else {
            return Vec::new();
        };
        self.state
            .spawn_order
            .iter()
            .copied()
            .filter(|id| {
                self.state.actors.get(*id).is_some_and(|actor| {
                    actor.kind != ActorKind::Player && adjacent(actor.pos, player.pos)
                })
            })
            .collect()
    }

    /// One grid step. Consumes one move from the turn budget on success.
    pub fn player_move(&mut self, dir: Direction) -> Result<(), BattleError> {
        self.ensure_player_turn()?;
        if self.player_moves_remaining == 0 {
            return Err(BattleError::NoMovesRemaining);
        }
        let Some(player) = self.state.actors.get(self.state.player_id) else {
            return Err(BattleError::UnknownActor);
        };
        let dest = player.pos.step(dir);
        if !self.state.grid.is_free(dest.x, dest.z) {
            return Err(BattleError::BlockedMove);
        }

        self.move_actor(self.state.player_id, dest);
        self.player_moves_remaining -= 1;
        self.stats.steps_taken += 1;
        Ok(())
    }

    /// One attack per turn against an adjacent target. Attacking does not
    /// end the turn; remaining moves stay available.
    pub fn player_attack(&mut self, target: ActorId) -> Result<(), BattleError> {
        self.ensure_player_turn()?;
        if self.player_attacked_this_turn {
            return Err(BattleError::AlreadyAttacked);
        }
        let Some(player) = self.state.actors.get(self.state.player_id) else {
            return Err(BattleError::UnknownActor);
        };
        let Some(victim) = self.state.actors.get(target) else {
            return Err(BattleError::UnknownActor);
        };
        if victim.kind == ActorKind::Player || !adjacent(player.pos, victim.pos) {
            return Err(BattleError::NotAdjacent);
        }

        self.player_attacked_this_turn = true;
        self.resolve_attack(self.state.player_id, target);
        Ok(())
    }

    /// Recover a fixed amount of health, then end the turn. Rejected at
    /// full health.
    pub fn player_rest(&mut self) -> Result<(), BattleError> {
        self.ensure_player_turn()?;
        let heal = self.config.rest_heal_amount;
        let healed = match self.state.actors.get_mut(self.state.player_id) {
            Some(player) if player.health < player.max_health => player.heal(heal),
            Some(_) => return Err(BattleError::FullHealth),
            None => return Err(BattleError::UnknownActor),
        };

        self.log.push(BattleEvent::Rested { actor: self.state.player_id, healed });
        self.stats.rests_used += 1;
        if let Some(trophy) = self.trophies.on_rest_used() {
            self.log.push(BattleEvent::TrophyUnlocked(trophy));
        }
        self.begin_enemy_phase();
        Ok(())
    }

    /// Hands control to the enemy phase regardless of remaining budget.
    /// Dropped silently outside the player turn (a stale or duplicate
    /// request is not an error).
    pub fn force_end_player_turn(&mut self) {
        if self.turn != TurnState::PlayerTurn {
            return;
        }
        self.begin_enemy_phase();
    }

    fn ensure_player_turn(&self) -> Result<(), BattleError> {
        if self.turn != TurnState::PlayerTurn {
            return Err(BattleError::NotPlayerTurn);
        }
        Ok(())
    }
}
