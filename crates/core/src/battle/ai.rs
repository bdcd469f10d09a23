//! Shared enemy/boss decision policy: attack when 4-adjacent to the player,
//! otherwise chase one greedy step along the larger-delta axis.

use super::*;
use crate::battle::combat::adjacent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum AiStep {
    Attacked,
    Moved,
    TurnOver,
}

impl Battle {
    /// Executes one atomic action for `ai` and reports how the turn should
    /// proceed. Damage and death are fully applied before returning, so the
    /// orchestrator always sequences against consistent state. A missing or
    /// dead actor (killed out of band mid-turn) completes trivially instead
    /// of stalling the phase.
    pub(super) fn ai_take_action(&mut self, ai: &mut AiTurn) -> AiStep {
        let Some(actor) = self.state.actors.get(ai.actor) else {
            return AiStep::TurnOver;
        };
        if !actor.is_alive() {
            return AiStep::TurnOver;
        }
        let my_pos = actor.pos;
        let Some(player) = self.state.actors.get(self.state.player_id) else {
            return AiStep::TurnOver;
        };
        let player_pos = player.pos;

        if adjacent(my_pos, player_pos) {
            if ai.attacked {
                return AiStep::TurnOver;
            }
            ai.attacked = true;
            self.resolve_attack(ai.actor, self.state.player_id);
            return AiStep::Attacked;
        }

        if ai.moves_remaining == 0 {
            return AiStep::TurnOver;
        }
        let Some(dir) = greedy_step(my_pos, player_pos) else {
            return AiStep::TurnOver;
        };
        let dest = my_pos.step(dir);
        if !self.state.grid.is_free(dest.x, dest.z) {
            // A blocked or invalid destination ends the turn outright.
            // TODO: revisit whether this should only consume the one move
            // when tuning enemy pressure on crowded boards.
            return AiStep::TurnOver;
        }

        self.move_actor(ai.actor, dest);
        ai.moves_remaining -= 1;
        AiStep::Moved
    }
}

/// One chase step toward `to`: the larger-|Δ| axis wins, ties go to z.
fn greedy_step(from: Pos, to: Pos) -> Option<Direction> {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx.abs() > dz.abs() {
        Some(if dx > 0 { Direction::East } else { Direction::West })
    } else if dz != 0 {
        Some(if dz > 0 { Direction::North } else { Direction::South })
    } else {
        None
    }
}
