//! The phase state machine: Player → Enemies → Boss → Player. The pump runs
//! exactly one atomic AI action per step and suspends whenever the player
//! phase needs external input.

use super::*;
use crate::battle::ai::AiStep;

impl Battle {
    /// Drives AI phases forward by at most `max_steps` atomic actions.
    /// Returns immediately once the battle awaits player input or has a
    /// terminal outcome.
    pub fn advance(&mut self, max_steps: u32) -> AdvanceResult {
        let mut steps = 0;
        let stop_reason = loop {
            if let Some(outcome) = self.outcome {
                break AdvanceStopReason::Finished(outcome);
            }
            if steps >= max_steps {
                break AdvanceStopReason::BudgetExhausted;
            }
            match self.turn {
                TurnState::PlayerTurn | TurnState::Idle => {
                    break AdvanceStopReason::AwaitingPlayer;
                }
                TurnState::EnemyTurn => {
                    self.step_enemy_phase();
                    steps += 1;
                }
                TurnState::BossTurn => {
                    self.step_boss_turn();
                    steps += 1;
                }
            }
        };
        AdvanceResult { simulated_steps: steps, stop_reason }
    }

    pub(super) fn begin_player_turn(&mut self) {
        if self.outcome.is_some() {
            self.turn = TurnState::Idle;
            return;
        }
        self.round += 1;
        self.turn = TurnState::PlayerTurn;
        self.player_moves_remaining = self.config.player_moves_per_turn;
        self.player_attacked_this_turn = false;
        self.stats.player_turns += 1;
        self.log.push(BattleEvent::RoundStarted { round: self.round });
        self.log.push(BattleEvent::TurnStarted { actor: self.state.player_id });
    }

    /// Snapshots the living enemies once, in spawn order. Enemies that die
    /// after the snapshot are skipped at dispatch time, never re-queued.
    pub(super) fn begin_enemy_phase(&mut self) {
        if self.outcome.is_some() {
            self.turn = TurnState::Idle;
            return;
        }
        let order: Vec<ActorId> = self
            .state
            .spawn_order
            .iter()
            .copied()
            .filter(|id| {
                self.state
                    .actors
                    .get(*id)
                    .is_some_and(|actor| actor.kind == ActorKind::Enemy && actor.is_alive())
            })
            .collect();
        if order.is_empty() {
            self.begin_boss_turn();
            return;
        }
        self.turn = TurnState::EnemyTurn;
        self.enemy_phase = Some(EnemyPhase { order, index: 0, current: None });
    }

    pub(super) fn begin_boss_turn(&mut self) {
        self.enemy_phase = None;
        if self.outcome.is_some() {
            self.turn = TurnState::Idle;
            return;
        }
        let Some(boss_id) = self.state.boss_id else {
            self.begin_player_turn();
            return;
        };
        if !self.state.actors.get(boss_id).is_some_and(|boss| boss.is_alive()) {
            self.begin_player_turn();
            return;
        }
        self.turn = TurnState::BossTurn;
        self.log.push(BattleEvent::TurnStarted { actor: boss_id });
    }

    /// One pump step of the enemy phase: either executes one action of the
    /// in-flight turn, or dispatches the next living enemy from the snapshot
    /// and executes its first action. Dead or missing entries are skipped
    /// for free so a mid-phase death can never stall the phase.
    fn step_enemy_phase(&mut self) {
        loop {
            let in_flight = match self.enemy_phase.as_mut() {
                Some(phase) => phase.current.take(),
                None => {
                    self.begin_boss_turn();
                    return;
                }
            };

            if let Some(mut ai) = in_flight {
                let step = self.ai_take_action(&mut ai);
                if step == AiStep::Moved && ai.moves_remaining > 0 && !ai.attacked {
                    if let Some(phase) = self.enemy_phase.as_mut() {
                        phase.current = Some(ai);
                    }
                }
                return;
            }

            let next = match self.enemy_phase.as_mut() {
                Some(phase) if phase.index < phase.order.len() => {
                    let id = phase.order[phase.index];
                    phase.index += 1;
                    Some(id)
                }
                _ => None,
            };

            let Some(id) = next else {
                self.begin_boss_turn();
                return;
            };
            if !self.state.actors.get(id).is_some_and(|actor| actor.is_alive()) {
                continue;
            }
            self.log.push(BattleEvent::TurnStarted { actor: id });
            let budget = self.config.enemy_moves_per_turn;
            if let Some(phase) = self.enemy_phase.as_mut() {
                phase.current = Some(AiTurn { actor: id, moves_remaining: budget, attacked: false });
            }
        }
    }

    /// The boss turn is a single action through the shared machine with a
    /// zero move budget: attack if adjacent, otherwise pass. Completion
    /// always hands control back to the player.
    fn step_boss_turn(&mut self) {
        if let Some(boss_id) = self.state.boss_id {
            let mut ai = AiTurn { actor: boss_id, moves_remaining: 0, attacked: false };
            self.ai_take_action(&mut ai);
        }
        self.begin_player_turn();
    }
}
