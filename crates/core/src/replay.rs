//! Headless journal playback for determinism checks: rebuild the battle from
//! the journal and feed it the recorded inputs until it finishes.

use crate::battle::Battle;
use crate::config::ConfigError;
use crate::journal::InputJournal;
use crate::types::{AdvanceStopReason, PlayerCommand, RunOutcome};

#[derive(Debug, PartialEq)]
pub enum ReplayError {
    InvalidConfig(ConfigError),
    /// The battle still awaits input but the journal is exhausted.
    MissingInput,
    /// A recorded command was rejected; the journal does not match this
    /// build or was tampered with.
    RejectedCommand { seq: u64 },
}

#[derive(Debug, PartialEq)]
pub struct ReplayResult {
    pub outcome: RunOutcome,
    pub snapshot_hash: u64,
    pub rounds: u64,
}

pub fn replay_to_end(journal: &InputJournal) -> Result<ReplayResult, ReplayError> {
    let mut battle =
        Battle::new(journal.seed, &journal.config).map_err(ReplayError::InvalidConfig)?;
    let mut inputs = journal.inputs.iter();

    loop {
        let result = battle.advance(64);
        match result.stop_reason {
            AdvanceStopReason::Finished(outcome) => {
                return Ok(ReplayResult {
                    outcome,
                    snapshot_hash: battle.snapshot_hash(),
                    rounds: battle.round(),
                });
            }
            AdvanceStopReason::AwaitingPlayer => {
                let Some(record) = inputs.next() else {
                    return Err(ReplayError::MissingInput);
                };
                let applied = match record.command {
                    PlayerCommand::Move(dir) => battle.player_move(dir).is_ok(),
                    PlayerCommand::Attack { target } => battle
                        .state()
                        .occupant_at(target)
                        .is_some_and(|id| battle.player_attack(id).is_ok()),
                    PlayerCommand::Rest => battle.player_rest().is_ok(),
                    PlayerCommand::EndTurn => {
                        battle.force_end_player_turn();
                        true
                    }
                };
                if !applied {
                    return Err(ReplayError::RejectedCommand { seq: record.seq });
                }
            }
            AdvanceStopReason::BudgetExhausted => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BattleConfig;
    use crate::types::{Direction, Pos};

    fn lone_enemy_config() -> BattleConfig {
        BattleConfig {
            enemy_spawns: vec![Pos { x: 5, z: 3 }],
            boss_spawn: None,
            ..BattleConfig::default()
        }
    }

    /// Walk forward and trade blows until the lone enemy dies.
    fn record_aggressive_run(seed: u64) -> (InputJournal, u64) {
        let config = lone_enemy_config();
        let mut battle = Battle::new(seed, &config).expect("config");
        let mut journal = InputJournal::new(seed, config);

        for _ in 0..64 {
            match battle.advance(64).stop_reason {
                AdvanceStopReason::Finished(_) => break,
                AdvanceStopReason::AwaitingPlayer => {
                    if let Some(target) = battle.adjacent_targets().first().copied() {
                        let pos = battle.state().actors[target].pos;
                        battle.player_attack(target).expect("attack");
                        journal.append(PlayerCommand::Attack { target: pos });
                        if battle.outcome().is_some() {
                            break;
                        }
                        battle.force_end_player_turn();
                        journal.append(PlayerCommand::EndTurn);
                    } else if battle.player_move(Direction::North).is_ok() {
                        journal.append(PlayerCommand::Move(Direction::North));
                    } else {
                        battle.force_end_player_turn();
                        journal.append(PlayerCommand::EndTurn);
                    }
                }
                AdvanceStopReason::BudgetExhausted => {}
            }
        }

        (journal, battle.snapshot_hash())
    }

    #[test]
    fn replay_reproduces_the_recorded_run() {
        let (journal, live_hash) = record_aggressive_run(321);
        let result = replay_to_end(&journal).expect("replay");
        assert_eq!(result.snapshot_hash, live_hash);
        assert_eq!(result.outcome, RunOutcome::Victory);
    }

    #[test]
    fn exhausted_journal_is_reported_not_looped() {
        let config = lone_enemy_config();
        let journal = InputJournal::new(5, config);
        assert_eq!(replay_to_end(&journal), Err(ReplayError::MissingInput));
    }

    #[test]
    fn invalid_journal_config_fails_at_setup() {
        let mut config = lone_enemy_config();
        config.enemy_stats.min_attack = 99;
        let journal = InputJournal::new(5, config);
        assert!(matches!(replay_to_end(&journal), Err(ReplayError::InvalidConfig(_))));
    }
}
