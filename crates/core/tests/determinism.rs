use core::{
    AdvanceStopReason, Battle, BattleConfig, Direction, InputJournal, PlayerCommand, Pos,
    replay_to_end,
};

fn nearest_hostile_step(battle: &Battle) -> Option<Direction> {
    let state = battle.state();
    let player = state.actors.get(state.player_id)?;
    let target = state
        .actors
        .values()
        .filter(|actor| actor.kind != core::ActorKind::Player)
        .min_by_key(|actor| {
            let d = (actor.pos.x - player.pos.x).abs() + (actor.pos.z - player.pos.z).abs();
            (d, actor.pos.z, actor.pos.x)
        })?;
    let dx = target.pos.x - player.pos.x;
    let dz = target.pos.z - player.pos.z;
    if dx.abs() > dz.abs() {
        Some(if dx > 0 { Direction::East } else { Direction::West })
    } else if dz != 0 {
        Some(if dz > 0 { Direction::North } else { Direction::South })
    } else {
        None
    }
}

/// Deterministic scripted player: attack an adjacent hostile, otherwise walk
/// toward the nearest one, otherwise pass. Records every applied command.
fn run_scripted(seed: u64, config: &BattleConfig) -> (InputJournal, Battle) {
    let mut battle = Battle::new(seed, config).expect("config");
    let mut journal = InputJournal::new(seed, config.clone());

    for _ in 0..4000 {
        match battle.advance(64).stop_reason {
            AdvanceStopReason::Finished(_) => break,
            AdvanceStopReason::AwaitingPlayer => {
                if let Some(target) = battle.adjacent_targets().first().copied() {
                    let pos = battle.state().actors[target].pos;
                    if battle.player_attack(target).is_ok() {
                        journal.append(PlayerCommand::Attack { target: pos });
                        continue;
                    }
                }
                if battle.moves_remaining() > 0
                    && let Some(dir) = nearest_hostile_step(&battle)
                    && battle.player_move(dir).is_ok()
                {
                    journal.append(PlayerCommand::Move(dir));
                    continue;
                }
                battle.force_end_player_turn();
                journal.append(PlayerCommand::EndTurn);
            }
            AdvanceStopReason::BudgetExhausted => {}
        }
    }

    (journal, battle)
}

fn skirmish_config() -> BattleConfig {
    BattleConfig {
        enemy_spawns: vec![Pos { x: 2, z: 6 }, Pos { x: 8, z: 6 }],
        boss_spawn: None,
        ..BattleConfig::default()
    }
}

#[test]
fn identical_seeds_produce_identical_runs() {
    let config = skirmish_config();
    let (journal_a, battle_a) = run_scripted(12345, &config);
    let (journal_b, battle_b) = run_scripted(12345, &config);

    assert_eq!(journal_a, journal_b, "the scripted player saw identical battles");
    assert_eq!(battle_a.snapshot_hash(), battle_b.snapshot_hash());
    assert_eq!(battle_a.log(), battle_b.log());
}

#[test]
fn different_seeds_diverge() {
    let config = skirmish_config();
    let (_, battle_a) = run_scripted(123, &config);
    let (_, battle_b) = run_scripted(456, &config);
    assert_ne!(battle_a.snapshot_hash(), battle_b.snapshot_hash());
}

#[test]
fn replaying_a_recorded_journal_matches_the_live_run() {
    let config = skirmish_config();
    let (journal, battle) = run_scripted(777, &config);
    let outcome = battle.outcome().expect("scripted run finishes");

    let result = replay_to_end(&journal).expect("replay");
    assert_eq!(result.snapshot_hash, battle.snapshot_hash());
    assert_eq!(result.outcome, outcome);
    assert_eq!(result.rounds, battle.round());
}

#[test]
fn journals_survive_a_trip_through_disk() {
    let config = skirmish_config();
    let (journal, battle) = run_scripted(2024, &config);

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("journal.json");
    std::fs::write(&path, serde_json::to_string_pretty(&journal).expect("serialize"))
        .expect("write");

    let loaded: InputJournal =
        serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(loaded, journal);

    let result = replay_to_end(&loaded).expect("replay");
    assert_eq!(result.snapshot_hash, battle.snapshot_hash());
}
