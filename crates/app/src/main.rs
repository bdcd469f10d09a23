use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, Write as _};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use game_core::{
    ActorId, AdvanceStopReason, Battle, BattleConfig, BattleEvent, CellKind, Direction,
    InputJournal, PlayerCommand, Pos, replay_to_end,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive battle on stdin/stdout
    Play {
        #[arg(short, long, default_value_t = 0)]
        seed: u64,
        /// Battle configuration JSON; defaults apply when omitted
        #[arg(short, long)]
        config: Option<String>,
        /// Record accepted inputs to a journal JSON file
        #[arg(short, long)]
        record: Option<String>,
    },
    /// Replay a recorded journal headlessly and print the result
    Replay {
        journal: String,
    },
}

fn main() -> Result<()> {
    match Args::parse().command {
        Command::Play { seed, config, record } => play(seed, config, record),
        Command::Replay { journal } => replay(&journal),
    }
}

fn load_config(path: Option<&str>) -> Result<BattleConfig> {
    let Some(path) = path else {
        return Ok(BattleConfig::default());
    };
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read config: {path}"))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse config: {path}"))
}

fn replay(path: &str) -> Result<()> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read journal: {path}"))?;
    let journal: InputJournal =
        serde_json::from_str(&data).context("failed to deserialize journal JSON")?;

    let result =
        replay_to_end(&journal).map_err(|e| anyhow::anyhow!("replay failed: {e:?}"))?;

    println!("Replay complete.");
    println!("Outcome: {:?}", result.outcome);
    println!("Rounds: {}", result.rounds);
    println!("Snapshot Hash: {}", result.snapshot_hash);
    Ok(())
}

fn play(seed: u64, config_path: Option<String>, record: Option<String>) -> Result<()> {
    let config = load_config(config_path.as_deref())?;
    let mut battle =
        Battle::new(seed, &config).map_err(|e| anyhow::anyhow!("invalid config: {e:?}"))?;
    let mut journal = record.as_ref().map(|_| InputJournal::new(seed, config.clone()));

    // Dead actors leave the arena, so names are cached up front for the log.
    let names: HashMap<ActorId, String> =
        battle.state().actors.iter().map(|(id, actor)| (id, actor.name.clone())).collect();
    let mut seen_events = 0;

    println!("Skirmish (seed {seed}). Type 'help' for commands.");
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        match battle.advance(256).stop_reason {
            AdvanceStopReason::Finished(outcome) => {
                seen_events = drain_events(&battle, &names, seen_events);
                println!("Battle over: {outcome:?} after {} rounds.", battle.round());
                print_summary(&battle);
                break;
            }
            AdvanceStopReason::BudgetExhausted => continue,
            AdvanceStopReason::AwaitingPlayer => {}
        }
        seen_events = drain_events(&battle, &names, seen_events);

        print!("[round {} | {} moves left] > ", battle.round(), battle.moves_remaining());
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let line = line.context("failed to read stdin")?;

        match parse_line(line.trim()) {
            Some(Input::Quit) => break,
            Some(Input::Help) => print_help(),
            Some(Input::Board) => print_board(&battle),
            Some(Input::Command(command)) => {
                if apply(&mut battle, command) {
                    if let Some(journal) = journal.as_mut() {
                        journal.append(command);
                    }
                } else {
                    println!("Rejected: {}", describe_rejection(&battle, command));
                }
            }
            None => println!("Unrecognized input. Type 'help' for commands."),
        }
    }

    if let (Some(path), Some(journal)) = (record, journal) {
        fs::write(&path, serde_json::to_string_pretty(&journal)?)
            .with_context(|| format!("failed to write journal: {path}"))?;
        println!("Journal written to {path}.");
    }
    Ok(())
}

enum Input {
    Command(PlayerCommand),
    Board,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Option<Input> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?;
    let input = match head {
        "n" | "north" => Input::Command(PlayerCommand::Move(Direction::North)),
        "s" | "south" => Input::Command(PlayerCommand::Move(Direction::South)),
        "e" | "east" => Input::Command(PlayerCommand::Move(Direction::East)),
        "w" | "west" => Input::Command(PlayerCommand::Move(Direction::West)),
        "a" | "attack" => {
            let x: i32 = parts.next()?.parse().ok()?;
            let z: i32 = parts.next()?.parse().ok()?;
            Input::Command(PlayerCommand::Attack { target: Pos { x, z } })
        }
        "r" | "rest" => Input::Command(PlayerCommand::Rest),
        "end" => Input::Command(PlayerCommand::EndTurn),
        "b" | "board" => Input::Board,
        "h" | "help" => Input::Help,
        "q" | "quit" => Input::Quit,
        _ => return None,
    };
    if parts.next().is_some() && !matches!(input, Input::Command(PlayerCommand::Attack { .. })) {
        return None;
    }
    Some(input)
}

fn apply(battle: &mut Battle, command: PlayerCommand) -> bool {
    match command {
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
    }
}

fn describe_rejection(battle: &Battle, command: PlayerCommand) -> &'static str {
    match command {
        PlayerCommand::Move(_) if battle.moves_remaining() == 0 => "no moves left this turn",
        PlayerCommand::Move(_) => "that cell is blocked or off the board",
        PlayerCommand::Attack { .. } => "no attackable target there",
        PlayerCommand::Rest => "resting needs missing health",
        PlayerCommand::EndTurn => "not your turn",
    }
}

fn drain_events(battle: &Battle, names: &HashMap<ActorId, String>, seen: usize) -> usize {
    let name = |id: &ActorId| names.get(id).map_or("?", String::as_str);
    for event in &battle.log()[seen..] {
        match event {
            BattleEvent::RoundStarted { round } => println!("-- round {round} --"),
            BattleEvent::TurnStarted { actor } => println!("{} takes a turn.", name(actor)),
            BattleEvent::Moved { actor, to, .. } => {
                println!("{} moves to ({}, {}).", name(actor), to.x, to.z);
            }
            BattleEvent::Attacked { attacker, target, damage } => {
                println!("{} hits {} for {damage}.", name(attacker), name(target));
            }
            BattleEvent::Rested { actor, healed } => {
                println!("{} rests and recovers {healed}.", name(actor));
            }
            BattleEvent::Died { actor } => println!("{} falls.", name(actor)),
            BattleEvent::AttackRangeGrew { min_attack, max_attack } => {
                println!("Your attack grows to {min_attack}-{max_attack}.");
            }
            BattleEvent::TrophyUnlocked(trophy) => println!("Trophy unlocked: {trophy:?}!"),
            BattleEvent::Victory => println!("The field is clear. Victory!"),
            BattleEvent::Defeated => println!("You have fallen."),
        }
    }
    battle.log().len()
}

fn print_board(battle: &Battle) {
    let grid = &battle.state().grid;
    for z in (0..grid.height() as i32).rev() {
        let mut row = String::new();
        for x in 0..grid.width() as i32 {
            let glyph = match grid.cell(x, z).map(|cell| cell.kind) {
                Some(CellKind::Player) => 'P',
                Some(CellKind::Enemy) => 'E',
                Some(CellKind::Boss) => 'B',
                _ => '.',
            };
            row.push(glyph);
            row.push(' ');
        }
        println!("{z:>2} {row}");
    }
    let state = battle.state();
    for actor in state.spawn_order.iter().filter_map(|id| state.actors.get(*id)) {
        println!("  {} at ({}, {}): {}/{} hp", actor.name, actor.pos.x, actor.pos.z,
            actor.health, actor.max_health);
    }
}

fn print_help() {
    println!("  n/s/e/w      move one cell");
    println!("  a <x> <z>    attack the actor on that cell (once per turn)");
    println!("  r            rest (heals, ends your turn)");
    println!("  end          end your turn");
    println!("  b            show the board");
    println!("  q            quit");
}

fn print_summary(battle: &Battle) {
    let stats = battle.stats();
    println!(
        "Turns: {} | Steps: {} | Rests: {} | Kills: {}{}",
        stats.player_turns,
        stats.steps_taken,
        stats.rests_used,
        stats.enemies_killed,
        if stats.boss_killed { " (boss slain)" } else { "" },
    );
    if !battle.trophies().unlocked().is_empty() {
        println!("Trophies: {:?}", battle.trophies().unlocked());
    }
}
