use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ActorId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub z: i32,
}

impl Pos {
    pub fn step(self, dir: Direction) -> Pos {
        let (dx, dz) = dir.delta();
        Pos { x: self.x + dx, z: self.z + dz }
    }
}

/// Four-way movement. North/South run along the z axis, East/West along x.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, 1),
            Direction::South => (0, -1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorKind {
    Player,
    Enemy,
    Boss,
}

impl ActorKind {
    pub fn cell_kind(self) -> CellKind {
        match self {
            ActorKind::Player => CellKind::Player,
            ActorKind::Enemy => CellKind::Enemy,
            ActorKind::Boss => CellKind::Boss,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    #[default]
    Empty,
    Player,
    Enemy,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnState {
    PlayerTurn,
    EnemyTurn,
    BossTurn,
    /// Terminal: an outcome has been reached and no further turns dispatch.
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Victory,
    Defeat,
}

/// Rejected player requests. None of these mutate battle state; the turn
/// stays open and the caller may issue another command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleError {
    NotPlayerTurn,
    NoMovesRemaining,
    BlockedMove,
    NotAdjacent,
    AlreadyAttacked,
    FullHealth,
    UnknownActor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleEvent {
    RoundStarted { round: u64 },
    TurnStarted { actor: ActorId },
    Moved { actor: ActorId, from: Pos, to: Pos },
    Attacked { attacker: ActorId, target: ActorId, damage: i32 },
    Rested { actor: ActorId, healed: i32 },
    Died { actor: ActorId },
    AttackRangeGrew { min_attack: i32, max_attack: i32 },
    TrophyUnlocked(crate::stats::Trophy),
    Victory,
    Defeated,
}

/// One journaled player input. Attack targets are recorded by board
/// position so journals stay stable across arena key allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerCommand {
    Move(Direction),
    Attack { target: Pos },
    Rest,
    EndTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    /// The battle is in the player phase and needs an external command.
    AwaitingPlayer,
    Finished(RunOutcome),
    BudgetExhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdvanceResult {
    pub simulated_steps: u32,
    pub stop_reason: AdvanceStopReason,
}
