//! Combat resolution: adjacency, damage rolls, death and the terminal
//! victory/defeat checks. Damage and death are always fully applied before
//! any turn-completion decision is taken.

use rand_chacha::rand_core::Rng;

use super::*;

/// 4-directional adjacency: exactly one grid step along a single axis.
/// Excludes diagonals and self.
pub(crate) fn adjacent(a: Pos, b: Pos) -> bool {
    (a.x - b.x).abs() + (a.z - b.z).abs() == 1
}

/// Uniform inclusive roll in `[min, max]`. Bounds are validated at setup.
fn roll_damage(rng: &mut ChaCha8Rng, min: i32, max: i32) -> i32 {
    let span = (max - min) as u64 + 1;
    min + (rng.next_u64() % span) as i32
}

impl Battle {
    pub(super) fn resolve_attack(&mut self, attacker: ActorId, target: ActorId) {
        let Some(bounds) =
            self.state.actors.get(attacker).map(|actor| (actor.min_attack, actor.max_attack))
        else {
            return;
        };
        let damage = roll_damage(&mut self.rng, bounds.0, bounds.1);
        self.log.push(BattleEvent::Attacked { attacker, target, damage });

        let died = match self.state.actors.get_mut(target) {
            Some(victim) => victim.take_damage(damage),
            None => return,
        };
        if died {
            self.handle_death(target);
        }
    }

    /// Removes a dead actor: vacate its cell, drop it from the arena (the
    /// spawn-order entry goes stale and is skipped at dispatch sites), then
    /// notify kill observers and re-evaluate the terminal conditions.
    pub(super) fn handle_death(&mut self, victim: ActorId) {
        let Some(actor) = self.state.actors.remove(victim) else {
            return;
        };
        self.state.grid.set_occupied(actor.pos.x, actor.pos.z, false, CellKind::Empty);
        self.log.push(BattleEvent::Died { actor: victim });

        match actor.kind {
            ActorKind::Player => {
                self.outcome = Some(RunOutcome::Defeat);
                self.log.push(BattleEvent::Defeated);
                self.turn = TurnState::Idle;
            }
            ActorKind::Enemy | ActorKind::Boss => {
                self.stats.enemies_killed += 1;
                if actor.kind == ActorKind::Boss {
                    self.stats.boss_killed = true;
                    if let Some(trophy) = self.trophies.on_boss_killed() {
                        self.log.push(BattleEvent::TrophyUnlocked(trophy));
                    }
                }
                for trophy in self.trophies.on_enemy_killed() {
                    self.log.push(BattleEvent::TrophyUnlocked(trophy));
                }
                self.grow_player_attack();
                self.check_victory();
            }
        }
    }

    fn grow_player_attack(&mut self) {
        let growth = self.config.attack_growth_per_kill;
        if growth == 0 {
            return;
        }
        if let Some(player) = self.state.actors.get_mut(self.state.player_id) {
            player.min_attack += growth;
            player.max_attack += growth;
            self.log.push(BattleEvent::AttackRangeGrew {
                min_attack: player.min_attack,
                max_attack: player.max_attack,
            });
        }
    }

    /// Emits the victory event at most once, when the last hostile falls.
    pub(super) fn check_victory(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        if self.state.living_hostiles() == 0 {
            self.outcome = Some(RunOutcome::Victory);
            self.log.push(BattleEvent::Victory);
            if let Some(trophy) = self.trophies.on_victory() {
                self.log.push(BattleEvent::TrophyUnlocked(trophy));
            }
            self.turn = TurnState::Idle;
        }
    }
}
