//! Per-run counters and latched session trophies. Plain values owned by the
//! battle; observers read them after the fact. Trophy submission to any
//! external service is out of scope.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub player_turns: u64,
    pub steps_taken: u64,
    pub rests_used: u64,
    pub enemies_killed: u32,
    pub boss_killed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trophy {
    FirstBlood,
    /// Three kills in one session.
    Exterminator,
    GiantSlayer,
    WellRested,
    Flawless,
}

#[derive(Clone, Debug, Default)]
pub struct TrophyCase {
    kills: u32,
    unlocked: Vec<Trophy>,
}

impl TrophyCase {
    pub fn unlocked(&self) -> &[Trophy] {
        &self.unlocked
    }

    pub fn on_enemy_killed(&mut self) -> Vec<Trophy> {
        self.kills += 1;
        let mut fresh = Vec::new();
        if self.kills == 1 {
            fresh.extend(self.unlock(Trophy::FirstBlood));
        }
        if self.kills >= 3 {
            fresh.extend(self.unlock(Trophy::Exterminator));
        }
        fresh
    }

    pub fn on_boss_killed(&mut self) -> Option<Trophy> {
        self.unlock(Trophy::GiantSlayer)
    }

    pub fn on_rest_used(&mut self) -> Option<Trophy> {
        self.unlock(Trophy::WellRested)
    }

    pub fn on_victory(&mut self) -> Option<Trophy> {
        self.unlock(Trophy::Flawless)
    }

    fn unlock(&mut self, trophy: Trophy) -> Option<Trophy> {
        if self.unlocked.contains(&trophy) {
            return None;
        }
        self.unlocked.push(trophy);
        Some(trophy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_and_third_kill_unlock_their_trophies_once() {
        let mut case = TrophyCase::default();
        assert_eq!(case.on_enemy_killed(), vec![Trophy::FirstBlood]);
        assert_eq!(case.on_enemy_killed(), vec![]);
        assert_eq!(case.on_enemy_killed(), vec![Trophy::Exterminator]);
        assert_eq!(case.on_enemy_killed(), vec![]);
    }

    #[test]
    fn latched_trophies_never_unlock_twice() {
        let mut case = TrophyCase::default();
        assert_eq!(case.on_rest_used(), Some(Trophy::WellRested));
        assert_eq!(case.on_rest_used(), None);
        assert_eq!(case.on_boss_killed(), Some(Trophy::GiantSlayer));
        assert_eq!(case.on_boss_killed(), None);
        assert_eq!(case.on_victory(), Some(Trophy::Flawless));
        assert_eq!(case.on_victory(), None);
        assert_eq!(case.unlocked().len(), 3);
    }
}
