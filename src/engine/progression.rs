/// Difficulty tables and campaign progression rules.
///
/// Three tiers, seven levels each. Values are design-tuned constants:
/// within a tier the formation grows and the enemy fire-interval floor
/// shrinks as levels go up, and kills are worth more.

use crate::engine::state::GameState;

/// Lives a player starts with, and the cap for bonus lives.
pub const MAX_LIVES: u32 = 3;
/// A bonus life is considered every this many levels.
pub const EXTRA_LIFE_FREQUENCY: u32 = 3;
/// Levels in a campaign.
pub const NUM_LEVELS: u32 = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Per-level tuning, one instance per (tier, level) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSettings {
    /// Enemy formation rows.
    pub formation_rows: u32,
    /// Enemy formation columns.
    pub formation_columns: u32,
    /// Floor of the enemy fire interval; jitter is applied on top.
    pub base_shot_interval_ms: u64,
    /// Score awarded per destroyed enemy.
    pub points_per_kill: u32,
}

const fn gs(rows: u32, cols: u32, interval: u64, points: u32) -> GameSettings {
    GameSettings {
        formation_rows: rows,
        formation_columns: cols,
        base_shot_interval_ms: interval,
        points_per_kill: points,
    }
}

const EASY: [GameSettings; NUM_LEVELS as usize] = [
    gs(3, 3, 3000, 10),
    gs(3, 4, 2800, 15),
    gs(4, 4, 2600, 20),
    gs(4, 5, 2400, 25),
    gs(5, 5, 2200, 30),
    gs(6, 6, 2000, 35),
    gs(6, 6, 1800, 40),
];

const MEDIUM: [GameSettings; NUM_LEVELS as usize] = [
    gs(4, 4, 2500, 15),
    gs(5, 4, 2300, 20),
    gs(5, 5, 2100, 25),
    gs(6, 5, 1900, 30),
    gs(6, 6, 1700, 40),
    gs(7, 6, 1500, 50),
    gs(8, 7, 1300, 55),
];

const HARD: [GameSettings; NUM_LEVELS as usize] = [
    gs(4, 5, 2000, 20),
    gs(4, 6, 1800, 30),
    gs(5, 6, 1600, 40),
    gs(6, 6, 1400, 50),
    gs(6, 7, 1200, 60),
    gs(7, 7, 1100, 70),
    gs(8, 7, 1000, 80),
];

/// The ordered settings sequence for a tier, level 1 first.
pub fn settings(tier: Difficulty) -> &'static [GameSettings; NUM_LEVELS as usize] {
    match tier {
        Difficulty::Easy => &EASY,
        Difficulty::Medium => &MEDIUM,
        Difficulty::Hard => &HARD,
    }
}

/// Bonus-life rule: one extra life every `EXTRA_LIFE_FREQUENCY` levels,
/// only while below `MAX_LIVES`.
///
/// The check reads player 1's life count even in 2-player sessions.
pub fn bonus_life(state: &GameState) -> bool {
    state.level % EXTRA_LIFE_FREQUENCY == 0 && state.lives.p1 < MAX_LIVES
}
