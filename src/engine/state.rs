/// Cross-level session state.
///
/// `GameState` is a value-semantic snapshot: a level screen receives one by
/// value, accumulates into its own copy while it runs, and hands back the
/// result when its loop exits. The campaign loop then derives the next
/// snapshot with `advance_level()`. Nothing is ever mutated across a screen
/// handoff, so the progression is race-free by construction.

use crate::engine::progression::MAX_LIVES;

/// One value per player. The second slot is unused (zero) in 1-player games.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlayerPair {
    pub p1: u32,
    pub p2: u32,
}

impl PlayerPair {
    pub fn new(p1: u32, p2: u32) -> Self {
        PlayerPair { p1, p2 }
    }

    pub fn get(&self, slot: PlayerSlot) -> u32 {
        match slot {
            PlayerSlot::One => self.p1,
            PlayerSlot::Two => self.p2,
        }
    }

    pub fn add(&mut self, slot: PlayerSlot, amount: u32) {
        match slot {
            PlayerSlot::One => self.p1 += amount,
            PlayerSlot::Two => self.p2 += amount,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerCount {
    One,
    Two,
}

/// Identifies one of the two player positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerSlot {
    One,
    Two,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    /// Current level, 1-based.
    pub level: u32,
    pub score: PlayerPair,
    pub lives: PlayerPair,
    pub bullets_shot: PlayerPair,
    pub ships_destroyed: PlayerPair,
    pub players: PlayerCount,
}

impl GameState {
    /// Fresh session at level 1. Only active players get lives.
    pub fn new_session(players: PlayerCount) -> Self {
        let lives = match players {
            PlayerCount::One => PlayerPair::new(MAX_LIVES, 0),
            PlayerCount::Two => PlayerPair::new(MAX_LIVES, MAX_LIVES),
        };
        GameState {
            level: 1,
            score: PlayerPair::default(),
            lives,
            bullets_shot: PlayerPair::default(),
            ships_destroyed: PlayerPair::default(),
            players,
        }
    }

    /// Next-level snapshot: level bumped, everything else carried forward.
    pub fn advance_level(&self) -> Self {
        GameState { level: self.level + 1, ..*self }
    }

    /// Session-continuation condition. In 2-player games the session runs
    /// while either player still has lives.
    pub fn has_lives(&self) -> bool {
        match self.players {
            PlayerCount::One => self.lives.p1 > 0,
            PlayerCount::Two => self.lives.p1 > 0 || self.lives.p2 > 0,
        }
    }
}
