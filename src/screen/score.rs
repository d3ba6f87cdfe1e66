/// Post-campaign score summary for one player.
///
/// Shows the final stats; when the score qualifies for the high-score table
/// the player picks three initials before confirming. The orchestrator reads
/// `entry()` afterwards and commits it to the store. An aborted screen never
/// yields an entry.

use std::io;

use crossterm::style::Color;

use crate::config::GameConfig;
use crate::engine::cooldown::Cooldown;
use crate::engine::state::{GameState, PlayerSlot};
use crate::scores::ScoreRecord;
use crate::screen::{Screen, KEYS_CONFIRM, KEYS_DOWN, KEYS_LEFT, KEYS_RIGHT, KEYS_UP};
use crate::ui::input::InputState;
use crate::ui::renderer::Renderer;

const NAME_LEN: usize = 3;

pub struct ScoreScreen {
    state: GameState,
    slot: PlayerSlot,
    qualifies: bool,
    name: [char; NAME_LEN],
    cursor: usize,
    confirmed: bool,
    running: bool,
    input_delay: Cooldown,
    selection: Cooldown,
}

impl ScoreScreen {
    pub fn new(state: GameState, slot: PlayerSlot, qualifies: bool, config: &GameConfig) -> Self {
        let mut input_delay = Cooldown::new(config.input_delay_ms);
        input_delay.reset();
        let mut selection = Cooldown::new(config.selection_delay_ms);
        selection.reset();
        ScoreScreen {
            state,
            slot,
            qualifies,
            name: ['A'; NAME_LEN],
            cursor: 0,
            confirmed: false,
            running: true,
            input_delay,
            selection,
        }
    }

    /// The record to persist, present only for a qualifying score that was
    /// actually confirmed.
    pub fn entry(&self) -> Option<ScoreRecord> {
        (self.qualifies && self.confirmed).then(|| ScoreRecord {
            name: self.name.iter().collect(),
            score: self.state.score.get(self.slot),
        })
    }

    fn cycle_letter(&mut self, forward: bool) {
        let letter = &mut self.name[self.cursor];
        let pos = (*letter as u8) - b'A';
        let next = if forward { (pos + 1) % 26 } else { (pos + 25) % 26 };
        *letter = (b'A' + next) as char;
    }
}

impl Screen for ScoreScreen {
    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()> {
        let title = match self.slot {
            PlayerSlot::One => "PLAYER 1 RESULTS",
            PlayerSlot::Two => "PLAYER 2 RESULTS",
        };
        renderer.begin();
        renderer.text_centered(4, title, Color::Yellow);
        let stats = [
            format!("score        {:>6}", self.state.score.get(self.slot)),
            format!("lives left   {:>6}", self.state.lives.get(self.slot)),
            format!("shots fired  {:>6}", self.state.bullets_shot.get(self.slot)),
            format!("ships downed {:>6}", self.state.ships_destroyed.get(self.slot)),
            format!("level        {:>6}", self.state.level),
        ];
        for (i, line) in stats.iter().enumerate() {
            renderer.text_centered(7 + i as i32, line, Color::Grey);
        }
        if self.qualifies {
            renderer.text_centered(15, "NEW HIGH SCORE", Color::Green);
            let initials: String = self
                .name
                .iter()
                .enumerate()
                .map(|(i, ch)| if i == self.cursor { ch.to_ascii_lowercase() } else { *ch })
                .collect();
            renderer.text_centered(17, &initials, Color::White);
            renderer.text_centered(19, "arrows pick initials, space confirms", Color::DarkGrey);
        } else {
            renderer.text_centered(17, "space to continue", Color::DarkGrey);
        }
        renderer.present()?;

        if !self.input_delay.is_finished() {
            return Ok(());
        }
        if self.qualifies && self.selection.is_finished() {
            if input.any_down(KEYS_LEFT) {
                self.cursor = (self.cursor + NAME_LEN - 1) % NAME_LEN;
                self.selection.reset();
            }
            if input.any_down(KEYS_RIGHT) {
                self.cursor = (self.cursor + 1) % NAME_LEN;
                self.selection.reset();
            }
            if input.any_down(KEYS_UP) {
                self.cycle_letter(true);
                self.selection.reset();
            }
            if input.any_down(KEYS_DOWN) {
                self.cycle_letter(false);
                self.selection.reset();
            }
        }
        if input.any_pressed(KEYS_CONFIRM) {
            self.confirmed = true;
            self.running = false;
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn outcome(&self) -> u8 {
        1
    }

    fn name(&self) -> &'static str {
        match self.slot {
            PlayerSlot::One => "score",
            PlayerSlot::Two => "player 2 score",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::{PlayerCount, PlayerPair};

    fn state_with_scores(p1: u32, p2: u32) -> GameState {
        let mut state = GameState::new_session(PlayerCount::Two);
        state.score = PlayerPair::new(p1, p2);
        state
    }

    #[test]
    fn no_entry_without_qualification() {
        let config = GameConfig::default();
        let mut screen =
            ScoreScreen::new(state_with_scores(100, 0), PlayerSlot::One, false, &config);
        screen.confirmed = true;
        assert!(screen.entry().is_none());
    }

    #[test]
    fn no_entry_without_confirmation() {
        let config = GameConfig::default();
        let screen = ScoreScreen::new(state_with_scores(100, 0), PlayerSlot::One, true, &config);
        assert!(screen.entry().is_none());
    }

    #[test]
    fn entry_carries_initials_and_slot_score() {
        let config = GameConfig::default();
        let mut screen =
            ScoreScreen::new(state_with_scores(100, 250), PlayerSlot::Two, true, &config);
        screen.cycle_letter(true);
        screen.cursor = 2;
        screen.cycle_letter(false);
        screen.confirmed = true;
        let entry = screen.entry().unwrap();
        assert_eq!(entry.name, "BAZ");
        assert_eq!(entry.score, 250);
    }

    #[test]
    fn letters_wrap_around_the_alphabet() {
        let config = GameConfig::default();
        let mut screen =
            ScoreScreen::new(state_with_scores(10, 0), PlayerSlot::One, true, &config);
        screen.cycle_letter(false);
        assert_eq!(screen.name[0], 'Z');
        screen.cycle_letter(true);
        assert_eq!(screen.name[0], 'A');
    }
}
