/// Pre-session selection screens: player count and difficulty.
///
/// Both are the same two/three-item picker; the outcome code is the 1-based
/// index of the chosen item (players: 1|2, difficulty: 1=easy 2=medium
/// 3=hard).

use std::io;

use crossterm::style::Color;

use crate::config::GameConfig;
use crate::engine::cooldown::Cooldown;
use crate::screen::{Screen, KEYS_CONFIRM, KEYS_DOWN, KEYS_UP};
use crate::ui::input::InputState;
use crate::ui::renderer::Renderer;

struct Picker {
    title: &'static str,
    items: &'static [&'static str],
    cursor: usize,
    running: bool,
    input_delay: Cooldown,
    selection: Cooldown,
}

impl Picker {
    fn new(config: &GameConfig, title: &'static str, items: &'static [&'static str]) -> Self {
        let mut input_delay = Cooldown::new(config.input_delay_ms);
        input_delay.reset();
        let mut selection = Cooldown::new(config.selection_delay_ms);
        selection.reset();
        Picker { title, items, cursor: 0, running: true, input_delay, selection }
    }

    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()> {
        renderer.begin();
        renderer.text_centered(6, self.title, Color::Yellow);
        renderer.menu(11, self.items, self.cursor);
        renderer.present()?;

        if !self.input_delay.is_finished() {
            return Ok(());
        }
        if self.selection.is_finished() {
            if input.any_down(KEYS_UP) {
                self.cursor = (self.cursor + self.items.len() - 1) % self.items.len();
                self.selection.reset();
            }
            if input.any_down(KEYS_DOWN) {
                self.cursor = (self.cursor + 1) % self.items.len();
                self.selection.reset();
            }
        }
        if input.any_pressed(KEYS_CONFIRM) {
            self.running = false;
        }
        Ok(())
    }

    fn outcome(&self) -> u8 {
        self.cursor as u8 + 1
    }
}

pub struct PlayerSelectScreen {
    picker: Picker,
}

impl PlayerSelectScreen {
    pub fn new(config: &GameConfig) -> Self {
        PlayerSelectScreen {
            picker: Picker::new(config, "HOW MANY PILOTS?", &["1 player", "2 players"]),
        }
    }
}

impl Screen for PlayerSelectScreen {
    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()> {
        self.picker.update(input, renderer)
    }

    fn is_running(&self) -> bool {
        self.picker.running
    }

    fn outcome(&self) -> u8 {
        self.picker.outcome()
    }

    fn name(&self) -> &'static str {
        "player select"
    }
}

pub struct DifficultySelectScreen {
    picker: Picker,
}

impl DifficultySelectScreen {
    pub fn new(config: &GameConfig) -> Self {
        DifficultySelectScreen {
            picker: Picker::new(config, "SELECT DIFFICULTY", &["Easy", "Medium", "Hard"]),
        }
    }
}

impl Screen for DifficultySelectScreen {
    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()> {
        self.picker.update(input, renderer)
    }

    fn is_running(&self) -> bool {
        self.picker.running
    }

    fn outcome(&self) -> u8 {
        self.picker.outcome()
    }

    fn name(&self) -> &'static str {
        "difficulty select"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picker_outcome_is_one_based_cursor() {
        let config = GameConfig::default();
        let mut screen = DifficultySelectScreen::new(&config);
        assert_eq!(screen.outcome(), 1);
        screen.picker.cursor = 2;
        assert_eq!(screen.outcome(), 3);
    }

    #[test]
    fn player_select_offers_exactly_two_codes() {
        let config = GameConfig::default();
        let mut screen = PlayerSelectScreen::new(&config);
        screen.picker.cursor = 1;
        assert_eq!(screen.outcome(), 2);
    }
}
