/// Main menu.
///
/// Outcome codes: 1 = play, 4 = high scores, 3 = reset scores, 0 = exit.

use std::io;

use crossterm::style::Color;

use crate::config::GameConfig;
use crate::engine::cooldown::Cooldown;
use crate::screen::{Screen, KEYS_CONFIRM, KEYS_DOWN, KEYS_UP};
use crate::ui::input::InputState;
use crate::ui::renderer::Renderer;

const ITEMS: &[(&str, u8)] = &[
    ("Play", 1),
    ("High scores", 4),
    ("Reset scores", 3),
    ("Exit", 0),
];

pub struct TitleScreen {
    cursor: usize,
    running: bool,
    input_delay: Cooldown,
    selection: Cooldown,
}

impl TitleScreen {
    pub fn new(config: &GameConfig) -> Self {
        let mut input_delay = Cooldown::new(config.input_delay_ms);
        input_delay.reset();
        let mut selection = Cooldown::new(config.selection_delay_ms);
        selection.reset();
        TitleScreen { cursor: 0, running: true, input_delay, selection }
    }
}

impl Screen for TitleScreen {
    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()> {
        renderer.begin();
        renderer.text_centered(5, "N O V A S T R I K E", Color::Yellow);
        let labels: Vec<&str> = ITEMS.iter().map(|(label, _)| *label).collect();
        renderer.menu(10, &labels, self.cursor);
        renderer.text_centered(21, "arrows/WS move, space selects", Color::DarkGrey);
        renderer.present()?;

        if !self.input_delay.is_finished() {
            return Ok(());
        }
        if self.selection.is_finished() {
            if input.any_down(KEYS_UP) {
                self.cursor = (self.cursor + ITEMS.len() - 1) % ITEMS.len();
                self.selection.reset();
            }
            if input.any_down(KEYS_DOWN) {
                self.cursor = (self.cursor + 1) % ITEMS.len();
                self.selection.reset();
            }
        }
        if input.any_pressed(KEYS_CONFIRM) {
            self.running = false;
        }
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn outcome(&self) -> u8 {
        ITEMS[self.cursor].1
    }

    fn name(&self) -> &'static str {
        "title"
    }
}
