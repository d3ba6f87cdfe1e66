/// High-score reset confirmation.
///
/// Outcome 1 = wipe the table, 2 = keep it. Defaults to wipe.

use std::io;

use crossterm::style::Color;

use crate::config::GameConfig;
use crate::engine::cooldown::Cooldown;
use crate::screen::{Screen, KEYS_CONFIRM, KEYS_DOWN, KEYS_UP};
use crate::ui::input::InputState;
use crate::ui::renderer::Renderer;

pub struct ScoreResetScreen {
    /// 1 = yes, 2 = no.
    code: u8,
    running: bool,
    input_delay: Cooldown,
    selection: Cooldown,
}

impl ScoreResetScreen {
    pub fn new(config: &GameConfig) -> Self {
        let mut input_delay = Cooldown::new(config.input_delay_ms);
        input_delay.reset();
        let mut selection = Cooldown::new(config.selection_delay_ms);
        selection.reset();
        ScoreResetScreen { code: 1, running: true, input_delay, selection }
    }

    fn toggle(&mut self) {
        self.code = if self.code == 1 { 2 } else { 1 };
    }
}

impl Screen for ScoreResetScreen {
    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()> {
        renderer.begin();
        renderer.text_centered(6, "RESET HIGH SCORES?", Color::Yellow);
        renderer.menu(11, &["Yes, wipe them", "No, keep them"], self.code as usize - 1);
        renderer.present()?;

        if !self.input_delay.is_finished() {
            return Ok(());
        }
        if self.selection.is_finished()
            && (input.any_down(KEYS_UP) || input.any_down(KEYS_DOWN))
        {
            self.toggle();
            self.selection.reset();
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
        self.code
    }

    fn name(&self) -> &'static str {
        "score reset"
    }
}
