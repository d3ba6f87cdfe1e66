/// High-score table display. Confirm returns to the main menu.

use std::io;

use crossterm::style::Color;

use crate::config::GameConfig;
use crate::engine::cooldown::Cooldown;
use crate::scores::ScoreRecord;
use crate::screen::{Screen, KEYS_CONFIRM};
use crate::ui::input::InputState;
use crate::ui::renderer::Renderer;

pub struct HighScoreScreen {
    records: Vec<ScoreRecord>,
    running: bool,
    input_delay: Cooldown,
}

impl HighScoreScreen {
    pub fn new(records: Vec<ScoreRecord>, config: &GameConfig) -> Self {
        let mut input_delay = Cooldown::new(config.input_delay_ms);
        input_delay.reset();
        HighScoreScreen { records, running: true, input_delay }
    }
}

impl Screen for HighScoreScreen {
    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()> {
        renderer.begin();
        renderer.text_centered(4, "HIGH SCORES", Color::Yellow);
        if self.records.is_empty() {
            renderer.text_centered(10, "no scores yet", Color::DarkGrey);
        } else {
            for (i, rec) in self.records.iter().enumerate() {
                let line = format!("{:>2}. {:<3} {:>6}", i + 1, rec.name, rec.score);
                renderer.text_centered(7 + 2 * i as i32, &line, Color::Grey);
            }
        }
        renderer.text_centered(23, "space to return", Color::DarkGrey);
        renderer.present()?;

        if self.input_delay.is_finished() && input.any_pressed(KEYS_CONFIRM) {
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
        "high score"
    }
}
