/// The screen contract and the shared key bindings.
///
/// A screen is one modal stage of the game flow. The runner drives it:
/// `update()` once per tick while `is_running()`, then `outcome()` tells the
/// orchestrator where to go next. Outcome 0 is reserved for abort/exit.
///
/// Every screen starts with an input-delay cooldown so the keypress that
/// closed the previous screen cannot act on this one.

use std::io;

use crossterm::event::KeyCode;

use crate::ui::input::InputState;
use crate::ui::renderer::Renderer;

pub mod game;
pub mod highscore;
pub mod reset;
pub mod score;
pub mod select;
pub mod title;

pub trait Screen {
    /// One fixed-timestep tick: draw, then react to input.
    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()>;

    fn is_running(&self) -> bool;

    /// Valid once `is_running()` is false; meaning is screen-specific.
    fn outcome(&self) -> u8;

    /// For transition logging.
    fn name(&self) -> &'static str;
}

// ── Key Constants ──

pub const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
pub const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
pub const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left];
pub const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right];
pub const KEYS_CONFIRM: &[KeyCode] = &[KeyCode::Enter, KeyCode::Char(' ')];
pub const KEYS_FIRE_P1: &[KeyCode] = &[KeyCode::Char(' ')];
pub const KEYS_LEFT_P2: &[KeyCode] = &[KeyCode::Char('a'), KeyCode::Char('A')];
pub const KEYS_RIGHT_P2: &[KeyCode] = &[KeyCode::Char('d'), KeyCode::Char('D')];
pub const KEYS_FIRE_P2: &[KeyCode] = &[KeyCode::Char('w'), KeyCode::Char('W')];
pub const KEYS_PAUSE: &[KeyCode] = &[KeyCode::Esc];
pub const KEYS_RESUME: &[KeyCode] = &[KeyCode::Char('s'), KeyCode::Char('S')];
