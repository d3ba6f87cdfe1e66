/// One campaign level: an enemy formation marches and drops bombs, one or
/// two player ships shoot back.
///
/// The screen owns its copy of the session `GameState`, accumulates score,
/// lives, shots and kills into it while running, and hands it back through
/// `into_state()` when the round ends (formation cleared, all active lives
/// gone, or the formation reaching the player row).

use std::io;

use crossterm::event::KeyCode;
use crossterm::style::Color;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::GameConfig;
use crate::engine::cooldown::Cooldown;
use crate::engine::progression::{GameSettings, MAX_LIVES};
use crate::engine::state::{GameState, PlayerCount, PlayerSlot};
use crate::screen::{
    Screen, KEYS_FIRE_P1, KEYS_FIRE_P2, KEYS_LEFT, KEYS_LEFT_P2, KEYS_RIGHT, KEYS_RIGHT_P2,
};
use crate::ui::input::InputState;
use crate::ui::renderer::{Renderer, VIEW_H, VIEW_W};

const FIELD_W: i32 = VIEW_W;
const PLAYER_Y: i32 = VIEW_H - 3;
const FORMATION_TOP: i32 = 3;
const COL_SPACING: i32 = 3;
const ROW_SPACING: i32 = 2;

/// Milliseconds between formation steps.
const FORMATION_STEP_MS: u64 = 500;
/// Minimum gap between shots from one ship.
const PLAYER_FIRE_MS: u64 = 500;
/// Jitter fraction of the enemy fire interval.
const FIRE_VARIANCE_DIV: u64 = 4;

struct Ship {
    x: i32,
    fire: Cooldown,
}

struct Bullet {
    x: i32,
    y: i32,
    owner: PlayerSlot,
}

struct Bomb {
    x: i32,
    y: i32,
}

// ── Formation ──

/// The enemy grid. Cell (r, c) sits at `(x + c*COL_SPACING, y + r*ROW_SPACING)`
/// while alive. The whole grid steps sideways on a cooldown and descends one
/// row whenever an edge is reached.
struct Formation {
    rows: i32,
    cols: i32,
    alive: Vec<bool>,
    x: i32,
    y: i32,
    dir: i32,
    step: Cooldown,
}

impl Formation {
    fn new(rows: u32, cols: u32) -> Self {
        let rows = rows as i32;
        let cols = cols as i32;
        let span = (cols - 1) * COL_SPACING + 1;
        let mut step = Cooldown::new(FORMATION_STEP_MS);
        step.reset();
        Formation {
            rows,
            cols,
            alive: vec![true; (rows * cols) as usize],
            x: (FIELD_W - span) / 2,
            y: FORMATION_TOP,
            dir: 1,
            step,
        }
    }

    fn alive_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    fn cell_pos(&self, r: i32, c: i32) -> (i32, i32) {
        (self.x + c * COL_SPACING, self.y + r * ROW_SPACING)
    }

    /// World-x extent of the alive cells.
    fn extent(&self) -> (i32, i32) {
        let mut min_x = i32::MAX;
        let mut max_x = i32::MIN;
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.alive[(r * self.cols + c) as usize] {
                    let (x, _) = self.cell_pos(r, c);
                    min_x = min_x.min(x);
                    max_x = max_x.max(x);
                }
            }
        }
        (min_x, max_x)
    }

    /// Deepest row the formation has reached.
    fn lowest_y(&self) -> i32 {
        let mut lowest = i32::MIN;
        for r in 0..self.rows {
            for c in 0..self.cols {
                if self.alive[(r * self.cols + c) as usize] {
                    lowest = lowest.max(self.cell_pos(r, c).1);
                }
            }
        }
        lowest
    }

    /// One march step: sideways, or descend-and-reverse at an edge.
    fn shift(&mut self) {
        if self.alive_count() == 0 {
            return;
        }
        let (min_x, max_x) = self.extent();
        let at_edge = (self.dir < 0 && min_x + self.dir < 0)
            || (self.dir > 0 && max_x + self.dir >= FIELD_W);
        if at_edge {
            self.y += 1;
            self.dir = -self.dir;
        } else {
            self.x += self.dir;
        }
    }

    fn advance(&mut self) {
        if self.step.is_finished() {
            self.shift();
            self.step.reset();
        }
    }

    /// Kill the alive cell at exactly `(x, y)`, if any.
    fn hit_test(&mut self, x: i32, y: i32) -> bool {
        for r in 0..self.rows {
            for c in 0..self.cols {
                let idx = (r * self.cols + c) as usize;
                if self.alive[idx] && self.cell_pos(r, c) == (x, y) {
                    self.alive[idx] = false;
                    return true;
                }
            }
        }
        false
    }

    /// Position of the lowest alive enemy in a column; bombs spawn there.
    fn bottom_of_column(&self, c: i32) -> Option<(i32, i32)> {
        (0..self.rows)
            .rev()
            .find(|r| self.alive[(r * self.cols + c) as usize])
            .map(|r| self.cell_pos(r, c))
    }

    fn alive_columns(&self) -> Vec<i32> {
        (0..self.cols)
            .filter(|c| (0..self.rows).any(|r| self.alive[(r * self.cols + c) as usize]))
            .collect()
    }
}

// ── Screen ──

pub struct GameScreen {
    state: GameState,
    settings: GameSettings,
    running: bool,
    tick: u64,
    input_delay: Cooldown,
    formation: Formation,
    ships: [Option<Ship>; 2],
    bullets: Vec<Bullet>,
    bombs: Vec<Bomb>,
    enemy_fire: Cooldown,
    rng: ThreadRng,
}

impl GameScreen {
    pub fn new(
        mut state: GameState,
        settings: GameSettings,
        bonus_life: bool,
        config: &GameConfig,
    ) -> Self {
        if bonus_life {
            state.lives.p1 = (state.lives.p1 + 1).min(MAX_LIVES);
        }

        let mut input_delay = Cooldown::new(config.input_delay_ms);
        input_delay.reset();
        let mut enemy_fire = Cooldown::with_variance(
            settings.base_shot_interval_ms,
            settings.base_shot_interval_ms / FIRE_VARIANCE_DIV,
        );
        enemy_fire.reset();

        let ship = |x| {
            Some(Ship { x, fire: Cooldown::new(PLAYER_FIRE_MS) })
        };
        let p1 = if state.lives.p1 > 0 { ship(FIELD_W / 3) } else { None };
        let p2 = if state.players == PlayerCount::Two && state.lives.p2 > 0 {
            ship(2 * FIELD_W / 3)
        } else {
            None
        };

        GameScreen {
            state,
            settings,
            running: true,
            tick: 0,
            input_delay,
            formation: Formation::new(settings.formation_rows, settings.formation_columns),
            ships: [p1, p2],
            bullets: Vec::new(),
            bombs: Vec::new(),
            enemy_fire,
            rng: rand::thread_rng(),
        }
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    fn slot_of(index: usize) -> PlayerSlot {
        if index == 0 { PlayerSlot::One } else { PlayerSlot::Two }
    }

    fn handle_controls(&mut self, input: &InputState) {
        let bindings: [(&[KeyCode], &[KeyCode], &[KeyCode]); 2] = [
            (KEYS_LEFT, KEYS_RIGHT, KEYS_FIRE_P1),
            (KEYS_LEFT_P2, KEYS_RIGHT_P2, KEYS_FIRE_P2),
        ];
        for (i, (left, right, fire)) in bindings.iter().enumerate() {
            let Some(ship) = self.ships[i].as_mut() else { continue };
            if self.tick % 2 == 0 {
                if input.any_down(left) {
                    ship.x = (ship.x - 1).max(0);
                }
                if input.any_down(right) {
                    ship.x = (ship.x + 1).min(FIELD_W - 1);
                }
            }
            if input.any_down(fire) && ship.fire.is_finished() {
                self.bullets.push(Bullet { x: ship.x, y: PLAYER_Y - 1, owner: Self::slot_of(i) });
                self.state.bullets_shot.add(Self::slot_of(i), 1);
                ship.fire.reset();
            }
        }
    }

    fn advance_projectiles(&mut self) {
        for b in &mut self.bullets {
            b.y -= 1;
        }
        self.bullets.retain(|b| b.y >= 0);
        if self.tick % 2 == 0 {
            for b in &mut self.bombs {
                b.y += 1;
            }
            self.bombs.retain(|b| b.y <= PLAYER_Y);
        }
    }

    fn enemy_volley(&mut self) {
        if !self.enemy_fire.is_finished() {
            return;
        }
        let columns = self.formation.alive_columns();
        if let Some(&col) = columns.get(self.rng.gen_range(0..columns.len().max(1))) {
            if let Some((x, y)) = self.formation.bottom_of_column(col) {
                self.bombs.push(Bomb { x, y: y + 1 });
            }
        }
        self.enemy_fire.reset();
    }

    fn resolve_bullet_hits(&mut self) {
        let formation = &mut self.formation;
        let state = &mut self.state;
        let points = self.settings.points_per_kill;
        self.bullets.retain(|b| {
            if formation.hit_test(b.x, b.y) {
                state.score.add(b.owner, points);
                state.ships_destroyed.add(b.owner, 1);
                false
            } else {
                true
            }
        });
    }

    fn resolve_bomb_hits(&mut self) {
        for i in 0..self.ships.len() {
            let Some(ship_x) = self.ships[i].as_ref().map(|s| s.x) else { continue };
            let hit = self
                .bombs
                .iter()
                .position(|b| b.y == PLAYER_Y && (b.x - ship_x).abs() <= 1);
            if let Some(bomb) = hit {
                self.bombs.swap_remove(bomb);
                let slot = Self::slot_of(i);
                let lives = match slot {
                    PlayerSlot::One => &mut self.state.lives.p1,
                    PlayerSlot::Two => &mut self.state.lives.p2,
                };
                *lives = lives.saturating_sub(1);
                if *lives == 0 {
                    self.ships[i] = None;
                }
            }
        }
    }

    fn check_round_end(&mut self) {
        if self.formation.alive_count() == 0 {
            self.running = false;
            return;
        }
        // Invasion: the formation reached the player row.
        if self.formation.lowest_y() >= PLAYER_Y {
            self.state.lives.p1 = 0;
            self.state.lives.p2 = 0;
            self.running = false;
            return;
        }
        if !self.state.has_lives() {
            self.running = false;
        }
    }

    fn draw(&mut self, renderer: &mut Renderer) -> io::Result<()> {
        renderer.begin();

        let hud = match self.state.players {
            PlayerCount::One => format!(
                "LEVEL {}  SCORE {}  LIVES {}",
                self.state.level, self.state.score.p1, self.state.lives.p1
            ),
            PlayerCount::Two => format!(
                "LEVEL {}  P1 {} ({})  P2 {} ({})",
                self.state.level,
                self.state.score.p1,
                self.state.lives.p1,
                self.state.score.p2,
                self.state.lives.p2
            ),
        };
        renderer.text(1, 0, &hud, Color::Yellow);
        for x in 0..FIELD_W {
            renderer.put(x, 1, '-', Color::DarkGrey);
        }

        for r in 0..self.formation.rows {
            for c in 0..self.formation.cols {
                if self.formation.alive[(r * self.formation.cols + c) as usize] {
                    let (x, y) = self.formation.cell_pos(r, c);
                    renderer.put(x, y, 'M', Color::Magenta);
                }
            }
        }
        for b in &self.bullets {
            renderer.put(b.x, b.y, '|', Color::White);
        }
        for b in &self.bombs {
            renderer.put(b.x, b.y, '!', Color::Red);
        }
        for (i, ship) in self.ships.iter().enumerate() {
            if let Some(ship) = ship {
                let color = if i == 0 { Color::Green } else { Color::Cyan };
                renderer.put(ship.x, PLAYER_Y, 'A', color);
            }
        }

        if !self.input_delay.is_finished() {
            renderer.text_centered(VIEW_H / 2, "GET READY", Color::Yellow);
        }
        renderer.present()
    }
}

impl Screen for GameScreen {
    fn update(&mut self, input: &InputState, renderer: &mut Renderer) -> io::Result<()> {
        self.tick = self.tick.wrapping_add(1);
        self.draw(renderer)?;

        // Debounce window doubles as the level-start countdown.
        if !self.input_delay.is_finished() {
            return Ok(());
        }

        self.handle_controls(input);
        self.formation.advance();
        self.advance_projectiles();
        self.enemy_volley();
        self.resolve_bullet_hits();
        self.resolve_bomb_hits();
        self.check_round_end();
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn outcome(&self) -> u8 {
        1
    }

    fn name(&self) -> &'static str {
        "game"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progression::{self, Difficulty};
    use crate::engine::state::PlayerPair;

    fn settings() -> GameSettings {
        progression::settings(Difficulty::Easy)[0]
    }

    fn screen_for(state: GameState, bonus: bool) -> GameScreen {
        GameScreen::new(state, settings(), bonus, &GameConfig::default())
    }

    #[test]
    fn bonus_life_granted_and_capped() {
        let mut state = GameState::new_session(PlayerCount::One);
        state.lives = PlayerPair::new(1, 0);
        let screen = screen_for(state, true);
        assert_eq!(screen.state.lives.p1, 2);

        let mut full = GameState::new_session(PlayerCount::One);
        full.lives = PlayerPair::new(MAX_LIVES, 0);
        let screen = screen_for(full, true);
        assert_eq!(screen.state.lives.p1, MAX_LIVES);
    }

    #[test]
    fn one_player_session_spawns_one_ship() {
        let screen = screen_for(GameState::new_session(PlayerCount::One), false);
        assert!(screen.ships[0].is_some());
        assert!(screen.ships[1].is_none());
    }

    #[test]
    fn dead_second_player_gets_no_ship() {
        let mut state = GameState::new_session(PlayerCount::Two);
        state.lives = PlayerPair::new(2, 0);
        let screen = screen_for(state, false);
        assert!(screen.ships[0].is_some());
        assert!(screen.ships[1].is_none());
    }

    #[test]
    fn formation_descends_and_reverses_at_edge() {
        let mut f = Formation::new(2, 3);
        let top = f.y;
        // March right until the wall, expect one descend + reversal.
        for _ in 0..FIELD_W {
            f.shift();
            if f.dir < 0 {
                break;
            }
        }
        assert_eq!(f.dir, -1);
        assert_eq!(f.y, top + 1);
    }

    #[test]
    fn bullet_kill_scores_for_its_owner() {
        let mut screen = screen_for(GameState::new_session(PlayerCount::Two), false);
        let (x, y) = screen.formation.cell_pos(0, 0);
        screen.bullets.push(Bullet { x, y, owner: PlayerSlot::Two });
        let before = screen.formation.alive_count();

        screen.resolve_bullet_hits();

        assert_eq!(screen.formation.alive_count(), before - 1);
        assert_eq!(screen.state.score.p2, settings().points_per_kill);
        assert_eq!(screen.state.ships_destroyed.p2, 1);
        assert_eq!(screen.state.score.p1, 0);
        assert!(screen.bullets.is_empty());
    }

    #[test]
    fn missing_bullet_survives() {
        let mut screen = screen_for(GameState::new_session(PlayerCount::One), false);
        screen.bullets.push(Bullet { x: 0, y: PLAYER_Y - 2, owner: PlayerSlot::One });
        screen.resolve_bullet_hits();
        assert_eq!(screen.bullets.len(), 1);
    }

    #[test]
    fn bomb_hit_takes_a_life_and_removes_ship_at_zero() {
        let mut state = GameState::new_session(PlayerCount::One);
        state.lives = PlayerPair::new(1, 0);
        let mut screen = screen_for(state, false);
        let ship_x = screen.ships[0].as_ref().unwrap().x;
        screen.bombs.push(Bomb { x: ship_x, y: PLAYER_Y });

        screen.resolve_bomb_hits();

        assert_eq!(screen.state.lives.p1, 0);
        assert!(screen.ships[0].is_none());
        assert!(screen.bombs.is_empty());
    }

    #[test]
    fn cleared_formation_ends_the_round() {
        let mut screen = screen_for(GameState::new_session(PlayerCount::One), false);
        screen.formation.alive.fill(false);
        screen.check_round_end();
        assert!(!screen.running);
        // Lives untouched on a clear.
        assert_eq!(screen.state.lives.p1, MAX_LIVES);
    }

    #[test]
    fn invasion_zeroes_lives_and_ends_the_round() {
        let mut screen = screen_for(GameState::new_session(PlayerCount::Two), false);
        screen.formation.y = PLAYER_Y;
        screen.check_round_end();
        assert!(!screen.running);
        assert_eq!(screen.state.lives, PlayerPair::new(0, 0));
    }

    #[test]
    fn into_state_returns_accumulated_progress() {
        let mut screen = screen_for(GameState::new_session(PlayerCount::One), false);
        screen.state.score.add(PlayerSlot::One, 120);
        let state = screen.into_state();
        assert_eq!(state.score.p1, 120);
        assert_eq!(state.level, 1);
    }
}
