/// Keyboard state tracker.
///
/// Polled once per tick by the screen runner: drains every pending terminal
/// event, then answers point queries:
///   - `is_down`     — key currently held (continuous actions: ship movement)
///   - `was_pressed` — key went down this tick (one-shot actions: menus, fire)
///
/// Terminals rarely report key releases, so "held" is modelled as "a
/// Press/Repeat event arrived within the last HOLD_TIMEOUT".
///
/// Ctrl-C latches an abort flag that never clears; the runner checks it every
/// tick so a whole screen chain can unwind cleanly.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{self, poll, Event, KeyCode, KeyEventKind, KeyModifiers};

/// Without a Press/Repeat event for this long, a key counts as released.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

pub struct InputState {
    /// Timestamp of the last Press/Repeat event per key.
    last_active: HashMap<KeyCode, Instant>,
    /// Keys that went from "up" to "down" during the latest drain.
    fresh_presses: Vec<KeyCode>,
    /// Set once Ctrl-C is seen; never cleared.
    aborted: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(16),
            fresh_presses: Vec::with_capacity(8),
            aborted: false,
        }
    }

    /// Drain all pending terminal events. Call once per tick, before any
    /// key query.
    pub fn drain_events(&mut self) {
        self.fresh_presses.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                {
                    self.aborted = true;
                }
                match key.kind {
                    KeyEventKind::Release => {
                        self.last_active.remove(&key.code);
                    }
                    _ => {
                        let was_down = self.is_down(key.code);
                        self.last_active.insert(key.code, Instant::now());
                        if !was_down {
                            self.fresh_presses.push(key.code);
                        }
                    }
                }
            }
        }

        // Expire keys on terminals that never send Release.
        let now = Instant::now();
        self.last_active.retain(|_, t| now.duration_since(*t) < HOLD_TIMEOUT);
    }

    pub fn is_down(&self, code: KeyCode) -> bool {
        self.last_active
            .get(&code)
            .map(|t| t.elapsed() < HOLD_TIMEOUT)
            .unwrap_or(false)
    }

    pub fn any_down(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.is_down(*c))
    }

    pub fn was_pressed(&self, code: KeyCode) -> bool {
        self.fresh_presses.contains(&code)
    }

    pub fn any_pressed(&self, codes: &[KeyCode]) -> bool {
        codes.iter().any(|c| self.was_pressed(*c))
    }

    /// True once Ctrl-C has been seen at any point in the session.
    pub fn abort_requested(&self) -> bool {
        self.aborted
    }
}
