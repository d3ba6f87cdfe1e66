/// Generic per-screen scheduling loop.
///
/// One fixed-timestep loop per screen: drain input, update once, sleep off
/// the rest of the frame budget. Pause is a sub-state of this same loop, not
/// a nested one: a paused tick only polls the resume key at a fixed 100ms
/// interval, with updates and frame pacing fully suspended.
///
/// There is no catch-up when a tick overruns its budget; the next tick just
/// starts immediately, so physics rate is not guaranteed under sustained
/// overrun.

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::screen::{Screen, KEYS_PAUSE, KEYS_RESUME};
use crate::ui::input::InputState;
use crate::ui::renderer::Renderer;

/// Outcome reported when a screen is cut short from outside (Ctrl-C).
pub const OUTCOME_ABORT: u8 = 0;

/// Poll interval for the resume key while paused.
const PAUSE_POLL: Duration = Duration::from_millis(100);

pub struct ScreenRunner {
    frame_budget: Duration,
}

impl ScreenRunner {
    pub fn new(fps: u64) -> Self {
        ScreenRunner {
            frame_budget: Duration::from_millis(1000 / fps.max(1)),
        }
    }

    /// Drive `screen` until it stops running, then return its outcome.
    /// An external abort returns `OUTCOME_ABORT` immediately; the latched
    /// flag makes every later screen return the same way.
    pub fn run(
        &self,
        screen: &mut dyn Screen,
        input: &mut InputState,
        renderer: &mut Renderer,
    ) -> io::Result<u8> {
        let mut paused = false;

        while screen.is_running() {
            let tick_start = Instant::now();
            input.drain_events();

            if input.abort_requested() {
                return Ok(OUTCOME_ABORT);
            }

            if paused {
                if input.any_pressed(KEYS_RESUME) {
                    paused = false;
                }
                thread::sleep(PAUSE_POLL);
                continue;
            }

            if input.any_pressed(KEYS_PAUSE) {
                paused = true;
                continue;
            }

            screen.update(input, renderer)?;

            if let Some(rest) = self.frame_budget.checked_sub(tick_start.elapsed()) {
                thread::sleep(rest);
            }
        }

        Ok(screen.outcome())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Screen that runs for a fixed number of updates.
    struct CountingScreen {
        updates: u32,
        budget: u32,
        outcome: u8,
    }

    impl CountingScreen {
        fn new(budget: u32, outcome: u8) -> Self {
            CountingScreen { updates: 0, budget, outcome }
        }
    }

    impl Screen for CountingScreen {
        fn update(&mut self, _input: &InputState, _renderer: &mut Renderer) -> io::Result<()> {
            self.updates += 1;
            Ok(())
        }

        fn is_running(&self) -> bool {
            self.updates < self.budget
        }

        fn outcome(&self) -> u8 {
            self.outcome
        }

        fn name(&self) -> &'static str {
            "counting"
        }
    }

    struct FailingScreen;

    impl Screen for FailingScreen {
        fn update(&mut self, _input: &InputState, _renderer: &mut Renderer) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "boom"))
        }

        fn is_running(&self) -> bool {
            true
        }

        fn outcome(&self) -> u8 {
            1
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn runs_until_screen_stops_and_reports_outcome() {
        let runner = ScreenRunner::new(250);
        let mut screen = CountingScreen::new(5, 7);
        let mut input = InputState::new();
        let mut renderer = Renderer::new();
        let outcome = runner.run(&mut screen, &mut input, &mut renderer).unwrap();
        assert_eq!(outcome, 7);
        assert_eq!(screen.updates, 5);
    }

    #[test]
    fn finished_screen_returns_without_updating() {
        let runner = ScreenRunner::new(250);
        let mut screen = CountingScreen::new(0, 3);
        let mut input = InputState::new();
        let mut renderer = Renderer::new();
        let outcome = runner.run(&mut screen, &mut input, &mut renderer).unwrap();
        assert_eq!(outcome, 3);
        assert_eq!(screen.updates, 0);
    }

    #[test]
    fn paces_ticks_to_the_frame_budget() {
        let runner = ScreenRunner::new(100); // 10ms budget
        let mut screen = CountingScreen::new(5, 1);
        let mut input = InputState::new();
        let mut renderer = Renderer::new();
        let start = Instant::now();
        runner.run(&mut screen, &mut input, &mut renderer).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn update_error_propagates() {
        let runner = ScreenRunner::new(250);
        let mut screen = FailingScreen;
        let mut input = InputState::new();
        let mut renderer = Renderer::new();
        assert!(runner.run(&mut screen, &mut input, &mut renderer).is_err());
    }
}
