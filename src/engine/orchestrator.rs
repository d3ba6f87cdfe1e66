/// Top-level flow state machine.
///
/// Owns the authoritative session state and decides which screen runs next
/// from the outcome code of the screen that just finished:
///
///   MainMenu -> PlaySession (player count, difficulty, campaign, scores)
///            -> ResetScores (confirmation, optional wipe)
///            -> HighScores  (table display)
///            -> Exit
///
/// Every screen is driven by the same `ScreenRunner`; services are built
/// once in `main` and injected here by reference.

use std::io;

use crate::config::GameConfig;
use crate::engine::progression::{self, Difficulty, GameSettings, NUM_LEVELS};
use crate::engine::runner::ScreenRunner;
use crate::engine::state::{GameState, PlayerCount, PlayerSlot};
use crate::scores::{self, ScoreRecord, ScoreStore};
use crate::screen::game::GameScreen;
use crate::screen::highscore::HighScoreScreen;
use crate::screen::reset::ScoreResetScreen;
use crate::screen::score::ScoreScreen;
use crate::screen::select::{DifficultySelectScreen, PlayerSelectScreen};
use crate::screen::title::TitleScreen;
use crate::screen::Screen;
use crate::ui::input::InputState;
use crate::ui::renderer::Renderer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    MainMenu,
    PlaySession,
    ResetScores,
    HighScores,
    Exit,
}

pub struct Orchestrator<'a> {
    config: &'a GameConfig,
    runner: ScreenRunner,
    input: &'a mut InputState,
    renderer: &'a mut Renderer,
    scores: &'a ScoreStore,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        config: &'a GameConfig,
        input: &'a mut InputState,
        renderer: &'a mut Renderer,
        scores: &'a ScoreStore,
    ) -> Self {
        Orchestrator {
            config,
            runner: ScreenRunner::new(config.fps),
            input,
            renderer,
            scores,
        }
    }

    /// Drive the whole program until the exit transition.
    pub fn run_session(&mut self) -> io::Result<()> {
        let mut flow = Flow::MainMenu;
        loop {
            flow = match flow {
                Flow::MainMenu => {
                    let code = self.run_screen(&mut TitleScreen::new(self.config))?;
                    match code {
                        0 => Flow::Exit,
                        1 => Flow::PlaySession,
                        3 => Flow::ResetScores,
                        4 => Flow::HighScores,
                        // 2 is reserved; unknown codes fall back to the menu.
                        _ => Flow::MainMenu,
                    }
                }
                Flow::PlaySession => self.play_session()?,
                Flow::ResetScores => {
                    let code = self.run_screen(&mut ScoreResetScreen::new(self.config))?;
                    apply_reset(self.scores, code);
                    Flow::MainMenu
                }
                Flow::HighScores => {
                    let records = self.scores.load();
                    let code =
                        self.run_screen(&mut HighScoreScreen::new(records, self.config))?;
                    if code == 0 { Flow::Exit } else { Flow::MainMenu }
                }
                Flow::Exit => break,
            };
        }
        Ok(())
    }

    fn run_screen(&mut self, screen: &mut dyn Screen) -> io::Result<u8> {
        log::info!("starting {} screen at {} fps", screen.name(), self.config.fps);
        let outcome = self.runner.run(screen, self.input, self.renderer)?;
        log::info!("closing {} screen, outcome {}", screen.name(), outcome);
        Ok(outcome)
    }

    /// The play chain: player count, difficulty, campaign, score summaries.
    fn play_session(&mut self) -> io::Result<Flow> {
        let players = match self.run_screen(&mut PlayerSelectScreen::new(self.config))? {
            1 => PlayerCount::One,
            2 => PlayerCount::Two,
            _ => return Ok(Flow::Exit), // aborted selection
        };
        let tier = match self.run_screen(&mut DifficultySelectScreen::new(self.config))? {
            1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            3 => Difficulty::Hard,
            _ => return Ok(Flow::Exit),
        };

        let settings = progression::settings(tier);
        let config = self.config;
        let state = run_campaign(GameState::new_session(players), settings, |st, set, bonus| {
            let mut screen = GameScreen::new(st, set, bonus, config);
            self.run_screen(&mut screen)?;
            Ok(screen.into_state())
        })?;

        log::info!(
            "campaign over at level {} with score {}+{}, {}+{} lives, \
             {}+{} bullets shot and {}+{} ships destroyed",
            state.level,
            state.score.p1, state.score.p2,
            state.lives.p1, state.lives.p2,
            state.bullets_shot.p1, state.bullets_shot.p2,
            state.ships_destroyed.p1, state.ships_destroyed.p2,
        );

        let mut records = self.scores.load();
        for &slot in score_slots(players) {
            self.show_score(&mut records, state, slot)?;
        }
        Ok(Flow::MainMenu)
    }

    fn show_score(
        &mut self,
        records: &mut Vec<ScoreRecord>,
        state: GameState,
        slot: PlayerSlot,
    ) -> io::Result<()> {
        let qualifies = scores::qualifies(records, state.score.get(slot));
        let mut screen = ScoreScreen::new(state, slot, qualifies, self.config);
        self.run_screen(&mut screen)?;
        if let Some(record) = screen.entry() {
            scores::insert(records, record);
            if let Err(e) = self.scores.save(records) {
                log::warn!("high score save failed: {e}");
            }
        }
        Ok(())
    }
}

/// The level loop. Each iteration plays one level through `run_level` and
/// folds the resulting snapshot forward. The loop stops the first time the
/// lives condition fails (the final state keeps the level it died on) or
/// once level `NUM_LEVELS` has been completed; never more than `NUM_LEVELS`
/// iterations.
pub fn run_campaign<F>(
    start: GameState,
    settings: &[GameSettings; NUM_LEVELS as usize],
    mut run_level: F,
) -> io::Result<GameState>
where
    F: FnMut(GameState, GameSettings, bool) -> io::Result<GameState>,
{
    let mut state = start;
    loop {
        let bonus = progression::bonus_life(&state);
        state = run_level(state, settings[(state.level - 1) as usize], bonus)?;
        if !state.has_lives() || state.level >= NUM_LEVELS {
            return Ok(state);
        }
        state = state.advance_level();
    }
}

/// Summary screens shown after a campaign: always player 1, then player 2
/// in 2-player sessions.
fn score_slots(players: PlayerCount) -> &'static [PlayerSlot] {
    match players {
        PlayerCount::One => &[PlayerSlot::One],
        PlayerCount::Two => &[PlayerSlot::One, PlayerSlot::Two],
    }
}

/// Reset-confirmation outcome: 1 wipes the table, anything else leaves it
/// alone. A failed wipe is logged and swallowed, never retried.
fn apply_reset(scores: &ScoreStore, code: u8) {
    if code == 1 {
        if let Err(e) = scores.save(&[]) {
            log::warn!("high score reset failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::progression::MAX_LIVES;
    use crate::engine::state::PlayerPair;
    use std::path::PathBuf;

    fn easy() -> &'static [GameSettings; NUM_LEVELS as usize] {
        progression::settings(Difficulty::Easy)
    }

    /// Campaign where lives run out after a fixed number of levels.
    fn scripted(die_after: u32) -> impl FnMut(GameState, GameSettings, bool) -> io::Result<GameState>
    {
        move |mut state, _settings, _bonus| {
            if state.level >= die_after {
                state.lives = PlayerPair::default();
            }
            state.score.add(PlayerSlot::One, 100);
            Ok(state)
        }
    }

    #[test]
    fn one_player_dying_at_level_four_stops_there() {
        let start = GameState::new_session(PlayerCount::One);
        let state = run_campaign(start, easy(), scripted(4)).unwrap();
        assert_eq!(state.level, 4);
        assert!(!state.has_lives());
        assert_eq!(state.score.p1, 400);
    }

    #[test]
    fn two_players_dying_together_at_level_six_stop_there() {
        let start = GameState::new_session(PlayerCount::Two);
        let state = run_campaign(start, progression::settings(Difficulty::Medium), scripted(6))
            .unwrap();
        assert_eq!(state.level, 6);
        assert!(!state.has_lives());
    }

    #[test]
    fn surviving_campaign_ends_after_the_last_level() {
        let mut iterations = 0;
        let start = GameState::new_session(PlayerCount::One);
        let state = run_campaign(start, easy(), |state, _settings, _bonus| {
            iterations += 1;
            Ok(state)
        })
        .unwrap();
        assert_eq!(iterations, NUM_LEVELS);
        assert_eq!(state.level, NUM_LEVELS);
        assert!(state.has_lives());
    }

    #[test]
    fn two_player_session_continues_on_one_survivor() {
        let start = GameState::new_session(PlayerCount::Two);
        let mut levels_played = Vec::new();
        let state = run_campaign(start, easy(), |mut state, _settings, _bonus| {
            levels_played.push(state.level);
            state.lives.p1 = 0; // player 1 dies immediately, player 2 carries on
            Ok(state)
        })
        .unwrap();
        assert_eq!(levels_played, (1..=NUM_LEVELS).collect::<Vec<_>>());
        assert_eq!(state.level, NUM_LEVELS);
    }

    #[test]
    fn bonus_flag_follows_the_milestone_rule() {
        let start = GameState::new_session(PlayerCount::One);
        let mut flags = Vec::new();
        run_campaign(start, easy(), |mut state, _settings, bonus| {
            flags.push((state.level, bonus));
            state.lives = PlayerPair::new(1, 0); // stay below the cap
            Ok(state)
        })
        .unwrap();
        for (level, bonus) in flags {
            assert_eq!(bonus, level % 3 == 0, "level {level}");
        }
    }

    #[test]
    fn level_settings_are_taken_in_order() {
        let start = GameState::new_session(PlayerCount::One);
        let mut intervals = Vec::new();
        run_campaign(start, easy(), |state, settings, _bonus| {
            intervals.push(settings.base_shot_interval_ms);
            Ok(state)
        })
        .unwrap();
        let expected: Vec<u64> = easy().iter().map(|s| s.base_shot_interval_ms).collect();
        assert_eq!(intervals, expected);
    }

    #[test]
    fn run_level_errors_stop_the_campaign() {
        let start = GameState::new_session(PlayerCount::One);
        let result = run_campaign(start, easy(), |_state, _settings, _bonus| {
            Err(io::Error::new(io::ErrorKind::Other, "render died"))
        });
        assert!(result.is_err());
    }

    #[test]
    fn score_screens_run_for_each_active_player_in_order() {
        assert_eq!(score_slots(PlayerCount::One), &[PlayerSlot::One]);
        assert_eq!(
            score_slots(PlayerCount::Two),
            &[PlayerSlot::One, PlayerSlot::Two]
        );
    }

    // ── reset flow ──

    fn temp_store(tag: &str) -> (ScoreStore, PathBuf) {
        let path = std::env::temp_dir().join(format!("novastrike_reset_{tag}.toml"));
        let _ = std::fs::remove_file(&path);
        (ScoreStore::new(path.clone()), path)
    }

    #[test]
    fn reset_confirmed_saves_an_empty_list_once() {
        let (store, path) = temp_store("yes");
        store
            .save(&[ScoreRecord { name: "ANA".into(), score: 500 }])
            .unwrap();
        apply_reset(&store, 1);
        assert!(store.load().is_empty());
        assert!(path.exists());
    }

    #[test]
    fn reset_declined_never_touches_the_store() {
        let (store, path) = temp_store("no");
        apply_reset(&store, 2);
        assert!(!path.exists());
    }

    #[test]
    fn bonus_cap_holds_across_a_full_campaign() {
        let start = GameState::new_session(PlayerCount::One);
        let state = run_campaign(start, easy(), |mut state, _settings, bonus| {
            if bonus {
                state.lives.p1 = (state.lives.p1 + 1).min(MAX_LIVES);
            }
            Ok(state)
        })
        .unwrap();
        assert!(state.lives.p1 <= MAX_LIVES);
    }
}
