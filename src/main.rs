/// Entry point: build the services, then hand control to the orchestrator.

mod config;
mod engine;
mod scores;
mod screen;
mod ui;

use config::GameConfig;
use engine::orchestrator::Orchestrator;
use scores::ScoreStore;
use ui::input::InputState;
use ui::renderer::Renderer;

fn main() {
    let config = GameConfig::load();
    init_logging(&config);

    let scores = ScoreStore::new(config.scores_file.clone());
    let mut input = InputState::new();
    let mut renderer = Renderer::new();

    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = Orchestrator::new(&config, &mut input, &mut renderer, &scores).run_session();

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Novastrike!");
}

/// Log to a file so raw-mode terminal output stays clean. Without a writable
/// log file, logging stays off (the macros become no-ops).
fn init_logging(config: &GameConfig) {
    if let Ok(file) = std::fs::File::create(&config.log_file) {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }
}
