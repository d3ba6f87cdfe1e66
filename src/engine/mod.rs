pub mod cooldown;
pub mod orchestrator;
pub mod progression;
pub mod runner;
pub mod state;
