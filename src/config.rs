/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Frame rate of every screen loop.
    pub fps: u64,
    /// Debounce window after a screen activates.
    pub input_delay_ms: u64,
    /// Minimum gap between menu cursor moves.
    pub selection_delay_ms: u64,
    pub scores_file: PathBuf,
    pub log_file: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            fps: default_fps(),
            input_delay_ms: default_input_delay(),
            selection_delay_ms: default_selection_delay(),
            scores_file: PathBuf::from(default_scores_file()),
            log_file: PathBuf::from(default_log_file()),
        }
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    files: TomlFiles,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_fps")]
    fps: u64,
    #[serde(default = "default_input_delay")]
    input_delay_ms: u64,
    #[serde(default = "default_selection_delay")]
    selection_delay_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlFiles {
    #[serde(default = "default_scores_file")]
    scores_file: String,
    #[serde(default = "default_log_file")]
    log_file: String,
}

// ── Defaults ──

fn default_fps() -> u64 { 60 }
fn default_input_delay() -> u64 { 1000 }
fn default_selection_delay() -> u64 { 200 }
fn default_scores_file() -> String { "highscores.toml".into() }
fn default_log_file() -> String { "novastrike.log".into() }

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            fps: default_fps(),
            input_delay_ms: default_input_delay(),
            selection_delay_ms: default_selection_delay(),
        }
    }
}

impl Default for TomlFiles {
    fn default() -> Self {
        TomlFiles {
            scores_file: default_scores_file(),
            log_file: default_log_file(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);

        // Data files live next to the config unless given as absolute paths.
        let base = search_dirs.first().cloned().unwrap_or_else(|| PathBuf::from("."));
        let resolve = |name: &str| {
            let path = PathBuf::from(name);
            if path.is_absolute() { path } else { base.join(path) }
        };

        GameConfig {
            fps: toml_cfg.timing.fps,
            input_delay_ms: toml_cfg.timing.input_delay_ms,
            selection_delay_ms: toml_cfg.timing.selection_delay_ms,
            scores_file: resolve(&toml_cfg.files.scores_file),
            log_file: resolve(&toml_cfg.files.log_file),
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_per_field() {
        let cfg: TomlConfig = toml::from_str("[timing]\nfps = 30\n").unwrap();
        assert_eq!(cfg.timing.fps, 30);
        assert_eq!(cfg.timing.input_delay_ms, 1000);
        assert_eq!(cfg.files.scores_file, "highscores.toml");
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let cfg: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.timing.fps, 60);
        assert_eq!(cfg.timing.selection_delay_ms, 200);
        assert_eq!(cfg.files.log_file, "novastrike.log");
    }
}
