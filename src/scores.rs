/// High-score persistence.
///
/// The table is an ordered list (highest first, at most `MAX_RECORDS`
/// entries) stored as TOML next to the binary. A missing or unreadable file
/// reads as an empty table; save failures surface as `io::Result` so the
/// caller decides whether to swallow them.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Entries kept in the table.
pub const MAX_RECORDS: usize = 7;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
}

#[derive(Serialize, Deserialize, Default)]
struct ScoreFile {
    scores: Vec<ScoreRecord>,
}

pub struct ScoreStore {
    path: PathBuf,
}

impl ScoreStore {
    pub fn new(path: PathBuf) -> Self {
        ScoreStore { path }
    }

    /// Load the table, highest score first. Any read or parse problem
    /// yields an empty table.
    pub fn load(&self) -> Vec<ScoreRecord> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(_) => return Vec::new(),
        };
        let mut records = match toml::from_str::<ScoreFile>(&text) {
            Ok(file) => file.scores,
            Err(e) => {
                log::warn!("high score file unreadable, starting empty: {e}");
                Vec::new()
            }
        };
        records.sort_by(|a, b| b.score.cmp(&a.score));
        records.truncate(MAX_RECORDS);
        records
    }

    pub fn save(&self, records: &[ScoreRecord]) -> io::Result<()> {
        let file = ScoreFile { scores: records.to_vec() };
        let text = toml::to_string(&file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(&self.path, text)
    }
}

/// Would this score make the table?
pub fn qualifies(records: &[ScoreRecord], score: u32) -> bool {
    if score == 0 {
        return false;
    }
    if records.len() < MAX_RECORDS {
        return true;
    }
    records.last().map(|r| score > r.score).unwrap_or(true)
}

/// Insert in descending order, keeping at most `MAX_RECORDS` entries.
pub fn insert(records: &mut Vec<ScoreRecord>, record: ScoreRecord) {
    let pos = records
        .iter()
        .position(|r| record.score > r.score)
        .unwrap_or(records.len());
    records.insert(pos, record);
    records.truncate(MAX_RECORDS);
}
