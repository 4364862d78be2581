//! Score persistence.
//!
//! File layout is one record per line: `name,score,timeTakenSeconds`.
//! Malformed lines, including ones that are not valid UTF-8, are skipped
//! with a warning. Writes go to a temp file
//! under an exclusive lock and are renamed into place.

use fs2::FileExt;
use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::errors::DungeonError;
use super::types::Score;
use crate::logutil::escape_log;

/// Collaborator that loads and saves the ranked score list.
pub trait ScoreStore {
    fn load(&self) -> Result<Vec<Score>, DungeonError>;
    fn save(&mut self, scores: &[Score]) -> Result<(), DungeonError>;
}

/// Parse one `name,score,seconds` line.
pub fn parse_score_line(line: &str) -> Option<Score> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() != 3 || parts[0].trim().is_empty() {
        return None;
    }
    let score = parts[1].trim().parse().ok()?;
    let time_taken_secs = parts[2].trim().parse().ok()?;
    Some(Score::new(parts[0].trim(), score, time_taken_secs))
}

pub fn format_score_line(score: &Score) -> String {
    format!(
        "{},{},{}",
        score.player_name, score.score, score.time_taken_secs
    )
}

#[derive(Debug, Clone)]
pub struct CsvScoreStore {
    path: PathBuf,
}

impl CsvScoreStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for CsvScoreStore {
    fn load(&self) -> Result<Vec<Score>, DungeonError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No score file at {}; starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(DungeonError::PersistenceRead(e)),
        };

        let mut scores = Vec::new();
        for (lineno, raw) in contents.split(|&b| b == b'\n').enumerate() {
            let Ok(line) = std::str::from_utf8(raw) else {
                warn!(
                    "Skipping non-UTF-8 score line {} in {}",
                    lineno + 1,
                    self.path.display()
                );
                continue;
            };
            if line.trim().is_empty() {
                continue;
            }
            match parse_score_line(line) {
                Some(score) => scores.push(score),
                None => warn!(
                    "Skipping malformed score line {} in {}: '{}'",
                    lineno + 1,
                    self.path.display(),
                    escape_log(line)
                ),
            }
        }
        Ok(scores)
    }

    fn save(&mut self, scores: &[Score]) -> Result<(), DungeonError> {
        let mut content = String::new();
        for score in scores {
            content.push_str(&format_score_line(score));
            content.push('\n');
        }
        write_atomic(&self.path, &content).map_err(DungeonError::PersistenceWrite)?;
        debug!("Saved {} scores to {}", scores.len(), self.path.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    fs::create_dir_all(dir)?;

    let lock_path = dir.join(format!(
        ".{}.lock",
        path.file_name().and_then(|s| s.to_str()).unwrap_or("scores")
    ));
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(&lock_path)?;
    lock_file.lock_exclusive()?;

    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("scores.txt");
    let mut counter = 0u32;
    let tmp_path = loop {
        let candidate = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                tmp.sync_all()?;
                break candidate;
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e),
        }
    };
    fs::rename(&tmp_path, path)?;
    if let Ok(dirf) = File::open(dir) {
        let _ = dirf.sync_all();
    }
    FileExt::unlock(&lock_file)?;
    Ok(())
}

/// In-process store for sessions that should not touch disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    scores: Vec<Score>,
    saves: usize,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scores(scores: Vec<Score>) -> Self {
        Self { scores, saves: 0 }
    }

    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<Vec<Score>, DungeonError> {
        Ok(self.scores.clone())
    }

    fn save(&mut self, scores: &[Score]) -> Result<(), DungeonError> {
        self.scores = scores.to_vec();
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_lines() {
        assert_eq!(
            parse_score_line("alice,450,183"),
            Some(Score::new("alice", 450, 183))
        );
        assert_eq!(
            parse_score_line(" bob , 10 , 7 \n").map(|s| s.score),
            Some(10)
        );
    }

    #[test]
    fn rejects_malformed_lines() {
        for line in ["", "alice,450", "alice,450,183,extra", "alice,lots,183", ",1,2", "carol,-5,10"] {
            assert!(parse_score_line(line).is_none(), "accepted {line:?}");
        }
    }

    #[test]
    fn invalid_utf8_line_skipped_without_losing_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.txt");
        fs::write(&path, b"alice,500,60\r\nbob,400,70\n\xff\xfe,1,1\ncarol,300,80\n").unwrap();
        let store = CsvScoreStore::new(&path);
        assert_eq!(
            store.load().unwrap(),
            vec![
                Score::new("alice", 500, 60),
                Score::new("bob", 400, 70),
                Score::new("carol", 300, 80),
            ]
        );
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvScoreStore::new(dir.path().join("none.txt"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = CsvScoreStore::new(dir.path().join("nested").join("scores.txt"));
        let scores = vec![Score::new("zed", 500, 90), Score::new("amy", 500, 120)];
        store.save(&scores).unwrap();
        assert_eq!(store.load().unwrap(), scores);
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "zed,500,90\namy,500,120\n");
    }

    #[test]
    fn memory_store_counts_saves() {
        let mut store = MemoryScoreStore::with_scores(vec![Score::new("a", 1, 1)]);
        assert_eq!(store.load().unwrap().len(), 1);
        store.save(&[]).unwrap();
        assert_eq!(store.saves(), 1);
        assert!(store.load().unwrap().is_empty());
    }
}
