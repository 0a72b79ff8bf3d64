use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::tables::TrainingPair;

/// Parses `correct: typo1 typo2 ...` lines into training pairs.
///
/// Both sides are lower-cased. Blank lines and lines without a `:` are
/// ignored, as are lines with an empty correct word.
pub fn parse_corpus(content: &str) -> Vec<TrainingPair> {
    let mut pairs = Vec::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        let Some((correct, typos)) = line.split_once(':') else {
            continue;
        };
        let correct = correct.trim().to_lowercase();
        if correct.is_empty() {
            warn!(line = line_no + 1, "skipping corpus line without a correct word");
            continue;
        }
        pairs.extend(
            typos
                .split_whitespace()
                .map(|typo| TrainingPair::new(correct.clone(), typo.to_lowercase())),
        );
    }
    pairs
}

pub fn load_corpus(path: impl AsRef<Path>) -> Result<Vec<TrainingPair>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let pairs = parse_corpus(&content);
    debug!(path = %path.display(), pairs = pairs.len(), "loaded training corpus");
    Ok(pairs)
}
