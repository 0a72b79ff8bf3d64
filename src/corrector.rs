use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

use crate::corpus::load_corpus;
use crate::decoder::{DEFAULT_FLOOR_PROBABILITY, ViterbiDecoder};
use crate::error::Result;
use crate::estimator::estimate;
use crate::tables::{HmmTables, TrainingPair};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Probability used for any emission or transition absent from the model.
    pub floor_probability: f64,
    /// Lower-case tokens before decoding.
    pub lowercase_input: bool,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            floor_probability: DEFAULT_FLOOR_PROBABILITY,
            lowercase_input: false,
        }
    }
}

/// A trained model ready to correct words and text.
#[derive(Debug, Clone)]
pub struct SpellCorrector {
    tables: HmmTables,
    decoder: ViterbiDecoder,
    config: CorrectorConfig,
}

impl SpellCorrector {
    pub fn new(tables: HmmTables, config: CorrectorConfig) -> Result<Self> {
        let decoder = ViterbiDecoder::with_floor(&tables, config.floor_probability)?;
        Ok(SpellCorrector {
            tables,
            decoder,
            config,
        })
    }

    pub fn from_pairs(pairs: &[TrainingPair], config: CorrectorConfig) -> Result<Self> {
        Self::new(estimate(pairs)?, config)
    }

    pub fn from_corpus_file(file_path: impl AsRef<Path>, config: CorrectorConfig) -> Result<Self> {
        let pairs = load_corpus(file_path)?;
        Self::from_pairs(&pairs, config)
    }

    /// Writes the model tables as JSON, replacing `file_path` atomically.
    pub fn save(&self, file_path: impl AsRef<Path>) -> Result<()> {
        let path = file_path.as_ref();
        let parent_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer(&mut writer, &self.tables)?;
            writer.flush()?;
        }
        temp_file.persist(path)?;

        info!(path = %path.display(), states = self.tables.emission.len(), "saved spelling model");
        Ok(())
    }

    pub fn load(file_path: impl AsRef<Path>, config: CorrectorConfig) -> Result<Self> {
        let path = file_path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let tables: HmmTables = serde_json::from_reader(reader)?;
        info!(path = %path.display(), states = tables.emission.len(), "loaded spelling model");
        Self::new(tables, config)
    }

    pub fn tables(&self) -> &HmmTables {
        &self.tables
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    pub fn state_space(&self) -> &[char] {
        self.decoder.states()
    }

    pub fn correct_word(&self, word: &str) -> String {
        if self.config.lowercase_input {
            self.decoder.correct_word(&word.to_lowercase())
        } else {
            self.decoder.correct_word(word)
        }
    }

    /// Corrects every whitespace-delimited token of `text` in parallel and
    /// rejoins them with single spaces.
    pub fn correct_text(&self, text: &str) -> String {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        tokens
            .par_iter()
            .map(|token| self.correct_word(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn correct_words(&self, words: &[String]) -> Vec<String> {
        words
            .par_iter()
            .map(|word| self.correct_word(word))
            .collect()
    }
}
