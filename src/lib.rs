//! Noisy-channel spelling correction.
//!
//! A character-level hidden Markov model is estimated from `(correct, typo)`
//! pairs: emission probabilities describe how an intended letter is typed,
//! transition probabilities describe how intended letters follow each other
//! between word boundaries. Viterbi decoding then recovers the most likely
//! intended letters for each observed word.
//!
//! ```
//! use spellfix::{estimate, correct_word, TrainingPair};
//!
//! let pairs: Vec<TrainingPair> = vec![
//!     ("hello", "helo").into(),
//!     ("hello", "hwllo").into(),
//!     ("world", "wrld").into(),
//! ];
//! let tables = estimate(&pairs)?;
//! assert_eq!(correct_word(&tables, "hwllo")?, "hello");
//! # Ok::<(), spellfix::SpellfixError>(())
//! ```

pub mod corpus;
pub mod corrector;
pub mod decoder;
pub mod error;
pub mod estimator;
pub mod tables;

pub use corpus::{load_corpus, parse_corpus};
pub use corrector::{CorrectorConfig, SpellCorrector};
pub use decoder::{DEFAULT_FLOOR_PROBABILITY, Decoding, ViterbiDecoder, correct_text, correct_word};
pub use error::{Result, SpellfixError};
pub use estimator::estimate;
pub use tables::{EmissionTable, HmmTables, Symbol, TrainingPair, TransitionTable};
