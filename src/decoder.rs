//! Viterbi decoding of a single observed word.
//!
//! Scores are kept in log space. Any emission or transition missing from the
//! tables is scored with a floor probability, so every non-empty word decodes
//! to some answer drawn from the trained state space.

use std::collections::HashMap;

use crate::error::{Result, SpellfixError};
use crate::tables::{HmmTables, Symbol};

pub const DEFAULT_FLOOR_PROBABILITY: f64 = 1e-6;

/// Most likely intended letters for one observed word.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoding {
    pub path: Vec<char>,
    /// Log-probability of `path` including the transition into `End`.
    pub log_probability: f64,
}

/// A decoder with the model's log-probabilities laid out per state index.
///
/// States are the intended letters of the emission table in ascending order.
/// When two candidates score equally, the lower-sorted one is kept.
#[derive(Debug, Clone)]
pub struct ViterbiDecoder {
    states: Vec<char>,
    floor_ln: f64,
    start_ln: Vec<f64>,
    end_ln: Vec<f64>,
    /// Row-major `[previous * n + next]`.
    transition_ln: Vec<f64>,
    emission_ln: Vec<HashMap<char, f64>>,
}

impl ViterbiDecoder {
    pub fn new(tables: &HmmTables) -> Result<Self> {
        Self::with_floor(tables, DEFAULT_FLOOR_PROBABILITY)
    }

    pub fn with_floor(tables: &HmmTables, floor_probability: f64) -> Result<Self> {
        if !(floor_probability > 0.0 && floor_probability <= 1.0) {
            return Err(SpellfixError::configuration(format!(
                "floor probability must be in (0, 1], got {}",
                floor_probability
            )));
        }
        let states = tables.state_space();
        if states.is_empty() {
            return Err(SpellfixError::configuration(
                "emission table has no states to decode into",
            ));
        }

        let floor_ln = floor_probability.ln();
        let transition = |from: Symbol, to: Symbol| {
            tables
                .transition
                .probability(from, to)
                .unwrap_or(floor_probability)
                .ln()
        };

        let start_ln: Vec<f64> = states
            .iter()
            .map(|&s| transition(Symbol::Start, Symbol::Char(s)))
            .collect();
        let end_ln: Vec<f64> = states
            .iter()
            .map(|&s| transition(Symbol::Char(s), Symbol::End))
            .collect();
        let mut transition_ln = Vec::with_capacity(states.len() * states.len());
        for &previous in &states {
            for &next in &states {
                transition_ln.push(transition(Symbol::Char(previous), Symbol::Char(next)));
            }
        }
        let emission_ln: Vec<HashMap<char, f64>> = states
            .iter()
            .map(|&s| {
                tables
                    .emission
                    .distribution(s)
                    .map(|row| row.iter().map(|(&o, &p)| (o, p.ln())).collect::<HashMap<_, _>>())
                    .unwrap_or_default()
            })
            .collect();

        Ok(ViterbiDecoder {
            states,
            floor_ln,
            start_ln,
            end_ln,
            transition_ln,
            emission_ln,
        })
    }

    pub fn states(&self) -> &[char] {
        &self.states
    }

    fn emission(&self, state: usize, observed: char) -> f64 {
        self.emission_ln[state]
            .get(&observed)
            .copied()
            .unwrap_or(self.floor_ln)
    }

    /// Runs Viterbi over `observed`. An empty observation decodes to an empty
    /// path with log-probability zero.
    pub fn decode(&self, observed: &[char]) -> Decoding {
        let Some((&first, rest)) = observed.split_first() else {
            return Decoding {
                path: Vec::new(),
                log_probability: 0.0,
            };
        };
        let n = self.states.len();

        let mut scores: Vec<f64> = (0..n)
            .map(|s| self.emission(s, first) + self.start_ln[s])
            .collect();
        let mut backpointers: Vec<Vec<usize>> = Vec::with_capacity(rest.len());

        for &letter in rest {
            let mut next_scores = vec![f64::NEG_INFINITY; n];
            let mut psi = vec![0usize; n];
            for state in 0..n {
                let em = self.emission(state, letter);
                for previous in 0..n {
                    let score = scores[previous] + self.transition_ln[previous * n + state] + em;
                    if score > next_scores[state] {
                        next_scores[state] = score;
                        psi[state] = previous;
                    }
                }
            }
            scores = next_scores;
            backpointers.push(psi);
        }

        let mut best_state = 0;
        let mut best_score = f64::NEG_INFINITY;
        for state in 0..n {
            let score = scores[state] + self.end_ln[state];
            if score > best_score {
                best_score = score;
                best_state = state;
            }
        }

        let mut path = Vec::with_capacity(observed.len());
        path.push(self.states[best_state]);
        let mut state = best_state;
        for psi in backpointers.iter().rev() {
            state = psi[state];
            path.push(self.states[state]);
        }
        path.reverse();

        Decoding {
            path,
            log_probability: best_score,
        }
    }

    pub fn correct_word(&self, word: &str) -> String {
        let observed: Vec<char> = word.chars().collect();
        self.decode(&observed).path.into_iter().collect()
    }

    /// Corrects each whitespace-delimited token and rejoins them with single
    /// spaces.
    pub fn correct_text(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.correct_word(token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Decodes one word against `tables` using the default floor probability.
pub fn correct_word(tables: &HmmTables, word: &str) -> Result<String> {
    Ok(ViterbiDecoder::new(tables)?.correct_word(word))
}

pub fn correct_text(tables: &HmmTables, text: &str) -> Result<String> {
    Ok(ViterbiDecoder::new(tables)?.correct_text(text))
}
