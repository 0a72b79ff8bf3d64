use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const START_TOKEN: &str = "<s>";
const END_TOKEN: &str = "</s>";

/// A node of the transition table: a letter, or one of the word boundaries.
///
/// `Start` only ever appears as a "previous" symbol and `End` only as a
/// "next" symbol. Ordering puts `Start` first and `End` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Symbol {
    Start,
    Char(char),
    End,
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Start => f.write_str(START_TOKEN),
            Symbol::Char(c) => write!(f, "{}", c),
            Symbol::End => f.write_str(END_TOKEN),
        }
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.to_string()
    }
}

impl TryFrom<String> for Symbol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            START_TOKEN => Ok(Symbol::Start),
            END_TOKEN => Ok(Symbol::End),
            _ => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Symbol::Char(c)),
                    _ => Err(format!("invalid transition symbol: {:?}", value)),
                }
            }
        }
    }
}

/// One observed misspelling of a correctly spelled word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingPair {
    pub correct: String,
    pub typo: String,
}

impl TrainingPair {
    pub fn new(correct: impl Into<String>, typo: impl Into<String>) -> Self {
        TrainingPair {
            correct: correct.into(),
            typo: typo.into(),
        }
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for TrainingPair {
    fn from((correct, typo): (A, B)) -> Self {
        TrainingPair::new(correct, typo)
    }
}

/// `P(observed | intended)`, keyed by intended letter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionTable(BTreeMap<char, BTreeMap<char, f64>>);

impl EmissionTable {
    pub fn new(rows: BTreeMap<char, BTreeMap<char, f64>>) -> Self {
        EmissionTable(rows)
    }

    pub fn probability(&self, intended: char, observed: char) -> Option<f64> {
        self.0.get(&intended)?.get(&observed).copied()
    }

    pub fn distribution(&self, intended: char) -> Option<&BTreeMap<char, f64>> {
        self.0.get(&intended)
    }

    /// Intended letters in ascending order. This is the decoder's state space.
    pub fn states(&self) -> impl Iterator<Item = char> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `P(next | previous)` over letters and word boundaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransitionTable(BTreeMap<Symbol, BTreeMap<Symbol, f64>>);

impl TransitionTable {
    pub fn new(rows: BTreeMap<Symbol, BTreeMap<Symbol, f64>>) -> Self {
        TransitionTable(rows)
    }

    pub fn probability(&self, previous: Symbol, next: Symbol) -> Option<f64> {
        self.0.get(&previous)?.get(&next).copied()
    }

    pub fn distribution(&self, previous: Symbol) -> Option<&BTreeMap<Symbol, f64>> {
        self.0.get(&previous)
    }

    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The estimated model. Immutable once built; decoders only read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HmmTables {
    pub emission: EmissionTable,
    pub transition: TransitionTable,
}

impl HmmTables {
    pub fn state_space(&self) -> Vec<char> {
        self.emission.states().collect()
    }
}
