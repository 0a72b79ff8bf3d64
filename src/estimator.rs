use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{Result, SpellfixError};
use crate::tables::{EmissionTable, HmmTables, Symbol, TrainingPair, TransitionTable};

type Counts<K, V> = BTreeMap<K, BTreeMap<V, u64>>;

/// Turns each row of counts into a probability distribution.
/// Rows with a zero total are dropped rather than divided.
fn normalize<K: Ord, V: Ord>(counts: Counts<K, V>) -> BTreeMap<K, BTreeMap<V, f64>> {
    counts
        .into_iter()
        .filter_map(|(key, row)| {
            let total: u64 = row.values().sum();
            if total == 0 {
                return None;
            }
            let distribution = row
                .into_iter()
                .map(|(value, count)| (value, count as f64 / total as f64))
                .collect();
            Some((key, distribution))
        })
        .collect()
}

/// Counts intended-to-observed letter substitutions at aligned positions.
/// Alignment stops at the shorter word, so insertions and deletions are not
/// modelled.
fn count_emissions(pairs: &[TrainingPair]) -> Counts<char, char> {
    let mut counts: Counts<char, char> = BTreeMap::new();
    for pair in pairs {
        for (intended, observed) in pair.correct.chars().zip(pair.typo.chars()) {
            *counts
                .entry(intended)
                .or_default()
                .entry(observed)
                .or_default() += 1;
        }
    }
    counts
}

/// Counts letter bigrams of the correct words, framed by `Start` and `End`.
fn count_transitions(pairs: &[TrainingPair]) -> Counts<Symbol, Symbol> {
    let mut counts: Counts<Symbol, Symbol> = BTreeMap::new();
    for pair in pairs {
        let mut previous = Symbol::Start;
        for letter in pair.correct.chars() {
            let next = Symbol::Char(letter);
            *counts.entry(previous).or_default().entry(next).or_default() += 1;
            previous = next;
        }
        *counts
            .entry(previous)
            .or_default()
            .entry(Symbol::End)
            .or_default() += 1;
    }
    counts
}

/// Estimates emission and transition tables from `(correct, typo)` pairs.
///
/// Fails with [`SpellfixError::Configuration`] when `pairs` is empty.
pub fn estimate(pairs: &[TrainingPair]) -> Result<HmmTables> {
    if pairs.is_empty() {
        return Err(SpellfixError::configuration(
            "cannot estimate a model without training pairs",
        ));
    }

    let emission = EmissionTable::new(normalize(count_emissions(pairs)));
    let transition = TransitionTable::new(normalize(count_transitions(pairs)));

    debug!(
        pairs = pairs.len(),
        states = emission.len(),
        transition_rows = transition.len(),
        "estimated spelling model"
    );

    Ok(HmmTables {
        emission,
        transition,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn toy_pairs() -> Vec<TrainingPair> {
        vec![
            ("hello", "helo").into(),
            ("hello", "hwllo").into(),
            ("world", "wrld").into(),
        ]
    }

    #[test]
    fn test_estimate_rejects_empty_corpus() {
        match estimate(&[]) {
            Err(SpellfixError::Configuration(_)) => {}
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_distributions_are_normalized() {
        let tables = estimate(&toy_pairs()).unwrap();

        for state in tables.emission.states() {
            let sum: f64 = tables.emission.distribution(state).unwrap().values().sum();
            assert!((sum - 1.0).abs() < TOLERANCE, "emission row {} sums to {}", state, sum);
        }
        for symbol in tables.transition.symbols() {
            let sum: f64 = tables.transition.distribution(symbol).unwrap().values().sum();
            assert!((sum - 1.0).abs() < TOLERANCE, "transition row {} sums to {}", symbol, sum);
        }
    }

    #[test]
    fn test_toy_emission_counts() {
        let tables = estimate(&toy_pairs()).unwrap();
        let e = &tables.emission;

        assert_eq!(e.probability('h', 'h'), Some(1.0));
        assert_eq!(e.probability('e', 'e'), Some(0.5));
        assert_eq!(e.probability('e', 'w'), Some(0.5));
        // l: l,l,l (aligned with itself) + o (helo) + d (wrld)
        assert!((e.probability('l', 'l').unwrap() - 0.6).abs() < TOLERANCE);
        assert!((e.probability('l', 'o').unwrap() - 0.2).abs() < TOLERANCE);
        assert!((e.probability('l', 'd').unwrap() - 0.2).abs() < TOLERANCE);
        assert_eq!(e.probability('r', 'l'), Some(1.0));
        // 'd' in "world" falls past the end of "wrld" and is never aligned.
        assert_eq!(e.distribution('d'), None);
        assert_eq!(tables.state_space(), vec!['e', 'h', 'l', 'o', 'r', 'w']);
    }

    #[test]
    fn test_toy_transition_counts() {
        let tables = estimate(&toy_pairs()).unwrap();
        let t = &tables.transition;

        let start_h = t.probability(Symbol::Start, Symbol::Char('h')).unwrap();
        assert!((start_h - 2.0 / 3.0).abs() < TOLERANCE);
        assert_eq!(t.probability(Symbol::Char('h'), Symbol::Char('e')), Some(1.0));
        assert!((t.probability(Symbol::Char('l'), Symbol::Char('l')).unwrap() - 0.4).abs() < TOLERANCE);
        assert_eq!(t.probability(Symbol::Char('d'), Symbol::End), Some(1.0));
        // Typos never contribute transitions.
        assert_eq!(t.probability(Symbol::Char('w'), Symbol::Char('r')), None);
        assert_eq!(t.distribution(Symbol::End), None);
    }

    #[test]
    fn test_identical_pairs_give_identity_emissions() {
        let pairs: Vec<TrainingPair> = (0..50).map(|_| ("cat", "cat").into()).collect();
        let tables = estimate(&pairs).unwrap();

        for letter in ['c', 'a', 't'] {
            assert!((tables.emission.probability(letter, letter).unwrap() - 1.0).abs() < TOLERANCE);
        }
        assert_eq!(tables.transition.probability(Symbol::Char('t'), Symbol::End), Some(1.0));
    }

    #[test]
    fn test_case_distinct_letters_are_distinct_states() {
        let tables = estimate(&[TrainingPair::new("Ab", "ab")]).unwrap();
        assert_eq!(tables.state_space(), vec!['A', 'b']);
        assert_eq!(tables.emission.probability('A', 'a'), Some(1.0));
    }
}
