//! Random automata, used to feed the benchmarks and the property tests.

use ahash::AHashSet;
use log::debug;
use rand::Rng;

use crate::dfa::{StateRecord, TransitionRecord};

/// Generate a total automaton of `number_of_states` states over the symbols `"0"` to `"alphabet_size - 1"`.
///
/// The states are named `q0`, `q1`, ... with `q0` as the start state. Every target is drawn uniformly, every state is
/// accepting with probability 1/2, and the last state is made accepting if none was drawn.
///
/// # Example:
///
/// ```
/// use dfaminimizer::{dfa::Dfa, generate::random_dfa};
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let dfa = Dfa::new(&random_dfa(5, 3, &mut rng)).unwrap();
///
/// assert_eq!(5, dfa.get_number_of_states());
/// assert!(dfa.is_total());
/// ```
pub fn random_dfa<R: Rng + ?Sized>(
    number_of_states: usize,
    alphabet_size: usize,
    rng: &mut R,
) -> Vec<StateRecord> {
    if number_of_states == 0 {
        return vec![];
    }

    let mut records: Vec<StateRecord> = (0..number_of_states)
        .map(|state| {
            let mut record =
                StateRecord::new(&format!("q{state}"), state == 0, rng.gen_bool(0.5));
            for symbol in 0..alphabet_size {
                let target = rng.gen_range(0..number_of_states);
                record = record.with_transition(&symbol.to_string(), &format!("q{target}"));
            }
            record
        })
        .collect();

    if !records.iter().any(|record| record.is_end) {
        if let Some(last) = records.last_mut() {
            last.is_end = true;
        }
    }
    records
}

/// Grow `records` to `target_size` states without changing the recognized language.
///
/// Each step clones a random state, keeping its finality and its outgoing transitions, then redirects every transition
/// entering the cloned state to the clone with probability 1/2. A clone is named after its original followed by `'`.
pub fn expand<R: Rng + ?Sized>(records: &mut Vec<StateRecord>, target_size: usize, rng: &mut R) {
    if records.is_empty() {
        return;
    }
    let mut names: AHashSet<String> = records.iter().map(|r| r.state_name.clone()).collect();
    let mut redirected = 0;

    while records.len() < target_size {
        let original = rng.gen_range(0..records.len());
        let mut clone = records[original].clone();
        clone.is_start = false;
        clone.state_name.push('\'');
        while names.contains(&clone.state_name) {
            clone.state_name.push('\'');
        }
        names.insert(clone.state_name.clone());

        let original_name = records[original].state_name.clone();
        for record in records.iter_mut() {
            for TransitionRecord { target_state, .. } in record.transitions.iter_mut() {
                if *target_state == original_name && rng.gen_bool(0.5) {
                    target_state.clone_from(&clone.state_name);
                    redirected += 1;
                }
            }
        }
        records.push(clone);
    }
    debug!(
        "Expanded the automaton to {} states, {redirected} transitions redirected.",
        records.len()
    );
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use crate::dfa::Dfa;
    use crate::minimizer::Algorithm;

    use super::*;

    #[test]
    fn test_random_dfa() -> Result<(), String> {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let records = random_dfa(8, 3, &mut rng);
            let dfa = Dfa::new(&records).unwrap();
            assert_eq!(8, dfa.get_number_of_states());
            assert_eq!(24, dfa.get_number_of_transitions());
            assert_eq!("q0", dfa.get_state_name(dfa.get_start_state()));
            assert!(!dfa.get_accept_states().is_empty());
        }
        assert!(random_dfa(0, 3, &mut rng).is_empty());
        Ok(())
    }

    #[test]
    fn test_expand_keeps_the_language() -> Result<(), String> {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10 {
            let mut records = random_dfa(5, 2, &mut rng);
            let minimal = Dfa::new(&records)
                .unwrap()
                .minimize(Algorithm::Hopcroft)
                .unwrap();

            expand(&mut records, 20, &mut rng);
            let expanded = Dfa::new(&records).unwrap();
            assert_eq!(20, expanded.get_number_of_states());
            assert_eq!(
                1,
                records.iter().filter(|record| record.is_start).count()
            );

            for algorithm in Algorithm::ALL {
                let minimized = expanded.minimize(algorithm).unwrap();
                assert!(minimized.is_isomorphic_to(&minimal));
            }
        }
        Ok(())
    }

    #[test]
    fn test_expand_clone_names() -> Result<(), String> {
        let mut rng = StdRng::seed_from_u64(3);
        let mut records = vec![StateRecord::new("A", true, true).with_transition("a", "A")];
        expand(&mut records, 3, &mut rng);
        let names: Vec<&str> = records.iter().map(|r| r.state_name.as_str()).collect();
        assert_eq!(3, names.len());
        assert_eq!("A", names[0]);
        assert!(names[1..].iter().all(|name| name.starts_with("A'")));
        assert_ne!(names[1], names[2]);
        Ok(())
    }
}
