use std::{
    collections::{HashMap, HashSet},
    hash::BuildHasherDefault,
    thread,
    time::{Duration, Instant},
};

use dfa::{CompletedDfa, Dfa, StateRecord};
use error::EngineError;
use execution_profile::ThreadLocalParams;
use log::{debug, info};
use nohash_hasher::NoHashHasher;
use serde::{Deserialize, Serialize};

pub mod dfa;
pub mod error;
pub mod execution_profile;
pub mod generate;
pub mod minimizer;
pub mod partition;

#[cfg(test)]
mod fixtures;

pub use minimizer::{Algorithm, Totality};

type IntMap<Key, Value> = HashMap<Key, Value, BuildHasherDefault<NoHashHasher<Key>>>;
type IntSet<Key> = HashSet<Key, BuildHasherDefault<NoHashHasher<Key>>>;

/// Validate the given state records and complete the resulting automaton with an error state if needed.
///
/// # Example:
///
/// ```
/// use dfaminimizer::dfa::StateRecord;
///
/// let completed = dfaminimizer::complete(&[
///     StateRecord::new("A", true, false).with_transition("a", "B"),
///     StateRecord::new("B", false, true),
/// ]).unwrap();
///
/// assert_eq!(3, completed.get_number_of_states());
/// assert_eq!(Some(2), completed.get_error_state());
/// ```
pub fn complete(records: &[StateRecord]) -> Result<CompletedDfa, EngineError> {
    Ok(Dfa::new(records)?.complete())
}

/// Minimize the automaton described by the given state records.
/// Returns the minimized automaton along with the time it took.
///
/// # Example:
///
/// ```
/// use dfaminimizer::{Algorithm, dfa::StateRecord};
///
/// let report = dfaminimizer::minimize(&[
///     StateRecord::new("A", true, false).with_transition("a", "B").with_transition("b", "C"),
///     StateRecord::new("B", false, true).with_transition("a", "B"),
///     StateRecord::new("C", false, true).with_transition("a", "C"),
/// ], Algorithm::Moore).unwrap();
///
/// assert_eq!(3, report.get_number_of_states());
/// assert_eq!(2, report.get_number_of_minimized_states());
/// ```
pub fn minimize(
    records: &[StateRecord],
    algorithm: Algorithm,
) -> Result<MinimizationReport, EngineError> {
    minimize_with(records, algorithm, Totality::default())
}

/// See [`minimize`], choosing whether the minimized automaton keeps the block rejecting everything.
pub fn minimize_with(
    records: &[StateRecord],
    algorithm: Algorithm,
    totality: Totality,
) -> Result<MinimizationReport, EngineError> {
    let dfa = Dfa::new(records)?;
    let completed = dfa.complete();
    MinimizationReport::run(&completed, dfa.get_number_of_states(), algorithm, totality)
}

/// Run the three algorithms side by side on the automaton described by the given state records.
///
/// The automata they return must be identical up to the renaming of their states, anything else is reported as an
/// [`EngineError::AlgorithmInvariantViolation`].
pub fn compare(records: &[StateRecord]) -> Result<Vec<MinimizationReport>, EngineError> {
    compare_with(records, Totality::default())
}

/// See [`compare`].
pub fn compare_with(
    records: &[StateRecord],
    totality: Totality,
) -> Result<Vec<MinimizationReport>, EngineError> {
    let dfa = Dfa::new(records)?;
    let completed = dfa.complete();
    let number_of_states = dfa.get_number_of_states();
    let execution_profile = ThreadLocalParams::get_execution_profile();

    let reports = thread::scope(|scope| {
        let handles: Vec<_> = Algorithm::ALL
            .into_iter()
            .map(|algorithm| {
                let completed = &completed;
                let execution_profile = &execution_profile;
                scope.spawn(move || {
                    ThreadLocalParams::init_profile(execution_profile);
                    MinimizationReport::run(completed, number_of_states, algorithm, totality)
                })
            })
            .collect();

        handles
            .into_iter()
            .zip(Algorithm::ALL)
            .map(|(handle, algorithm)| {
                handle.join().unwrap_or_else(|_| {
                    Err(EngineError::AlgorithmInvariantViolation(format!(
                        "the {algorithm} worker panicked"
                    )))
                })
            })
            .collect::<Result<Vec<_>, EngineError>>()
    })?;

    for pair in reports.windows(2) {
        if !pair[0].automaton.is_isomorphic_to(&pair[1].automaton) {
            return Err(EngineError::AlgorithmInvariantViolation(format!(
                "{} and {} returned different automata",
                pair[0].algorithm, pair[1].algorithm
            )));
        }
    }
    Ok(reports)
}

/// Represents the outcome of a minimization.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MinimizationReport {
    algorithm: Algorithm,
    elapsed: Duration,
    number_of_states: usize,
    number_of_minimized_states: usize,
    automaton: Dfa,
}

impl MinimizationReport {
    /// The completion is left out of the measured time, only the partition and the building of the automaton count.
    fn run(
        completed: &CompletedDfa,
        number_of_states: usize,
        algorithm: Algorithm,
        totality: Totality,
    ) -> Result<Self, EngineError> {
        let start = Instant::now();
        let partition = completed.partition(algorithm)?;
        let automaton = completed.build_minimized(&partition, totality)?;
        let elapsed = start.elapsed();

        info!(
            "{algorithm}: {} states minimized to {} in {:?}.",
            number_of_states,
            automaton.get_number_of_states(),
            elapsed
        );
        debug!(
            "{algorithm}: {} blocks over {} completed states.",
            partition.get_number_of_blocks(),
            completed.get_number_of_states()
        );

        Ok(MinimizationReport {
            algorithm,
            elapsed,
            number_of_states,
            number_of_minimized_states: automaton.get_number_of_states(),
            automaton,
        })
    }

    /// Return the algorithm used.
    pub fn get_algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Return the time spent partitioning the states and building the minimized automaton.
    pub fn get_elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Return the number of states declared by the input.
    pub fn get_number_of_states(&self) -> usize {
        self.number_of_states
    }

    pub fn get_number_of_minimized_states(&self) -> usize {
        self.number_of_minimized_states
    }

    pub fn get_automaton(&self) -> &Dfa {
        &self.automaton
    }

    pub fn into_automaton(self) -> Dfa {
        self.automaton
    }
}
