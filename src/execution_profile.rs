use std::cell::RefCell;

use crate::error::EngineError;

/// Hold information about limitations and constraints of minimization:
/// - max_number_of_states: the maximum number of states an input automaton can declare.
/// - max_number_of_symbols: the maximum size of the alphabet of an input automaton.
/// - max_number_of_pairs: the maximum number of state pairs the table-filling engine is allowed to allocate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionProfile {
    pub max_number_of_states: usize,
    pub max_number_of_symbols: usize,
    pub max_number_of_pairs: usize,
}

impl Default for ExecutionProfile {
    fn default() -> Self {
        ExecutionProfile {
            max_number_of_states: 100_000,
            max_number_of_symbols: 4_096,
            max_number_of_pairs: 1 << 31,
        }
    }
}

impl ExecutionProfile {
    pub fn assert_number_of_states(&self, number_of_states: usize) -> Result<(), EngineError> {
        if number_of_states > self.max_number_of_states {
            Err(EngineError::AutomatonHasTooManyStates)
        } else {
            Ok(())
        }
    }

    pub fn assert_number_of_symbols(&self, number_of_symbols: usize) -> Result<(), EngineError> {
        if number_of_symbols > self.max_number_of_symbols {
            Err(EngineError::AutomatonHasTooManySymbols)
        } else {
            Ok(())
        }
    }

    pub fn assert_number_of_pairs(&self, number_of_states: usize) -> Result<(), EngineError> {
        let pairs = number_of_states
            .checked_mul(number_of_states.saturating_sub(1))
            .map(|p| p / 2);
        match pairs {
            Some(pairs) if pairs <= self.max_number_of_pairs => Ok(()),
            _ => Err(EngineError::AutomatonHasTooManyStates),
        }
    }
}

pub struct ThreadLocalParams;
impl ThreadLocalParams {
    thread_local! {
        static MAX_NUMBER_OF_STATES: RefCell<usize> = const { RefCell::new(100_000) };
        static MAX_NUMBER_OF_SYMBOLS: RefCell<usize> = const { RefCell::new(4_096) };
        static MAX_NUMBER_OF_PAIRS: RefCell<usize> = const { RefCell::new(1 << 31) };
    }

    /// Initialize the thread local holding the ExecutionProfile.
    pub fn init_profile(profile: &ExecutionProfile) {
        ThreadLocalParams::MAX_NUMBER_OF_STATES.with(|cell| {
            *cell.borrow_mut() = profile.max_number_of_states;
        });

        ThreadLocalParams::MAX_NUMBER_OF_SYMBOLS.with(|cell| {
            *cell.borrow_mut() = profile.max_number_of_symbols;
        });

        ThreadLocalParams::MAX_NUMBER_OF_PAIRS.with(|cell| {
            *cell.borrow_mut() = profile.max_number_of_pairs;
        });
    }

    pub fn get_max_number_of_states() -> usize {
        ThreadLocalParams::MAX_NUMBER_OF_STATES.with(|cell| *cell.borrow())
    }

    pub fn get_max_number_of_symbols() -> usize {
        ThreadLocalParams::MAX_NUMBER_OF_SYMBOLS.with(|cell| *cell.borrow())
    }

    pub fn get_max_number_of_pairs() -> usize {
        ThreadLocalParams::MAX_NUMBER_OF_PAIRS.with(|cell| *cell.borrow())
    }

    pub fn get_execution_profile() -> ExecutionProfile {
        ExecutionProfile {
            max_number_of_states: Self::get_max_number_of_states(),
            max_number_of_symbols: Self::get_max_number_of_symbols(),
            max_number_of_pairs: Self::get_max_number_of_pairs(),
        }
    }
}
