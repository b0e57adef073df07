use log::debug;

use super::*;

const ERROR_STATE_NAME: &str = "ERROR";

/// Represent a [`Dfa`] whose transition function is total.
///
/// Every missing transition of the source automaton leads to a single non-accepting error state
/// looping on every symbol. The transition table is stored row-major, one row of `alphabet.len()` targets per state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletedDfa {
    state_names: Vec<String>,
    alphabet: Vec<Symbol>,
    transitions: Vec<State>,
    start_state: State,
    accept_states: Vec<bool>,
    error_state: Option<State>,
}

impl Dfa {
    /// Make the transition function total.
    ///
    /// The error state is only added when at least one transition is missing.
    pub fn complete(&self) -> CompletedDfa {
        let number_of_symbols = self.alphabet.len();
        let needs_error_state = !self.is_total();

        let mut state_names = self.state_names.clone();
        let mut accept_states: Vec<bool> = self
            .states_iter()
            .map(|state| self.accept_states.contains(&state))
            .collect();

        let error_state = if needs_error_state {
            let names: AHashSet<&str> = self.state_names.iter().map(|n| n.as_str()).collect();
            let mut error_name = ERROR_STATE_NAME.to_string();
            while names.contains(error_name.as_str()) {
                error_name.push('\'');
            }
            state_names.push(error_name);
            accept_states.push(false);
            Some(state_names.len() - 1)
        } else {
            None
        };

        let mut transitions = Vec::with_capacity(state_names.len() * number_of_symbols);
        let mut added_transitions = 0;
        for row in &self.transitions {
            for to_state in row {
                match (to_state, error_state) {
                    (Some(to_state), _) => transitions.push(*to_state),
                    (None, Some(error_state)) => {
                        added_transitions += 1;
                        transitions.push(error_state);
                    }
                    (None, None) => unreachable!("a total automaton has no missing transition"),
                }
            }
        }
        if let Some(error_state) = error_state {
            transitions.extend(std::iter::repeat(error_state).take(number_of_symbols));
            debug!(
                "Completion added the error state '{}' and {} transitions.",
                state_names[error_state], added_transitions
            );
        }

        CompletedDfa {
            state_names,
            alphabet: self.alphabet.clone(),
            transitions,
            start_state: self.start_state,
            accept_states,
            error_state,
        }
    }
}

impl CompletedDfa {
    #[inline]
    pub fn states_iter(&self) -> impl Iterator<Item = State> {
        0..self.state_names.len()
    }

    #[inline]
    pub fn get_number_of_states(&self) -> usize {
        self.state_names.len()
    }

    #[inline]
    pub fn get_number_of_symbols(&self) -> usize {
        self.alphabet.len()
    }

    #[inline]
    pub fn get_alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    #[inline]
    pub fn get_state_name(&self, state: State) -> &str {
        &self.state_names[state]
    }

    #[inline]
    pub fn get_start_state(&self) -> State {
        self.start_state
    }

    #[inline]
    pub fn get_error_state(&self) -> Option<State> {
        self.error_state
    }

    #[inline]
    pub fn is_accepted(&self, state: State) -> bool {
        self.accept_states[state]
    }

    /// Return the target of the transition leaving `from_state` on the symbol at index `symbol`.
    #[inline]
    pub fn next_state(&self, from_state: State, symbol: usize) -> State {
        self.transitions[from_state * self.alphabet.len() + symbol]
    }

    /// Return the targets of every transition leaving `from_state`, in alphabet order.
    #[inline]
    pub fn get_row(&self, from_state: State) -> &[State] {
        let number_of_symbols = self.alphabet.len();
        &self.transitions[from_state * number_of_symbols..(from_state + 1) * number_of_symbols]
    }

    /// For each symbol, the states reaching a given target on that symbol.
    ///
    /// The result is indexed by `symbol * number_of_states + target`.
    pub fn get_preimage_index(&self) -> Vec<Vec<State>> {
        let number_of_states = self.get_number_of_states();
        let mut preimage = vec![vec![]; number_of_states * self.alphabet.len()];
        for from_state in self.states_iter() {
            for (symbol, to_state) in self.get_row(from_state).iter().enumerate() {
                preimage[symbol * number_of_states + to_state].push(from_state);
            }
        }
        preimage
    }

    pub fn accepts<S: AsRef<str>>(&self, word: &[S]) -> bool {
        let mut state = self.start_state;
        for symbol in word {
            match self
                .alphabet
                .binary_search_by(|s| s.as_str().cmp(symbol.as_ref()))
            {
                Ok(symbol) => state = self.next_state(state, symbol),
                Err(_) => return false,
            }
        }
        self.accept_states[state]
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::three_states;

    use super::*;

    #[test]
    fn test_complete_total() -> Result<(), String> {
        let completed = Dfa::new(&three_states()).unwrap().complete();
        assert_eq!(None, completed.get_error_state());
        assert_eq!(3, completed.get_number_of_states());
        assert_eq!(&[1, 0], completed.get_row(0));
        assert_eq!(2, completed.next_state(1, 1));
        Ok(())
    }

    #[test]
    fn test_complete_partial() -> Result<(), String> {
        let dfa = Dfa::new(&[
            StateRecord::new("A", true, false).with_transition("a", "B"),
            StateRecord::new("B", false, true).with_transition("b", "A"),
            StateRecord::new("ERROR", false, false),
        ])
        .unwrap();
        let completed = dfa.complete();

        assert_eq!(4, completed.get_number_of_states());
        assert_eq!(Some(3), completed.get_error_state());
        assert_eq!("ERROR'", completed.get_state_name(3));
        assert!(!completed.is_accepted(3));
        assert_eq!(&[1, 3], completed.get_row(0));
        assert_eq!(&[3, 0], completed.get_row(1));
        assert_eq!(&[3, 3], completed.get_row(2));
        assert_eq!(&[3, 3], completed.get_row(3));
        Ok(())
    }

    #[test]
    fn test_preimage_index() -> Result<(), String> {
        let completed = Dfa::new(&three_states()).unwrap().complete();
        let preimage = completed.get_preimage_index();
        // on "0": A -> B, B -> A, C -> C
        assert_eq!(vec![1], preimage[0]);
        assert_eq!(vec![0], preimage[1]);
        assert_eq!(vec![2], preimage[2]);
        // on "1": A -> A, B -> C, C -> C
        assert_eq!(vec![0], preimage[3]);
        assert!(preimage[4].is_empty());
        assert_eq!(vec![1, 2], preimage[5]);
        Ok(())
    }

    #[test]
    fn test_accepts() -> Result<(), String> {
        let completed = Dfa::new(&three_states()).unwrap().complete();
        assert!(!completed.accepts::<&str>(&[]));
        assert!(completed.accepts(&["0", "1"]));
        assert!(completed.accepts(&["0", "1", "0", "0"]));
        assert!(!completed.accepts(&["1", "1"]));
        assert!(!completed.accepts(&["0", "2"]));
        Ok(())
    }
}
