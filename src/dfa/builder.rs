use super::*;

impl Dfa {
    /// Validate the given records and build the automaton they describe.
    ///
    /// The alphabet is the set of every symbol appearing in a transition.
    ///
    /// # Example:
    ///
    /// ```
    /// use dfaminimizer::dfa::{Dfa, StateRecord};
    ///
    /// let dfa = Dfa::new(&[
    ///     StateRecord::new("A", true, false).with_transition("a", "B"),
    ///     StateRecord::new("B", false, true),
    /// ]).unwrap();
    ///
    /// assert_eq!(2, dfa.get_number_of_states());
    /// assert!(!dfa.is_total());
    /// ```
    pub fn new(records: &[StateRecord]) -> Result<Self, EngineError> {
        let mut alphabet: Vec<Symbol> = records
            .iter()
            .flat_map(|record| record.transitions.iter().map(|t| t.input.clone()))
            .collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        Self::build(records, alphabet)
    }

    /// Same as [`Dfa::new`] but with a declared alphabet: transitions on any other symbol are rejected,
    /// and declared symbols without transitions are still part of the alphabet.
    pub fn with_alphabet(records: &[StateRecord], alphabet: &[&str]) -> Result<Self, EngineError> {
        let mut alphabet: Vec<Symbol> = alphabet.iter().map(|s| s.to_string()).collect();
        alphabet.sort_unstable();
        alphabet.dedup();
        Self::build(records, alphabet)
    }

    fn build(records: &[StateRecord], alphabet: Vec<Symbol>) -> Result<Self, EngineError> {
        let execution_profile = ThreadLocalParams::get_execution_profile();
        execution_profile.assert_number_of_states(records.len())?;
        execution_profile.assert_number_of_symbols(alphabet.len())?;

        let mut name_to_state: AHashMap<&str, State> = AHashMap::with_capacity(records.len());
        for (state, record) in records.iter().enumerate() {
            if record.state_name.is_empty() {
                return Err(MalformedInputError::EmptyStateName.into());
            }
            if name_to_state.insert(record.state_name.as_str(), state).is_some() {
                return Err(MalformedInputError::DuplicateState(record.state_name.clone()).into());
            }
        }

        let start_states: Vec<&StateRecord> = records.iter().filter(|r| r.is_start).collect();
        let start_state = match start_states.as_slice() {
            [] => return Err(MalformedInputError::NoStartState.into()),
            [start] => name_to_state[start.state_name.as_str()],
            _ => {
                return Err(MalformedInputError::MultipleStartStates(
                    start_states.iter().map(|r| r.state_name.clone()).collect(),
                )
                .into())
            }
        };

        let symbol_to_index: AHashMap<&str, usize> = alphabet
            .iter()
            .enumerate()
            .map(|(index, symbol)| (symbol.as_str(), index))
            .collect();

        let mut transitions = vec![vec![None; alphabet.len()]; records.len()];
        let mut accept_states = IntSet::default();
        for (from_state, record) in records.iter().enumerate() {
            if record.is_end {
                accept_states.insert(from_state);
            }
            for transition in &record.transitions {
                let to_state = match name_to_state.get(transition.target_state.as_str()) {
                    Some(to_state) => *to_state,
                    None => {
                        return Err(MalformedInputError::UnknownState {
                            state: record.state_name.clone(),
                            target: transition.target_state.clone(),
                        }
                        .into())
                    }
                };
                let symbol = match symbol_to_index.get(transition.input.as_str()) {
                    Some(symbol) => *symbol,
                    None => {
                        return Err(MalformedInputError::UnknownSymbol {
                            state: record.state_name.clone(),
                            symbol: transition.input.clone(),
                        }
                        .into())
                    }
                };
                match transitions[from_state][symbol] {
                    None => transitions[from_state][symbol] = Some(to_state),
                    Some(existing) if existing == to_state => {}
                    Some(_) => {
                        return Err(MalformedInputError::NondeterministicTransition {
                            state: record.state_name.clone(),
                            symbol: transition.input.clone(),
                        }
                        .into())
                    }
                }
            }
        }

        Ok(Dfa {
            state_names: records.iter().map(|r| r.state_name.clone()).collect(),
            alphabet,
            transitions,
            start_state,
            accept_states,
        })
    }
}
