use super::*;

impl Dfa {
    /// Run the automaton on the given word, a word using an unknown symbol or reaching a missing transition is rejected.
    ///
    /// # Example:
    ///
    /// ```
    /// use dfaminimizer::dfa::{Dfa, StateRecord};
    ///
    /// let dfa = Dfa::new(&[
    ///     StateRecord::new("A", true, false).with_transition("a", "B"),
    ///     StateRecord::new("B", false, true).with_transition("b", "A"),
    /// ]).unwrap();
    ///
    /// assert!(dfa.accepts(&["a", "b", "a"]));
    /// assert!(!dfa.accepts(&["a", "a"]));
    /// ```
    pub fn accepts<S: AsRef<str>>(&self, word: &[S]) -> bool {
        let mut state = self.start_state;
        for symbol in word {
            let next_state = self
                .get_symbol_index(symbol.as_ref())
                .and_then(|symbol| self.get_transition(state, symbol));
            match next_state {
                Some(next_state) => state = next_state,
                None => return false,
            }
        }
        self.accept_states.contains(&state)
    }

    pub fn get_reachable_states(&self) -> IntSet<State> {
        let mut reachable = IntSet::default();
        reachable.insert(self.start_state);

        let mut worklist = VecDeque::with_capacity(self.get_number_of_states());
        worklist.push_back(self.start_state);
        while let Some(state) = worklist.pop_front() {
            for (_, to_state) in self.transitions_from_state_enumerate_iter(state) {
                if reachable.insert(to_state) {
                    worklist.push_back(to_state);
                }
            }
        }
        reachable
    }

    /// Return the states from which an accept state can be reached.
    pub fn get_live_states(&self) -> IntSet<State> {
        let mut predecessors: IntMap<State, Vec<State>> = IntMap::default();
        for from_state in self.states_iter() {
            for (_, to_state) in self.transitions_from_state_enumerate_iter(from_state) {
                predecessors.entry(to_state).or_default().push(from_state);
            }
        }

        let mut worklist = VecDeque::from_iter(self.accept_states.iter().cloned());
        let mut live = self.accept_states.clone();
        while let Some(live_state) = worklist.pop_front() {
            if let Some(states) = predecessors.get(&live_state) {
                for state in states {
                    if live.insert(*state) {
                        worklist.push_back(*state);
                    }
                }
            }
        }
        live
    }

    /// Compute if the two automata are identical up to the names of their states.
    ///
    /// Both automata must have the same alphabet, and every state must be reachable for them to be considered isomorphic.
    pub fn is_isomorphic_to(&self, other: &Dfa) -> bool {
        if self.alphabet != other.alphabet
            || self.get_number_of_states() != other.get_number_of_states()
        {
            return false;
        }

        let mut forward: Vec<Option<State>> = vec![None; self.get_number_of_states()];
        let mut backward: Vec<Option<State>> = vec![None; other.get_number_of_states()];
        let mut worklist = VecDeque::with_capacity(self.get_number_of_states());

        forward[self.start_state] = Some(other.start_state);
        backward[other.start_state] = Some(self.start_state);
        worklist.push_back((self.start_state, other.start_state));

        let mut mapped = 1;
        while let Some((state, other_state)) = worklist.pop_front() {
            if self.is_accepted(&state) != other.is_accepted(&other_state) {
                return false;
            }
            for symbol in 0..self.alphabet.len() {
                match (
                    self.get_transition(state, symbol),
                    other.get_transition(other_state, symbol),
                ) {
                    (None, None) => {}
                    (Some(to_state), Some(other_to_state)) => {
                        match (forward[to_state], backward[other_to_state]) {
                            (None, None) => {
                                forward[to_state] = Some(other_to_state);
                                backward[other_to_state] = Some(to_state);
                                mapped += 1;
                                worklist.push_back((to_state, other_to_state));
                            }
                            (Some(f), Some(b)) if f == other_to_state && b == to_state => {}
                            _ => return false,
                        }
                    }
                    _ => return false,
                }
            }
        }

        mapped == self.get_number_of_states()
    }
}

#[cfg(test)]
mod tests {
    use crate::fixtures::{four_states, three_states};

    use super::*;

    #[test]
    fn test_accepts() -> Result<(), String> {
        let dfa = Dfa::new(&three_states()).unwrap();
        assert!(dfa.accepts(&["0", "1"]));
        assert!(dfa.accepts(&["1", "0", "1", "1"]));
        assert!(!dfa.accepts(&["1", "1"]));
        assert!(!dfa.accepts(&["x"]));
        Ok(())
    }

    #[test]
    fn test_reachable_and_live() -> Result<(), String> {
        let dfa = Dfa::new(&[
            StateRecord::new("A", true, false).with_transition("a", "B"),
            StateRecord::new("B", false, true).with_transition("a", "C"),
            StateRecord::new("C", false, false).with_transition("a", "C"),
            StateRecord::new("D", false, true).with_transition("a", "A"),
        ])
        .unwrap();

        let reachable = dfa.get_reachable_states();
        assert_eq!(3, reachable.len());
        assert!(!reachable.contains(&3));

        let live = dfa.get_live_states();
        assert_eq!(3, live.len());
        assert!(!live.contains(&2));
        Ok(())
    }

    #[test]
    fn test_isomorphic() -> Result<(), String> {
        let dfa = Dfa::new(&three_states()).unwrap();
        assert!(dfa.is_isomorphic_to(&dfa));

        let renamed = Dfa::new(&[
            StateRecord::new("z", false, true)
                .with_transition("0", "z")
                .with_transition("1", "z"),
            StateRecord::new("x", true, false)
                .with_transition("0", "y")
                .with_transition("1", "x"),
            StateRecord::new("y", false, false)
                .with_transition("0", "x")
                .with_transition("1", "z"),
        ])
        .unwrap();
        assert!(dfa.is_isomorphic_to(&renamed));
        assert!(renamed.is_isomorphic_to(&dfa));

        let other = Dfa::new(&four_states()).unwrap();
        assert!(!dfa.is_isomorphic_to(&other));
        Ok(())
    }
}
