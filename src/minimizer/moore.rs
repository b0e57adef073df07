use ahash::{AHashMap, HashMapExt};
use log::{debug, trace};

use super::*;

impl CompletedDfa {
    /// Compute the equivalence classes of the states by refining the acceptance partition round after round.
    ///
    /// The signature of a state is its current class followed by the classes of its targets in alphabet order,
    /// states keep sharing a class as long as their signatures are equal.
    pub fn partition_by_moore(&self) -> Result<Partition, EngineError> {
        let number_of_states = self.get_number_of_states();

        let mut class: Vec<usize> = self
            .states_iter()
            .map(|state| self.is_accepted(state) as usize)
            .collect();
        let mut number_of_classes = Partition::from_assignment(&class).get_number_of_blocks();

        let mut signatures: AHashMap<Vec<usize>, usize> = AHashMap::with_capacity(number_of_states);
        let mut signature = Vec::with_capacity(self.get_number_of_symbols() + 1);
        let mut rounds = 0;
        loop {
            rounds += 1;
            signatures.clear();
            let mut next_class = Vec::with_capacity(number_of_states);
            for state in self.states_iter() {
                signature.clear();
                signature.push(class[state]);
                signature.extend(self.get_row(state).iter().map(|to_state| class[*to_state]));

                let new_class = match signatures.get(&signature) {
                    Some(new_class) => *new_class,
                    None => {
                        let new_class = signatures.len();
                        signatures.insert(signature.clone(), new_class);
                        new_class
                    }
                };
                next_class.push(new_class);
            }
            class = next_class;

            trace!("Moore round {rounds}: {} classes.", signatures.len());
            if signatures.len() == number_of_classes {
                break;
            }
            number_of_classes = signatures.len();
        }
        debug!("Moore converged after {rounds} rounds with {number_of_classes} classes.");

        Ok(Partition::from_assignment(&class))
    }
}
