use log::{debug, trace};

use crate::execution_profile::ThreadLocalParams;

use super::pair_table::PairTable;
use super::*;

impl CompletedDfa {
    /// Compute the equivalence classes of the states by marking every distinguishable pair until a fixpoint is reached.
    ///
    /// This is the quadratic baseline: every sweep visits all the unmarked pairs on every symbol.
    pub fn partition_by_table_filling(&self) -> Result<Partition, EngineError> {
        let number_of_states = self.get_number_of_states();
        let number_of_symbols = self.get_number_of_symbols();
        ThreadLocalParams::get_execution_profile().assert_number_of_pairs(number_of_states)?;

        let mut table = PairTable::new(number_of_states);
        for q in 0..number_of_states {
            for p in 0..q {
                if self.is_accepted(p) != self.is_accepted(q) {
                    table.mark(p, q);
                }
            }
        }

        let mut sweeps = 0;
        let mut changed = true;
        while changed {
            changed = false;
            sweeps += 1;
            let mut marked_in_sweep = 0;
            for q in 0..number_of_states {
                for p in 0..q {
                    if table.is_marked(p, q) {
                        continue;
                    }
                    let distinguishable = (0..number_of_symbols)
                        .any(|a| table.is_marked(self.next_state(p, a), self.next_state(q, a)));
                    if distinguishable {
                        table.mark(p, q);
                        marked_in_sweep += 1;
                        changed = true;
                    }
                }
            }
            trace!("Table-filling sweep {sweeps} marked {marked_in_sweep} pairs.");
        }
        debug!(
            "Table-filling reached its fixpoint after {} sweeps with {} distinguishable pairs.",
            sweeps,
            table.count_marked()
        );

        Self::group_unmarked_pairs(&table)
    }

    /// Group the states by the "unmarked with" relation, checking on the way that it is transitive.
    fn group_unmarked_pairs(table: &PairTable) -> Result<Partition, EngineError> {
        let number_of_states = table.number_of_states();

        let mut representative: Vec<State> = Vec::with_capacity(number_of_states);
        for q in 0..number_of_states {
            let smallest = (0..q).find(|p| !table.is_marked(*p, q)).unwrap_or(q);
            representative.push(smallest);
        }

        for q in 0..number_of_states {
            for p in 0..q {
                let unmarked = !table.is_marked(p, q);
                if unmarked != (representative[p] == representative[q]) {
                    return Err(EngineError::AlgorithmInvariantViolation(format!(
                        "the indistinguishability relation is not transitive on the states {p} and {q}"
                    )));
                }
            }
        }

        Ok(Partition::from_assignment(&representative))
    }
}
