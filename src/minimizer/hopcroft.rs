use std::collections::hash_map::Entry;
use std::collections::VecDeque;

use log::{debug, trace};

use crate::IntMap;

use super::*;

/// A block of the partition under refinement.
///
/// A split block is retired and replaced by two fresh blocks, its id is never reused so a
/// stale worklist entry pointing at it can be recognized and skipped.
#[derive(Debug)]
struct Block {
    states: Vec<State>,
    pending: Vec<bool>,
    retired: bool,
}

/// Arena of blocks indexed by stable ids.
#[derive(Debug)]
struct Refinement {
    blocks: Vec<Block>,
    block_of: Vec<BlockId>,
    worklist: VecDeque<(BlockId, usize)>,
    number_of_symbols: usize,
}

impl Refinement {
    fn new(dfa: &CompletedDfa) -> Self {
        let mut refinement = Refinement {
            blocks: vec![],
            block_of: vec![0; dfa.get_number_of_states()],
            worklist: VecDeque::new(),
            number_of_symbols: dfa.get_number_of_symbols(),
        };

        let (accepting, rejecting): (Vec<State>, Vec<State>) =
            dfa.states_iter().partition(|state| dfa.is_accepted(*state));
        let accepting = refinement.new_block(accepting);
        let rejecting = refinement.new_block(rejecting);

        // a single block can not be split, only the smaller of two initial blocks needs to be a splitter
        if let (Some(accepting), Some(rejecting)) = (accepting, rejecting) {
            let smaller = refinement.smaller_of(accepting, rejecting);
            for symbol in 0..refinement.number_of_symbols {
                refinement.enqueue(smaller, symbol);
            }
        }
        refinement
    }

    fn new_block(&mut self, states: Vec<State>) -> Option<BlockId> {
        if states.is_empty() {
            return None;
        }
        let id = self.blocks.len();
        for state in &states {
            self.block_of[*state] = id;
        }
        self.blocks.push(Block {
            states,
            pending: vec![false; self.number_of_symbols],
            retired: false,
        });
        Some(id)
    }

    #[inline]
    fn smaller_of(&self, block_1: BlockId, block_2: BlockId) -> BlockId {
        if self.blocks[block_1].states.len() <= self.blocks[block_2].states.len() {
            block_1
        } else {
            block_2
        }
    }

    #[inline]
    fn enqueue(&mut self, block: BlockId, symbol: usize) {
        self.blocks[block].pending[symbol] = true;
        self.worklist.push_back((block, symbol));
    }

    /// Pop the next splitter, skipping the entries whose block has been retired since they were pushed.
    fn next_splitter(&mut self) -> Option<(BlockId, usize)> {
        while let Some((block, symbol)) = self.worklist.pop_front() {
            if self.blocks[block].retired {
                trace!("Skipping the retired splitter ({block}, {symbol}).");
                continue;
            }
            self.blocks[block].pending[symbol] = false;
            return Some((block, symbol));
        }
        None
    }

    /// Replace `block` by `inside` and the rest of its states, and update the worklist.
    fn split(&mut self, block: BlockId, inside: Vec<State>, in_preimage: &[bool]) {
        let outside: Vec<State> = self.blocks[block]
            .states
            .iter()
            .filter(|state| !in_preimage[**state])
            .copied()
            .collect();
        self.blocks[block].retired = true;
        let pending = std::mem::take(&mut self.blocks[block].pending);
        let states = std::mem::take(&mut self.blocks[block].states);
        trace!(
            "Splitting block {block} of {} states into {} and {}.",
            states.len(),
            inside.len(),
            outside.len()
        );

        let (Some(first), Some(second)) = (self.new_block(inside), self.new_block(outside)) else {
            unreachable!("a block is only split when both halves are non-empty");
        };

        let smaller = self.smaller_of(first, second);
        for (symbol, was_pending) in pending.into_iter().enumerate() {
            if was_pending {
                self.enqueue(first, symbol);
                self.enqueue(second, symbol);
            } else {
                self.enqueue(smaller, symbol);
            }
        }
    }
}

impl CompletedDfa {
    /// Compute the equivalence classes of the states with Hopcroft's algorithm.
    ///
    /// Each (block, symbol) splitter splits every block partially reached by its preimage, and only the smaller half
    /// of a split block is queued when the block was not already pending, which bounds the work to `O(n·|Σ|·log n)`.
    pub fn partition_by_hopcroft(&self) -> Result<Partition, EngineError> {
        let number_of_states = self.get_number_of_states();
        let preimage = self.get_preimage_index();
        let mut refinement = Refinement::new(self);

        let mut in_preimage = vec![false; number_of_states];
        let mut preimage_states: Vec<State> = Vec::with_capacity(number_of_states);
        let mut touched: Vec<BlockId> = vec![];
        let mut hits: IntMap<BlockId, Vec<State>> = IntMap::default();
        let mut splitters = 0;
        let mut splits = 0;

        while let Some((splitter, symbol)) = refinement.next_splitter() {
            splitters += 1;
            for target in &refinement.blocks[splitter].states {
                for source in &preimage[symbol * number_of_states + target] {
                    if !in_preimage[*source] {
                        in_preimage[*source] = true;
                        preimage_states.push(*source);
                    }
                }
            }

            for state in &preimage_states {
                let block = refinement.block_of[*state];
                match hits.entry(block) {
                    Entry::Occupied(mut o) => o.get_mut().push(*state),
                    Entry::Vacant(v) => {
                        touched.push(block);
                        v.insert(vec![*state]);
                    }
                }
            }

            for block in touched.drain(..) {
                let inside = hits.remove(&block).unwrap_or_default();
                if inside.len() < refinement.blocks[block].states.len() {
                    refinement.split(block, inside, &in_preimage);
                    splits += 1;
                }
            }

            for state in preimage_states.drain(..) {
                in_preimage[state] = false;
            }
        }
        debug!(
            "Hopcroft processed {splitters} splitters and performed {splits} splits, {} blocks remain.",
            refinement.blocks.iter().filter(|b| !b.retired).count()
        );

        Ok(Partition::from_assignment(&refinement.block_of))
    }
}

#[cfg(test)]
mod tests {
    use crate::dfa::{Dfa, StateRecord};
    use crate::fixtures::{divisible_by_three, four_states, partial_with_dead_states, three_states};

    use super::*;

    #[test]
    fn test_hopcroft() -> Result<(), String> {
        let dfa = Dfa::new(&three_states()).unwrap().complete();
        let partition = dfa.partition_by_hopcroft().unwrap();
        assert_eq!(3, partition.get_number_of_blocks());

        let dfa = Dfa::new(&four_states()).unwrap().complete();
        let partition = dfa.partition_by_hopcroft().unwrap();
        assert_eq!(Partition::from_assignment(&[0, 1, 2, 1]), partition);

        let dfa = Dfa::new(&divisible_by_three()).unwrap().complete();
        let partition = dfa.partition_by_hopcroft().unwrap();
        assert_eq!(Partition::from_assignment(&[0, 1, 2, 0, 1, 2]), partition);
        Ok(())
    }

    #[test]
    fn test_hopcroft_fixpoint() -> Result<(), String> {
        let dfa = Dfa::new(&partial_with_dead_states()).unwrap().complete();
        let partition = dfa.partition_by_hopcroft().unwrap();
        assert!(partition.is_stable(&dfa));
        // s | p q | dead ERROR | lost
        assert_eq!(Partition::from_assignment(&[0, 1, 1, 2, 3, 2]), partition);
        Ok(())
    }

    #[test]
    fn test_hopcroft_single_block() -> Result<(), String> {
        let dfa = Dfa::new(&[
            StateRecord::new("A", true, true).with_transition("a", "B"),
            StateRecord::new("B", false, true).with_transition("a", "A"),
        ])
        .unwrap()
        .complete();
        let partition = dfa.partition_by_hopcroft().unwrap();
        assert_eq!(1, partition.get_number_of_blocks());
        Ok(())
    }

    #[test]
    fn test_retired_splitters_are_skipped() -> Result<(), String> {
        let dfa = Dfa::new(&four_states()).unwrap().complete();
        let mut refinement = Refinement::new(&dfa);
        // accepting {B, D} and rejecting {A, C} have the same size, the first one seeds the worklist
        assert_eq!(2, refinement.worklist.len());
        assert_eq!(Some(0), refinement.worklist.front().map(|(block, _)| *block));

        let in_preimage = vec![true, false, false, false];
        refinement.split(1, vec![0], &in_preimage);
        assert!(refinement.blocks[1].retired);
        assert_eq!(4, refinement.blocks.len());
        assert_eq!(&[0], refinement.blocks[2].states.as_slice());
        assert_eq!(&[2], refinement.blocks[3].states.as_slice());

        refinement.worklist.push_back((1, 0));
        refinement.worklist.push_front((1, 1));
        let popped: Vec<_> = std::iter::from_fn(|| refinement.next_splitter()).collect();
        assert_eq!(vec![(0, 0), (0, 1), (2, 0), (2, 1)], popped);
        Ok(())
    }
}
