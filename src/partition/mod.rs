use crate::dfa::{CompletedDfa, State};
use crate::error::EngineError;
use crate::IntMap;

pub type BlockId = usize;

/// Represent a partition of the states of an automaton into disjoint, non-empty blocks.
///
/// Blocks are numbered in the order of their smallest state, and the states of each block are sorted,
/// so two partitions grouping the states the same way are equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Partition {
    block_of: Vec<BlockId>,
    blocks: Vec<Vec<State>>,
}

impl Partition {
    /// Build a partition from an arbitrary labelling, states sharing a label end up in the same block.
    ///
    /// # Example:
    ///
    /// ```
    /// use dfaminimizer::partition::Partition;
    ///
    /// let partition = Partition::from_assignment(&[7, 3, 7, 1]);
    ///
    /// assert_eq!(3, partition.get_number_of_blocks());
    /// assert_eq!(&[0, 2], partition.get_block(0));
    /// assert!(partition.are_equivalent(0, 2));
    /// ```
    pub fn from_assignment(assignment: &[usize]) -> Self {
        let mut renaming: IntMap<usize, BlockId> = IntMap::default();
        let mut block_of = Vec::with_capacity(assignment.len());
        let mut blocks: Vec<Vec<State>> = vec![];
        for (state, label) in assignment.iter().enumerate() {
            let next_block = blocks.len();
            let block = *renaming.entry(*label).or_insert(next_block);
            if block == next_block {
                blocks.push(vec![]);
            }
            blocks[block].push(state);
            block_of.push(block);
        }
        Partition { block_of, blocks }
    }

    /// The partition splitting the states by acceptance only.
    pub fn by_acceptance(dfa: &CompletedDfa) -> Self {
        let assignment: Vec<usize> = dfa
            .states_iter()
            .map(|state| dfa.is_accepted(state) as usize)
            .collect();
        Self::from_assignment(&assignment)
    }

    #[inline]
    pub fn get_number_of_blocks(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn get_number_of_states(&self) -> usize {
        self.block_of.len()
    }

    #[inline]
    pub fn get_block_of(&self, state: State) -> BlockId {
        self.block_of[state]
    }

    #[inline]
    pub fn get_block(&self, block: BlockId) -> &[State] {
        &self.blocks[block]
    }

    #[inline]
    pub fn blocks_iter(&self) -> impl Iterator<Item = &[State]> {
        self.blocks.iter().map(|block| block.as_slice())
    }

    #[inline]
    pub fn are_equivalent(&self, state_1: State, state_2: State) -> bool {
        self.block_of[state_1] == self.block_of[state_2]
    }

    /// Return `true` if every block of `self` is included in a block of `other`.
    pub fn is_refinement_of(&self, other: &Partition) -> bool {
        self.get_number_of_states() == other.get_number_of_states()
            && self.blocks.iter().all(|block| {
                let target = other.block_of[block[0]];
                block.iter().all(|state| other.block_of[*state] == target)
            })
    }

    /// Check that the partition covers exactly the states of `dfa` and that no block mixes accepting and rejecting states.
    pub fn assert_consistent(&self, dfa: &CompletedDfa) -> Result<(), EngineError> {
        if self.get_number_of_states() != dfa.get_number_of_states() {
            return Err(EngineError::AlgorithmInvariantViolation(format!(
                "the partition covers {} states but the automaton has {}",
                self.get_number_of_states(),
                dfa.get_number_of_states()
            )));
        }
        for block in &self.blocks {
            let accepted = dfa.is_accepted(block[0]);
            if let Some(state) = block.iter().find(|s| dfa.is_accepted(**s) != accepted) {
                return Err(EngineError::AlgorithmInvariantViolation(format!(
                    "the states '{}' and '{}' share a block but disagree on acceptance",
                    dfa.get_state_name(block[0]),
                    dfa.get_state_name(*state)
                )));
            }
        }
        Ok(())
    }

    /// Run one refinement pass and return `true` if no block would be split by any symbol.
    pub fn is_stable(&self, dfa: &CompletedDfa) -> bool {
        self.blocks.iter().all(|block| {
            let representative = dfa.get_row(block[0]);
            block[1..].iter().all(|state| {
                dfa.get_row(*state)
                    .iter()
                    .zip(representative)
                    .all(|(t1, t2)| self.block_of[*t1] == self.block_of[*t2])
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::dfa::Dfa;
    use crate::fixtures::{four_states, three_states};

    use super::*;

    #[test]
    fn test_from_assignment() -> Result<(), String> {
        let partition = Partition::from_assignment(&[4, 4, 2, 9, 2]);
        assert_eq!(5, partition.get_number_of_states());
        assert_eq!(3, partition.get_number_of_blocks());
        assert_eq!(&[0, 1], partition.get_block(0));
        assert_eq!(&[2, 4], partition.get_block(1));
        assert_eq!(&[3], partition.get_block(2));
        assert_eq!(1, partition.get_block_of(4));

        assert_eq!(Partition::from_assignment(&[0, 0, 1, 2, 1]), partition);
        assert_ne!(Partition::from_assignment(&[0, 1, 1, 2, 1]), partition);
        Ok(())
    }

    #[test]
    fn test_refinement() -> Result<(), String> {
        let coarse = Partition::from_assignment(&[0, 0, 1, 1]);
        let fine = Partition::from_assignment(&[0, 2, 1, 1]);
        assert!(fine.is_refinement_of(&coarse));
        assert!(!coarse.is_refinement_of(&fine));
        assert!(coarse.is_refinement_of(&coarse));
        Ok(())
    }

    #[test]
    fn test_consistency() -> Result<(), String> {
        let dfa = Dfa::new(&three_states()).unwrap().complete();
        assert!(Partition::by_acceptance(&dfa).assert_consistent(&dfa).is_ok());

        let mixed = Partition::from_assignment(&[0, 1, 1]);
        assert!(matches!(
            mixed.assert_consistent(&dfa),
            Err(EngineError::AlgorithmInvariantViolation(_))
        ));

        let too_small = Partition::from_assignment(&[0, 1]);
        assert!(too_small.assert_consistent(&dfa).is_err());
        Ok(())
    }

    #[test]
    fn test_stability() -> Result<(), String> {
        let dfa = Dfa::new(&four_states()).unwrap().complete();
        assert!(!Partition::by_acceptance(&dfa).is_stable(&dfa));
        assert!(Partition::from_assignment(&[0, 1, 2, 1]).is_stable(&dfa));
        assert!(Partition::from_assignment(&[0, 1, 2, 3]).is_stable(&dfa));
        Ok(())
    }
}
