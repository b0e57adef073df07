use ahash::AHashSet;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::IntSet;

use super::*;

/// Whether the minimized automaton keeps the block rejecting everything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Totality {
    /// Drop the blocks from which no accept state can be reached, leaving missing transitions instead.
    #[default]
    #[serde(rename = "partial")]
    Partial,
    /// Keep every reachable block, the transition function stays total.
    #[serde(rename = "total")]
    Total,
}

impl CompletedDfa {
    /// Collapse each block of `partition` into a single state.
    ///
    /// The representative of a block is its member with the smallest name, and the new state is named after the sorted
    /// names of its members, e.g. `{A,B}`. Blocks unreachable from the start block are dropped.
    pub fn build_minimized(
        &self,
        partition: &Partition,
        totality: Totality,
    ) -> Result<Dfa, EngineError> {
        partition.assert_consistent(self)?;
        let number_of_blocks = partition.get_number_of_blocks();
        let number_of_symbols = self.get_number_of_symbols();

        let representatives: Vec<State> = partition
            .blocks_iter()
            .map(|block| {
                block
                    .iter()
                    .copied()
                    .min_by_key(|state| self.get_state_name(*state))
                    .unwrap_or(block[0])
            })
            .collect();
        let block_target = |block: BlockId, symbol: usize| -> BlockId {
            partition.get_block_of(self.next_state(representatives[block], symbol))
        };

        let start_block = partition.get_block_of(self.get_start_state());
        // the start block is always kept, but transitions only lead to live blocks
        let live: Vec<bool> = match totality {
            Totality::Total => vec![true; number_of_blocks],
            Totality::Partial => self.get_live_blocks(partition, &representatives, &block_target),
        };

        let mut new_state: Vec<Option<State>> = vec![None; number_of_blocks];
        let mut order = Vec::with_capacity(number_of_blocks);
        new_state[start_block] = Some(0);
        order.push(start_block);
        let mut i = 0;
        while i < order.len() {
            let block = order[i];
            i += 1;
            for symbol in 0..number_of_symbols {
                let target = block_target(block, symbol);
                if live[target] && new_state[target].is_none() {
                    new_state[target] = Some(order.len());
                    order.push(target);
                }
            }
        }

        let mut used_names = AHashSet::with_capacity(order.len());
        let mut state_names = Vec::with_capacity(order.len());
        let mut transitions = Vec::with_capacity(order.len());
        let mut accept_states = IntSet::default();
        for (state, block) in order.iter().enumerate() {
            let mut name = self.block_name(partition.get_block(*block));
            while !used_names.insert(name.clone()) {
                name.push('\'');
            }
            state_names.push(name);

            if self.is_accepted(representatives[*block]) {
                accept_states.insert(state);
            }
            transitions.push(
                (0..number_of_symbols)
                    .map(|symbol| {
                        let target = block_target(*block, symbol);
                        if live[target] {
                            new_state[target]
                        } else {
                            None
                        }
                    })
                    .collect::<Vec<_>>(),
            );
        }
        debug!(
            "Built a minimized automaton of {} states out of {} blocks.",
            order.len(),
            number_of_blocks
        );

        Ok(Dfa::from_parts(
            state_names,
            self.get_alphabet().to_vec(),
            transitions,
            0,
            accept_states,
        ))
    }

    fn get_live_blocks(
        &self,
        partition: &Partition,
        representatives: &[State],
        block_target: &impl Fn(BlockId, usize) -> BlockId,
    ) -> Vec<bool> {
        let number_of_blocks = partition.get_number_of_blocks();
        let mut predecessors: Vec<Vec<BlockId>> = vec![vec![]; number_of_blocks];
        for block in 0..number_of_blocks {
            for symbol in 0..self.get_number_of_symbols() {
                predecessors[block_target(block, symbol)].push(block);
            }
        }

        let mut live: Vec<bool> = representatives
            .iter()
            .map(|state| self.is_accepted(*state))
            .collect();
        let mut worklist: Vec<BlockId> = (0..number_of_blocks).filter(|b| live[*b]).collect();
        while let Some(block) = worklist.pop() {
            for predecessor in &predecessors[block] {
                if !live[*predecessor] {
                    live[*predecessor] = true;
                    worklist.push(*predecessor);
                }
            }
        }
        live
    }

    /// The error state only shows up in the name of a block it is alone in.
    fn block_name(&self, block: &[State]) -> String {
        let error_state = self.get_error_state();
        let mut names: Vec<&str> = block
            .iter()
            .filter(|state| Some(**state) != error_state)
            .map(|state| self.get_state_name(*state))
            .collect();
        if names.is_empty() {
            names.push(self.get_state_name(block[0]));
        }
        names.sort_unstable();
        format!("{{{}}}", names.join(","))
    }
}
