use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;
use std::fmt::Display;

use crate::error::{EngineError, MalformedInputError};
use crate::execution_profile::ThreadLocalParams;
use crate::{IntMap, IntSet};

mod analyze;
mod builder;
mod completion;
mod serializer;

pub use completion::CompletedDfa;
pub use serializer::{StateRecord, TransitionRecord};

pub type State = usize;
pub type Symbol = String;

/// Represent a deterministic finite automaton whose transition function may be partial.
///
/// The alphabet is kept sorted, the index of a symbol in [`Dfa::get_alphabet`] is the column used by every transition table of the crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    state_names: Vec<String>,
    alphabet: Vec<Symbol>,
    transitions: Vec<Vec<Option<State>>>,
    start_state: State,
    accept_states: IntSet<State>,
}

impl Display for Dfa {
    fn fmt(&self, sb: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(sb, "digraph Automaton {{")?;
        writeln!(sb, "\trankdir = LR;")?;
        for from_state in self.states_iter() {
            write!(sb, "\t{}", from_state)?;
            let label = escape_label(&self.state_names[from_state]);
            if self.accept_states.contains(&from_state) {
                writeln!(sb, "\t[shape=doublecircle,label=\"{}\"];", label)?;
            } else {
                writeln!(sb, "\t[shape=circle,label=\"{}\"];", label)?;
            }

            if self.start_state == from_state {
                writeln!(sb, "\tinitial [shape=plaintext,label=\"\"];")?;
                writeln!(sb, "\tinitial -> {}", from_state)?;
            }

            // symbols sharing a target are drawn as one edge
            let mut edges: Vec<(State, Vec<&str>)> = vec![];
            for (symbol, to_state) in self.transitions_from_state_enumerate_iter(from_state) {
                match edges.iter_mut().find(|(s, _)| *s == to_state) {
                    Some((_, symbols)) => symbols.push(&self.alphabet[symbol]),
                    None => edges.push((to_state, vec![&self.alphabet[symbol]])),
                }
            }
            for (to_state, symbols) in edges {
                writeln!(
                    sb,
                    "\t{} -> {} [label=\"{}\"]",
                    from_state,
                    to_state,
                    escape_label(&symbols.join(","))
                )?;
            }
        }
        write!(sb, "}}")
    }
}

fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl Dfa {
    pub(crate) fn from_parts(
        state_names: Vec<String>,
        alphabet: Vec<Symbol>,
        transitions: Vec<Vec<Option<State>>>,
        start_state: State,
        accept_states: IntSet<State>,
    ) -> Self {
        Dfa {
            state_names,
            alphabet,
            transitions,
            start_state,
            accept_states,
        }
    }

    #[inline]
    pub fn states_iter(&self) -> impl Iterator<Item = State> {
        0..self.state_names.len()
    }

    #[inline]
    pub fn transitions_from_state_enumerate_iter(
        &self,
        from_state: State,
    ) -> impl Iterator<Item = (usize, State)> + '_ {
        self.transitions[from_state]
            .iter()
            .enumerate()
            .filter_map(|(symbol, to_state)| to_state.map(|to_state| (symbol, to_state)))
    }

    #[inline]
    pub fn get_transition(&self, from_state: State, symbol: usize) -> Option<State> {
        self.transitions
            .get(from_state)
            .and_then(|row| row.get(symbol))
            .copied()
            .flatten()
    }

    #[inline]
    pub fn get_number_of_states(&self) -> usize {
        self.state_names.len()
    }

    #[inline]
    pub fn get_number_of_transitions(&self) -> usize {
        self.transitions
            .iter()
            .map(|row| row.iter().filter(|t| t.is_some()).count())
            .sum()
    }

    #[inline]
    pub fn get_state_names(&self) -> &[String] {
        &self.state_names
    }

    #[inline]
    pub fn get_state_name(&self, state: State) -> &str {
        &self.state_names[state]
    }

    pub fn get_state_by_name(&self, name: &str) -> Option<State> {
        self.state_names.iter().position(|n| n == name)
    }

    #[inline]
    pub fn get_alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    #[inline]
    pub fn get_symbol_index(&self, symbol: &str) -> Option<usize> {
        self.alphabet
            .binary_search_by(|s| s.as_str().cmp(symbol))
            .ok()
    }

    #[inline]
    pub fn get_start_state(&self) -> State {
        self.start_state
    }

    #[inline]
    pub fn get_accept_states(&self) -> &IntSet<State> {
        &self.accept_states
    }

    #[inline]
    pub fn is_accepted(&self, state: &State) -> bool {
        self.accept_states.contains(state)
    }

    /// Return `true` if every state has a transition on every symbol.
    #[inline]
    pub fn is_total(&self) -> bool {
        self.transitions
            .iter()
            .all(|row| row.iter().all(|t| t.is_some()))
    }

    #[inline]
    pub fn to_dot(&self) {
        println!("{}", self);
    }
}
