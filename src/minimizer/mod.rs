use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dfa::{CompletedDfa, Dfa, State};
use crate::error::EngineError;
use crate::partition::{BlockId, Partition};

mod hopcroft;
mod moore;
mod pair_table;
mod quotient;
mod table_filling;

pub use quotient::Totality;

/// The minimization algorithms, they all compute the same partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Pairwise distinguishability marking, `O(n²·|Σ|)` per sweep.
    #[serde(rename = "table-filling")]
    TableFilling,
    /// Round-based refinement by signature, `O(n·|Σ|)` per round.
    #[serde(rename = "moore")]
    Moore,
    /// Worklist-driven refinement, `O(n·|Σ|·log n)`.
    #[serde(rename = "hopcroft")]
    Hopcroft,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::TableFilling, Algorithm::Moore, Algorithm::Hopcroft];

    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::TableFilling => "table-filling",
            Algorithm::Moore => "moore",
            Algorithm::Hopcroft => "hopcroft",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "table-filling" | "tablefilling" => Ok(Algorithm::TableFilling),
            "moore" => Ok(Algorithm::Moore),
            "hopcroft" => Ok(Algorithm::Hopcroft),
            _ => Err(format!(
                "unknown algorithm '{s}', expected one of table-filling, moore or hopcroft"
            )),
        }
    }
}

impl CompletedDfa {
    /// Compute the partition of the states into equivalence classes with the given algorithm.
    pub fn partition(&self, algorithm: Algorithm) -> Result<Partition, EngineError> {
        let partition = match algorithm {
            Algorithm::TableFilling => self.partition_by_table_filling()?,
            Algorithm::Moore => self.partition_by_moore()?,
            Algorithm::Hopcroft => self.partition_by_hopcroft()?,
        };
        partition.assert_consistent(self)?;
        Ok(partition)
    }
}

impl Dfa {
    /// Compute the minimal automaton recognizing the same language, without the block rejecting everything.
    ///
    /// # Example:
    ///
    /// ```
    /// use dfaminimizer::{Algorithm, dfa::{Dfa, StateRecord}};
    ///
    /// let dfa = Dfa::new(&[
    ///     StateRecord::new("A", true, false).with_transition("a", "B").with_transition("b", "C"),
    ///     StateRecord::new("B", false, true).with_transition("a", "B"),
    ///     StateRecord::new("C", false, true).with_transition("a", "C"),
    /// ]).unwrap();
    ///
    /// let minimized = dfa.minimize(Algorithm::Hopcroft).unwrap();
    ///
    /// assert_eq!(2, minimized.get_number_of_states());
    /// assert_eq!("{B,C}", minimized.get_state_name(1));
    /// ```
    pub fn minimize(&self, algorithm: Algorithm) -> Result<Dfa, EngineError> {
        self.minimize_with(algorithm, Totality::Partial)
    }

    pub fn minimize_with(&self, algorithm: Algorithm, totality: Totality) -> Result<Dfa, EngineError> {
        let completed = self.complete();
        let partition = completed.partition(algorithm)?;
        completed.build_minimized(&partition, totality)
    }
}
