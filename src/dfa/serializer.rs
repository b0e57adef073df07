use serde::{de, Deserializer, Serializer};
use serde::{Deserialize, Serialize};

use super::*;

/// One state of the exchange format, together with its outgoing transitions.
///
/// ```
/// use dfaminimizer::dfa::StateRecord;
///
/// let record: StateRecord = serde_json::from_str(
///     r#"{"state_name": "A", "is_start": true, "is_end": false,
///         "transitions": [{"input": "0", "target_state": "B"}]}"#,
/// ).unwrap();
///
/// assert_eq!(StateRecord::new("A", true, false).with_transition("0", "B"), record);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub state_name: String,
    #[serde(default)]
    pub is_start: bool,
    #[serde(default)]
    pub is_end: bool,
    #[serde(default)]
    pub transitions: Vec<TransitionRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub input: String,
    pub target_state: String,
}

impl StateRecord {
    pub fn new(state_name: &str, is_start: bool, is_end: bool) -> Self {
        StateRecord {
            state_name: state_name.to_string(),
            is_start,
            is_end,
            transitions: vec![],
        }
    }

    pub fn with_transition(mut self, input: &str, target_state: &str) -> Self {
        self.transitions.push(TransitionRecord {
            input: input.to_string(),
            target_state: target_state.to_string(),
        });
        self
    }
}

impl Dfa {
    /// Return the automaton in the exchange format, states in index order and transitions in alphabet order.
    pub fn to_records(&self) -> Vec<StateRecord> {
        self.states_iter()
            .map(|state| StateRecord {
                state_name: self.state_names[state].clone(),
                is_start: state == self.start_state,
                is_end: self.accept_states.contains(&state),
                transitions: self
                    .transitions_from_state_enumerate_iter(state)
                    .map(|(symbol, to_state)| TransitionRecord {
                        input: self.alphabet[symbol].clone(),
                        target_state: self.state_names[to_state].clone(),
                    })
                    .collect(),
            })
            .collect()
    }

    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let records: Vec<StateRecord> = serde_json::from_str(json)?;
        Dfa::new(&records)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(&self.to_records())?)
    }
}

/// The records alone lose the symbols only used by missing transitions, so the alphabet travels along.
#[derive(Serialize, Deserialize, Debug)]
struct SerializedDfa {
    alphabet: Vec<Symbol>,
    states: Vec<StateRecord>,
}

impl serde::Serialize for Dfa {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        SerializedDfa {
            alphabet: self.alphabet.clone(),
            states: self.to_records(),
        }
        .serialize(serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Dfa {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serialized = SerializedDfa::deserialize(deserializer)?;
        let alphabet: Vec<&str> = serialized.alphabet.iter().map(|s| s.as_str()).collect();
        Dfa::with_alphabet(&serialized.states, &alphabet)
            .map_err(|err| de::Error::custom(err.to_string()))
    }
}
