use std::fmt::{self};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    MalformedInput(MalformedInputError),
    AlgorithmInvariantViolation(String),
    AutomatonHasTooManyStates,
    AutomatonHasTooManySymbols,
    SerializationError(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MalformedInput(err) => write!(f, "Malformed automaton: {err}."),
            EngineError::AlgorithmInvariantViolation(err) => write!(f, "Internal invariant violated: {err}."),
            EngineError::AutomatonHasTooManyStates => write!(f, "The automaton has too many states."),
            EngineError::AutomatonHasTooManySymbols => write!(f, "The alphabet of the automaton has too many symbols."),
            EngineError::SerializationError(err) => write!(f, "{err}."),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<MalformedInputError> for EngineError {
    fn from(err: MalformedInputError) -> Self {
        EngineError::MalformedInput(err)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::SerializationError(err.to_string())
    }
}

impl EngineError {
    /// Determine if the error is a server error.
    /// A server error means the engine itself is faulty and should not be shown to the end user.
    pub fn is_server_error(&self) -> bool {
        match self {
            EngineError::MalformedInput(_) => false,
            EngineError::AlgorithmInvariantViolation(_) => true,
            EngineError::AutomatonHasTooManyStates => false,
            EngineError::AutomatonHasTooManySymbols => false,
            EngineError::SerializationError(_) => false,
        }
    }
}

/// Reasons for rejecting an automaton before any minimization work starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MalformedInputError {
    NoStartState,
    MultipleStartStates(Vec<String>),
    EmptyStateName,
    DuplicateState(String),
    UnknownState { state: String, target: String },
    UnknownSymbol { state: String, symbol: String },
    NondeterministicTransition { state: String, symbol: String },
}

impl fmt::Display for MalformedInputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedInputError::NoStartState => write!(f, "no start state is declared"),
            MalformedInputError::MultipleStartStates(states) => {
                write!(f, "more than one start state is declared ({})", states.join(", "))
            }
            MalformedInputError::EmptyStateName => write!(f, "a state has an empty name"),
            MalformedInputError::DuplicateState(state) => {
                write!(f, "the state '{state}' is declared more than once")
            }
            MalformedInputError::UnknownState { state, target } => write!(
                f,
                "the state '{state}' has a transition to the undeclared state '{target}'"
            ),
            MalformedInputError::UnknownSymbol { state, symbol } => write!(
                f,
                "the state '{state}' has a transition on the undeclared symbol '{symbol}'"
            ),
            MalformedInputError::NondeterministicTransition { state, symbol } => write!(
                f,
                "the state '{state}' has several transitions with different targets on '{symbol}'"
            ),
        }
    }
}

impl std::error::Error for MalformedInputError {}
