//! Block permutations: a type id plus its full state-field assignment.

use std::collections::BTreeMap;
use std::fmt;

/// A single block state value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateValue {
    Bool(bool),
    Int(i32),
    Str(String),
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        StateValue::Bool(v)
    }
}

impl From<i32> for StateValue {
    fn from(v: i32) -> Self {
        StateValue::Int(v)
    }
}

impl From<&str> for StateValue {
    fn from(v: &str) -> Self {
        StateValue::Str(v.to_string())
    }
}

/// A block type id with its state-field assignment. This is the unit of
/// equivalence comparison during propagation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Permutation {
    type_id: String,
    states: BTreeMap<String, StateValue>,
}

impl Permutation {
    pub fn new(type_id: impl Into<String>) -> Self {
        Self {
            type_id: type_id.into(),
            states: BTreeMap::new(),
        }
    }

    /// Builder-style state assignment.
    pub fn with_state(mut self, key: impl Into<String>, value: impl Into<StateValue>) -> Self {
        self.states.insert(key.into(), value.into());
        self
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    pub fn state(&self, key: &str) -> Option<&StateValue> {
        self.states.get(key)
    }

    /// Boolean state, treating an absent field as `false`.
    pub fn bool_state(&self, key: &str) -> bool {
        matches!(self.states.get(key), Some(StateValue::Bool(true)))
    }

    /// Integer state, if present and integral.
    pub fn int_state(&self, key: &str) -> Option<i32> {
        match self.states.get(key) {
            Some(StateValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    /// Iterate over all state fields in a deterministic order.
    pub fn states(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.states.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Structural equality ignoring exactly one state field. Both
    /// permutations must share the type id; every other field must agree.
    pub fn eq_ignoring(&self, other: &Permutation, ignored: &str) -> bool {
        if self.type_id != other.type_id {
            return false;
        }
        let mine = self.states.iter().filter(|(k, _)| k.as_str() != ignored);
        let theirs = other.states.iter().filter(|(k, _)| k.as_str() != ignored);
        mine.eq(theirs)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_id)
    }
}
