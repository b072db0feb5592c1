use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// An assignment of boolean values to a fixed, ordered set of keys
///
/// Values start unassigned. The key set is shared between all states built from it and cannot be
/// changed after construction. The `one` and `zero` values are the representation of true and
/// false chosen by whoever built the state, and are kept alongside the assignment.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State<K> {
    keys: Rc<[K]>,
    values: Box<[Option<bool>]>,
    one: bool,
    zero: bool,
}

impl<K: Eq + Hash + Clone> State<K> {
    /// Create a new state over the given keys, with all values unassigned
    pub fn new(keys: &[K], one: bool, zero: bool) -> Self {
        Self::from_shared_keys(keys.into(), one, zero)
    }

    pub(crate) fn from_shared_keys(keys: Rc<[K]>, one: bool, zero: bool) -> Self {
        let values = vec![None; keys.len()].into();
        State {
            keys,
            values,
            one,
            zero,
        }
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if there is no key
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Keys of the state, in order
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Value representing true
    pub fn one(&self) -> bool {
        self.one
    }

    /// Value representing false
    pub fn zero(&self) -> bool {
        self.zero
    }

    /// Returns whether the key is part of the state
    pub fn contains(&self, key: &K) -> bool {
        self.position(key).is_some()
    }

    fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    /// Value of a key; None if the key is unassigned or not part of the state
    pub fn get_state(&self, key: &K) -> Option<bool> {
        self.position(key).and_then(|i| self.values[i])
    }

    /// Assign a value to a key; returns false if the key is not part of the state
    pub fn set_state(&mut self, key: &K, value: bool) -> bool {
        match self.position(key) {
            Some(i) => {
                self.values[i] = Some(value);
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_value_at(&mut self, i: usize, value: bool) {
        self.values[i] = Some(value);
    }
}

impl<K: fmt::Display> fmt::Display for State<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.keys.iter().zip(self.values.iter()).enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            match v {
                Some(b) => write!(f, "{}={}", k, b)?,
                None => write!(f, "{}=?", k)?,
            }
        }
        write!(f, "}}")
    }
}
