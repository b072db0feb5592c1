use std::hash::Hash;
use std::rc::Rc;

use fxhash::{FxHashMap, FxHashSet};

use crate::logic::State;

/// Every combination of values over a set of keys
///
/// With n keys there are 2^n states at construction. State i assigns `one` to key j if bit j of i
/// is set, `zero` otherwise, so that the first key toggles fastest.
/// States can only be removed afterwards, keeping the relative order of the others.
///
/// The states and their index are shared between clones: truth tables built over the same
/// `States` refer to the same state objects.
#[derive(Clone, Debug)]
pub struct States<K> {
    keys: Rc<[K]>,
    states: Rc<[State<K>]>,
    index: Rc<FxHashMap<State<K>, usize>>,
    one: bool,
    zero: bool,
}

impl<K: Eq + Hash + Clone> States<K> {
    /// Enumerate all the states over the given keys
    ///
    /// # Panics
    ///
    /// Panics if there are too many keys for the states to be counted in a `usize`.
    pub fn new(keys: &[K], one: bool, zero: bool) -> Self {
        assert!(
            keys.len() < usize::BITS as usize,
            "Too many keys to enumerate: {}",
            keys.len()
        );
        let keys: Rc<[K]> = keys.into();
        let states = (0..1usize << keys.len())
            .map(|i| {
                let mut s = State::from_shared_keys(keys.clone(), one, zero);
                for j in 0..keys.len() {
                    let v = if (i >> j) & 1 != 0 { s.one() } else { s.zero() };
                    s.set_value_at(j, v);
                }
                s
            })
            .collect();
        Self::from_states(keys, states, one, zero)
    }

    fn from_states(keys: Rc<[K]>, states: Vec<State<K>>, one: bool, zero: bool) -> Self {
        let index = states
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i))
            .collect();
        States {
            keys,
            states: states.into(),
            index: Rc::new(index),
            one,
            zero,
        }
    }

    /// Number of states
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if there is no state left
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Keys of the states, in order
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

    /// Get the state at index i
    pub fn state(&self, i: usize) -> &State<K> {
        &self.states[i]
    }

    /// Iterate over the states, in order
    pub fn iter(&self) -> std::slice::Iter<'_, State<K>> {
        self.states.iter()
    }

    /// Index of a state, if present
    pub fn position(&self, state: &State<K>) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// Return a copy without the given states, preserving the order of the others
    pub fn remove(&self, forbidden: &FxHashSet<State<K>>) -> States<K> {
        let states = self
            .states
            .iter()
            .filter(|s| !forbidden.contains(*s))
            .cloned()
            .collect();
        Self::from_states(self.keys.clone(), states, self.one, self.zero)
    }
}

// The index is derived from the states
impl<K: PartialEq> PartialEq for States<K> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys
            && self.states == other.states
            && self.one == other.one
            && self.zero == other.zero
    }
}

impl<K: Eq> Eq for States<K> {}

impl<'a, K> IntoIterator for &'a States<K> {
    type Item = &'a State<K>;
    type IntoIter = std::slice::Iter<'a, State<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.states.iter()
    }
}
