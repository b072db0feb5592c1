use std::hash::Hash;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::logic::{State, States};

/// Mapping from each input state to an output state
///
/// Output states are created unassigned over the output keys given at construction.
/// The input states are not copied: the table refers to the states it was built from.
#[derive(Clone, Debug)]
pub struct TruthTable<I, O> {
    inputs: States<I>,
    outputs: Vec<State<O>>,
}

impl<I: Eq + Hash + Clone, O: Eq + Hash + Clone> TruthTable<I, O> {
    /// Create a truth table over the given input states, with unassigned outputs
    pub fn new(states: &States<I>, output_keys: &[O]) -> Self {
        let keys: Rc<[O]> = output_keys.into();
        let template = State::from_shared_keys(keys, states.one(), states.zero());
        TruthTable {
            inputs: states.clone(),
            outputs: vec![template; states.len()],
        }
    }

    /// Number of input states
    pub fn nb_states(&self) -> usize {
        self.inputs.len()
    }

    /// Input state at index i
    pub fn state_at(&self, i: usize) -> &State<I> {
        self.inputs.state(i)
    }

    /// Output state at index i
    pub fn output_at(&self, i: usize) -> &State<O> {
        &self.outputs[i]
    }

    pub(crate) fn output_at_mut(&mut self, i: usize) -> &mut State<O> {
        &mut self.outputs[i]
    }

    /// Output state for the given input state
    pub fn state_output(&self, state: &State<I>) -> Result<&State<O>> {
        let i = self.inputs.position(state).ok_or(Error::UnknownState)?;
        Ok(&self.outputs[i])
    }

    /// Mutable output state for the given input state
    pub fn state_output_mut(&mut self, state: &State<I>) -> Result<&mut State<O>> {
        let i = self.inputs.position(state).ok_or(Error::UnknownState)?;
        Ok(&mut self.outputs[i])
    }

    /// Iterate over (input, output) pairs, in state order
    pub fn iter(&self) -> impl Iterator<Item = (&State<I>, &State<O>)> + '_ {
        self.inputs.iter().zip(self.outputs.iter())
    }
}
