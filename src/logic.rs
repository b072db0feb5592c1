//! Boolean states and truth tables

mod state;
mod states;
mod truth_table;

pub use state::State;
pub use states::States;
pub use truth_table::TruthTable;
