//! Graph algorithms over netlists

mod sink_dfs;
mod tarjan;

pub use sink_dfs::SinkDfs;
pub use tarjan::Tarjan;
