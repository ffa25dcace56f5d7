//! The propagation scheduler: turns one accepted block break into a
//! budgeted, incremental mining run.

mod limits;
mod task;

pub use limits::MinerLimits;
pub use task::{MinerTask, TaskState};
