//! Operational limits on a mining run.

use std::time::Duration;

/// Caps that keep one run from eating the tick or the world.
#[derive(Debug, Clone, Copy)]
pub struct MinerLimits {
    /// Wall-clock budget one `advance` call may spend.
    pub time_budget: Duration,
    /// Maximum horizontal distance from the origin, in blocks.
    pub max_horizontal: u32,
    /// Maximum vertical distance from the origin, in blocks.
    pub max_vertical: u32,
    /// Hard cap on blocks collected by one run.
    pub max_blocks: usize,
    /// Durability points left at which tool protection aborts the run.
    pub tool_protection_margin: u32,
}

impl Default for MinerLimits {
    fn default() -> Self {
        Self {
            time_budget: Duration::from_millis(30),
            max_horizontal: 16,
            max_vertical: 32,
            max_blocks: 1024,
            tool_protection_margin: 4,
        }
    }
}
