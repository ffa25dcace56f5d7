//! World-interface types for the quick-mining engine.
//!
//! The host game owns the real world, actors, and inventories; this crate
//! defines the boundary the engine talks through (`Dimension`, `Actor`) plus
//! the value types crossing it (positions, permutations, item stacks), and
//! in-memory implementations used by tests and the demo binary.

pub mod actor;
pub mod block;
pub mod dimension;
pub mod item;
pub mod permutation;
pub mod pos;
pub mod prefs;

pub use actor::{is_standing_on, Actor, GameMode, MemoryActor};
pub use block::Block;
pub use dimension::{Dimension, MemoryDimension};
pub use item::{Durability, ItemStack};
pub use permutation::{Permutation, StateValue};
pub use pos::BlockPos;
pub use prefs::{CoveragePrefs, PlayerPrefs, ProtectionPrefs, QuickMiningMode};

/// Block type id used for empty space.
pub const AIR: &str = "minecraft:air";

/// Block type id water-logged blocks degrade into.
pub const WATER: &str = "minecraft:water";
