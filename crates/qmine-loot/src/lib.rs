//! Loot resolution: tables, pools, entries, and tool conditions.
//!
//! Block descriptors attach a [`LootTable`]; the miner resolves it against
//! the tool in the player's hand at commit time. All randomness flows
//! through a caller-supplied [`rand::Rng`] so tests can seed it.

pub mod condition;
pub mod entry;
pub mod table;

pub use condition::LootCondition;
pub use entry::{EntryKind, LootEntry};
pub use table::{LootPool, LootTable};

use qmine_world::ItemStack;

pub const ENCHANT_FORTUNE: &str = "fortune";
pub const ENCHANT_SILK_TOUCH: &str = "silk_touch";
pub const ENCHANT_MENDING: &str = "mending";

/// Fortune level on the tool, 0 for no tool or no enchantment.
pub fn fortune_level(tool: Option<&ItemStack>) -> u32 {
    tool.map_or(0, |t| t.enchant_level(ENCHANT_FORTUNE))
}

/// Whether the tool carries silk touch.
pub fn has_silk_touch(tool: Option<&ItemStack>) -> bool {
    tool.is_some_and(|t| t.has_enchantment(ENCHANT_SILK_TOUCH))
}
