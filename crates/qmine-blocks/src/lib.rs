//! Block classification for the quick mining engine.
//!
//! Every block the engine can touch is described by a [`BlockDescriptor`]:
//! which tools suit it, which neighbours count as the same vein or trunk,
//! what it drops, and what it turns into. The [`BlockRegistry`] maps block
//! tags and type ids to descriptors and hands out a sentinel for anything
//! it does not know, so classification is total.

mod descriptor;
mod families;
mod registry;

pub use descriptor::{
    BlockDescriptor, BreakTransform, Coverage, DurabilityRule, Equivalence, Guard, LootRule,
    MiningWay, Propagation, Tier, ToolGate, ToolKind, ToolRule, TreeParts, XpYield,
};
pub use registry::{BlockRegistry, RegistryError};

/// Build the registry of vanilla block families.
pub fn vanilla_registry() -> Result<BlockRegistry, RegistryError> {
    let mut reg = BlockRegistry::new();
    families::register_all(&mut reg)?;
    Ok(reg)
}
