//! Ore blocks.

use qmine_loot::{EntryKind, LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Equivalence, LootRule, Tier, ToolKind, ToolRule, XpYield,
};
use crate::registry::{BlockRegistry, RegistryError};

/// Silk touch drops the ore block itself, otherwise the refined entry
/// applies.
fn ore_table(silk_drop: &str, kind: EntryKind) -> LootTable {
    LootTable::new()
        .when(
            LootCondition::silk_touch(),
            vec![LootPool::single(LootEntry::item(silk_drop, 1))],
        )
        .always(vec![LootPool::single(LootEntry::new(kind))])
}

fn mult(drop: &str, min: u32, max: u32) -> EntryKind {
    EntryKind::Multiplicative {
        drop: drop.to_string(),
        min,
        max,
    }
}

fn ore(sound: &str, tier: Tier, table: LootTable, xp: XpYield) -> BlockDescriptor {
    BlockDescriptor::new(sound, ToolRule::new(ToolKind::Pickaxe, Coverage::Ores).tier(tier))
        .loot(LootRule::Table(table))
        .xp(xp)
}

/// Register the stone and deepslate variants of one overworld ore. The
/// two variants do not propagate into each other.
fn register_pair(
    reg: &mut BlockRegistry,
    stone_id: &str,
    deepslate_id: &str,
    tier: Tier,
    kind: EntryKind,
    xp: XpYield,
) -> Result<(), RegistryError> {
    reg.register_block(
        stone_id,
        ore("dig.stone", tier, ore_table(stone_id, kind.clone()), xp),
    )?;
    reg.register_block(
        deepslate_id,
        ore("dig.deepslate", tier, ore_table(deepslate_id, kind), xp),
    )
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    register_pair(
        reg,
        "minecraft:coal_ore",
        "minecraft:deepslate_coal_ore",
        Tier::Any,
        mult("minecraft:coal", 1, 1),
        XpYield::Range(0, 2),
    )?;
    register_pair(
        reg,
        "minecraft:copper_ore",
        "minecraft:deepslate_copper_ore",
        Tier::Stone,
        mult("minecraft:raw_copper", 2, 5),
        XpYield::None,
    )?;
    // Diamond ore yields no experience here; diamonds are reward enough.
    register_pair(
        reg,
        "minecraft:diamond_ore",
        "minecraft:deepslate_diamond_ore",
        Tier::Iron,
        mult("minecraft:diamond", 1, 1),
        XpYield::None,
    )?;
    register_pair(
        reg,
        "minecraft:emerald_ore",
        "minecraft:deepslate_emerald_ore",
        Tier::Iron,
        mult("minecraft:emerald", 1, 1),
        XpYield::Range(3, 7),
    )?;
    register_pair(
        reg,
        "minecraft:gold_ore",
        "minecraft:deepslate_gold_ore",
        Tier::Iron,
        mult("minecraft:raw_gold", 1, 1),
        XpYield::None,
    )?;
    register_pair(
        reg,
        "minecraft:iron_ore",
        "minecraft:deepslate_iron_ore",
        Tier::Stone,
        mult("minecraft:raw_iron", 1, 1),
        XpYield::None,
    )?;
    register_pair(
        reg,
        "minecraft:lapis_ore",
        "minecraft:deepslate_lapis_ore",
        Tier::Stone,
        mult("minecraft:lapis_lazuli", 4, 9),
        XpYield::Range(2, 5),
    )?;

    reg.register_block(
        "minecraft:nether_gold_ore",
        ore(
            "dig.nether_gold_ore",
            Tier::Any,
            ore_table("minecraft:nether_gold_ore", mult("minecraft:gold_nugget", 2, 6)),
            XpYield::Range(0, 1),
        ),
    )?;
    reg.register_block(
        "minecraft:quartz_ore",
        ore(
            "dig.stone",
            Tier::Any,
            ore_table("minecraft:quartz_ore", mult("minecraft:quartz", 1, 1)),
            XpYield::Range(2, 5),
        ),
    )?;

    register_redstone(reg)?;

    reg.register_block(
        "minecraft:ancient_debris",
        ore(
            "dig.ancient_debris",
            Tier::Diamond,
            LootTable::fixed("minecraft:ancient_debris", 1),
            XpYield::None,
        ),
    )?;

    Ok(())
}

/// Redstone ore lights up when touched, so the lit and unlit forms are
/// the same vein. Drop count is uniform rather than multiplied, and
/// fortune only adds to it.
fn register_redstone(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    let redstone = EntryKind::DiscreteUniform {
        drop: "minecraft:redstone".to_string(),
        min: 4,
        max: 5,
        cap: None,
    };

    let surface = Equivalence::AnyOf(vec![
        "minecraft:redstone_ore".to_string(),
        "minecraft:lit_redstone_ore".to_string(),
    ]);
    for id in ["minecraft:redstone_ore", "minecraft:lit_redstone_ore"] {
        reg.register_block(
            id,
            ore(
                "dig.stone",
                Tier::Iron,
                ore_table("minecraft:redstone_ore", redstone.clone()),
                XpYield::Range(2, 5),
            )
            .equivalence(surface.clone()),
        )?;
    }

    let deep = Equivalence::AnyOf(vec![
        "minecraft:deepslate_redstone_ore".to_string(),
        "minecraft:lit_deepslate_redstone_ore".to_string(),
    ]);
    for id in [
        "minecraft:deepslate_redstone_ore",
        "minecraft:lit_deepslate_redstone_ore",
    ] {
        reg.register_block(
            id,
            ore(
                "dig.deepslate",
                Tier::Iron,
                ore_table("minecraft:deepslate_redstone_ore", redstone.clone()),
                XpYield::Range(2, 3),
            )
            .equivalence(deep.clone()),
        )?;
    }
    Ok(())
}
