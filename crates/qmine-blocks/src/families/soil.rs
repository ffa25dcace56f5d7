//! Soils: everything a shovel or a hoe turns over.

use qmine_loot::{EntryKind, LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Equivalence, LootRule, ToolGate, ToolKind, ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

fn soil(sound: &str) -> BlockDescriptor {
    BlockDescriptor::new(sound, ToolRule::new(ToolKind::Shovel, Coverage::Soil))
}

/// Silk touch keeps the block, otherwise bare dirt remains of it.
fn crust_table(id: &str) -> LootTable {
    LootTable::new()
        .when(
            LootCondition::silk_touch(),
            vec![LootPool::single(LootEntry::item(id, 1))],
        )
        .always(vec![LootPool::single(LootEntry::item("minecraft:dirt", 1))])
}

fn silk_or_many(id: &str, drop: &str, amount: u32) -> LootTable {
    LootTable::new()
        .when(
            LootCondition::silk_touch(),
            vec![LootPool::single(LootEntry::item(id, 1))],
        )
        .always(vec![LootPool::single(LootEntry::item(drop, amount))])
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    reg.register_block("minecraft:dirt", soil("dig.gravel"))?;
    reg.register_block("minecraft:dirt_with_roots", soil("dig.gravel"))?;

    for id in [
        "minecraft:grass_block",
        "minecraft:grass_path",
        "minecraft:mycelium",
        "minecraft:podzol",
    ] {
        reg.register_block(id, soil("dig.grass").loot(LootRule::Table(crust_table(id))))?;
    }

    // Farmland reverts to dirt no matter the tool, and dry or wet rows
    // belong to the same field.
    reg.register_block(
        "minecraft:farmland",
        soil("dig.gravel")
            .equivalence(Equivalence::IgnoringState("moisturized_amount"))
            .loot(LootRule::Table(LootTable::fixed("minecraft:dirt", 1))),
    )?;

    reg.register_block("minecraft:sand", soil("dig.sand"))?;
    reg.register_block("minecraft:red_sand", soil("dig.sand"))?;

    reg.register_block(
        "minecraft:gravel",
        soil("dig.gravel").loot(LootRule::Table(
            LootTable::new()
                .when(
                    LootCondition::silk_touch(),
                    vec![LootPool::single(LootEntry::item("minecraft:gravel", 1))],
                )
                .always(vec![LootPool::single(LootEntry::new(EntryKind::GravelLike {
                    raw: "minecraft:gravel".to_string(),
                    refined: "minecraft:flint".to_string(),
                }))]),
        )),
    )?;

    reg.register_block(
        "minecraft:clay",
        soil("dig.gravel").loot(LootRule::Table(silk_or_many(
            "minecraft:clay",
            "minecraft:clay_ball",
            4,
        ))),
    )?;
    reg.register_block("minecraft:mud", soil("block.mud.break"))?;

    reg.register_block(
        "minecraft:snow",
        soil("dig.snow")
            .equivalence(Equivalence::SnowLike)
            .loot(LootRule::Table(silk_or_many(
                "minecraft:snow",
                "minecraft:snowball",
                4,
            ))),
    )?;
    // Layers on top of a plant stay where they are.
    reg.register_block(
        "minecraft:snow_layer",
        BlockDescriptor::new(
            "dig.snow",
            ToolRule::new(ToolKind::Shovel, Coverage::Soil).gated(ToolGate::StateFalse("covered_bit")),
        )
        .equivalence(Equivalence::SnowLike)
        .loot(LootRule::SnowLayers),
    )?;

    reg.register_block("minecraft:soul_sand", soil("dig.soul_sand"))?;
    reg.register_block("minecraft:soul_soil", soil("dig.soul_soil"))?;

    for id in ["minecraft:moss_block", "minecraft:pale_moss_block"] {
        reg.register_block(
            id,
            BlockDescriptor::new("dig.moss", ToolRule::new(ToolKind::Hoe, Coverage::Soil)),
        )?;
    }
    for id in ["minecraft:moss_carpet", "minecraft:pale_moss_carpet"] {
        reg.register_block(
            id,
            BlockDescriptor::new("dig.moss", ToolRule::new(ToolKind::Hoe, Coverage::Soil))
                .dependence(2),
        )?;
    }

    Ok(())
}
