//! Leaf blocks.

use qmine_loot::{LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Equivalence, LootRule, ToolKind, ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

/// Stick drop chance per fortune level.
const STICK_CHANCE: [f64; 4] = [1.0 / 50.0, 1.0 / 45.0, 1.0 / 40.0, 1.0 / 30.0];

/// Sapling chance for fast-growing species.
const SAPLING_CHANCE: [f64; 4] = [1.0 / 20.0, 1.0 / 16.0, 1.0 / 12.0, 1.0 / 10.0];

/// Sapling chance for species that hold on to them.
const RARE_SAPLING_CHANCE: [f64; 5] = [1.0 / 40.0, 1.0 / 36.0, 1.0 / 32.0, 1.0 / 24.0, 1.0 / 10.0];

const APPLE_CHANCE: [f64; 5] = [1.0 / 200.0, 1.0 / 180.0, 1.0 / 160.0, 1.0 / 120.0, 1.0 / 40.0];

fn chance_pool(drop: &str, chances: &[f64]) -> LootPool {
    LootPool::single(LootEntry::item(drop, 1).when(LootCondition::RandomChance(chances.to_vec())))
}

/// Shears or silk touch keep the leaf block; anything else shakes loose
/// sticks and the occasional sapling.
fn leaf_table(id: &str, sapling: Option<(&str, &[f64])>, apple: bool) -> LootTable {
    let keep = LootCondition::AnyOf(vec![
        LootCondition::tool_is("minecraft:shears"),
        LootCondition::silk_touch(),
    ]);
    let mut pools = vec![
        LootPool::single(
            LootEntry::item("minecraft:stick", 1).when(LootCondition::RandomChance(STICK_CHANCE.to_vec())),
        )
        .rolls(1, 2),
    ];
    if let Some((drop, chances)) = sapling {
        pools.push(chance_pool(drop, chances));
    }
    if apple {
        pools.push(chance_pool("minecraft:apple", &APPLE_CHANCE));
    }
    LootTable::new()
        .when(keep, vec![LootPool::single(LootEntry::item(id, 1))])
        .always(pools)
}

fn leaf(sound: &str, table: LootTable) -> BlockDescriptor {
    BlockDescriptor::new(sound, ToolRule::new(ToolKind::HoeOrShears, Coverage::Leaves))
        .equivalence(Equivalence::IgnoringState("update_bit"))
        .dependence(2)
        .loot(LootRule::Table(table))
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    let common: &[(&str, &str, &[f64])] = &[
        ("minecraft:oak_leaves", "minecraft:oak_sapling", &SAPLING_CHANCE),
        ("minecraft:spruce_leaves", "minecraft:spruce_sapling", &SAPLING_CHANCE),
        ("minecraft:birch_leaves", "minecraft:birch_sapling", &SAPLING_CHANCE),
        ("minecraft:cherry_leaves", "minecraft:cherry_sapling", &SAPLING_CHANCE),
        ("minecraft:pale_oak_leaves", "minecraft:pale_oak_sapling", &SAPLING_CHANCE),
        ("minecraft:jungle_leaves", "minecraft:jungle_sapling", &RARE_SAPLING_CHANCE),
        ("minecraft:acacia_leaves", "minecraft:acacia_sapling", &RARE_SAPLING_CHANCE),
        ("minecraft:dark_oak_leaves", "minecraft:dark_oak_sapling", &RARE_SAPLING_CHANCE),
    ];
    for (id, sapling, chances) in common {
        let apple = matches!(*id, "minecraft:oak_leaves" | "minecraft:dark_oak_leaves");
        let sound = if *id == "minecraft:cherry_leaves" {
            "break.cherry_leaves"
        } else {
            "dig.grass"
        };
        reg.register_block(*id, leaf(sound, leaf_table(id, Some((sapling, chances)), apple)))?;
    }

    // Mangrove leaves never carry a sapling; propagules grow separately.
    reg.register_block(
        "minecraft:mangrove_leaves",
        leaf("dig.grass", leaf_table("minecraft:mangrove_leaves", None, false)),
    )?;

    // The flowered and plain azalea leaves mix within one bush. Drops
    // are the matching azalea plant rather than a sapling.
    let azalea_ids = vec![
        "minecraft:azalea_leaves".to_string(),
        "minecraft:azalea_leaves_flowered".to_string(),
    ];
    let azalea_eq = Equivalence::CrossTypeSameState {
        ids: azalea_ids,
        state: "persistent_bit",
    };
    for (id, plant) in [
        ("minecraft:azalea_leaves", "minecraft:azalea"),
        ("minecraft:azalea_leaves_flowered", "minecraft:flowering_azalea"),
    ] {
        reg.register_block(
            id,
            leaf(
                "dig.azalea_leaves",
                leaf_table(id, Some((plant, &SAPLING_CHANCE)), false),
            )
            .equivalence(azalea_eq.clone()),
        )?;
    }

    Ok(())
}
