//! Farmable plants, crops, and the creeping growths.

use qmine_loot::{EntryKind, LootCondition, LootEntry, LootPool, LootTable};
use qmine_world::StateValue;

use crate::descriptor::{
    BlockDescriptor, Coverage, DurabilityRule, Equivalence, LootRule, ToolGate, ToolKind, ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

/// Extra-seed probability per chance for mature crops.
const CROP_SEED_P: f64 = 0.57;

fn crop(sound: &str, table: LootTable) -> BlockDescriptor {
    // Harvesting with a hoe is free; crops only join a run when mature.
    BlockDescriptor::new(
        sound,
        ToolRule::new(ToolKind::Hoe, Coverage::Crops)
            .gated(ToolGate::StateEquals("growth", StateValue::Int(7))),
    )
    .durability(DurabilityRule::Never)
    .loot(LootRule::Table(table))
}

fn binomial(drop: &str) -> EntryKind {
    EntryKind::Binomial {
        drop: drop.to_string(),
        n: 3,
        p: CROP_SEED_P,
    }
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    reg.register_block(
        "minecraft:melon_block",
        BlockDescriptor::new("dig.wood", ToolRule::new(ToolKind::Axe, Coverage::Plants)).loot(
            LootRule::Table(
                LootTable::new()
                    .when(
                        LootCondition::silk_touch(),
                        vec![LootPool::single(LootEntry::item("minecraft:melon_block", 1))],
                    )
                    .always(vec![LootPool::single(LootEntry::new(
                        EntryKind::DiscreteUniform {
                            drop: "minecraft:melon_slice".to_string(),
                            min: 3,
                            max: 7,
                            cap: Some(9),
                        },
                    ))]),
            ),
        ),
    )?;

    for id in [
        "minecraft:pumpkin",
        "minecraft:carved_pumpkin",
        "minecraft:lit_pumpkin",
    ] {
        reg.register_block(
            id,
            BlockDescriptor::new("dig.wood", ToolRule::new(ToolKind::Axe, Coverage::Plants)),
        )?;
    }

    // Nether wart counts an absent age as fully grown.
    reg.register_block(
        "minecraft:nether_wart",
        BlockDescriptor::new("dig.nether_wart", ToolRule::new(ToolKind::Hoe, Coverage::Crops))
            .durability(DurabilityRule::Never)
            .loot(LootRule::ByState {
                key: "age",
                arms: vec![(
                    StateValue::Int(3),
                    LootTable::new().always(vec![LootPool::single(LootEntry::new(
                        EntryKind::DiscreteUniform {
                            drop: "minecraft:nether_wart".to_string(),
                            min: 2,
                            max: 4,
                            cap: None,
                        },
                    ))]),
                )],
                fallback: Some(LootTable::fixed("minecraft:nether_wart", 1)),
                assume_absent: Some(StateValue::Int(3)),
            }),
    )?;

    reg.register_block(
        "minecraft:wheat",
        crop(
            "dig.grass",
            LootTable::new().always(vec![
                LootPool::single(LootEntry::item("minecraft:wheat", 1)),
                LootPool::single(LootEntry::new(binomial("minecraft:wheat_seeds"))),
            ]),
        ),
    )?;
    reg.register_block(
        "minecraft:beetroot",
        crop(
            "dig.grass",
            LootTable::new().always(vec![
                LootPool::single(LootEntry::item("minecraft:beetroot", 1)),
                LootPool::single(LootEntry::new(binomial("minecraft:beetroot_seeds"))),
            ]),
        ),
    )?;
    // Carrots and potatoes are their own seed.
    reg.register_block(
        "minecraft:carrots",
        crop(
            "dig.grass",
            LootTable::new().always(vec![LootPool::single(LootEntry::new(binomial(
                "minecraft:carrot",
            )))]),
        ),
    )?;
    reg.register_block(
        "minecraft:potatoes",
        crop(
            "dig.grass",
            LootTable::new().always(vec![
                LootPool::single(LootEntry::new(binomial("minecraft:potato"))),
                LootPool::single(
                    LootEntry::item("minecraft:poisonous_potato", 1)
                        .when(LootCondition::RandomChance(vec![0.02])),
                ),
            ]),
        ),
    )?;

    // Tall grass keeps its shape under shears, otherwise it may shed
    // seeds. Hoes cut it for free.
    reg.register_block(
        "minecraft:tallgrass",
        BlockDescriptor::new(
            "dig.grass",
            ToolRule::new(ToolKind::HoeOrShears, Coverage::Plants),
        )
        .durability(DurabilityRule::NotWithHoe)
        .equivalence(Equivalence::FernLike)
        .loot(LootRule::Table(
            LootTable::new()
                .when(
                    LootCondition::tool_is("minecraft:shears"),
                    vec![LootPool::single(LootEntry::item("minecraft:tallgrass", 1))],
                )
                .always(vec![LootPool::single(LootEntry::new(EntryKind::GrassLike {
                    drop: "minecraft:wheat_seeds".to_string(),
                }))]),
        )),
    )?;

    reg.register_block(
        "minecraft:glow_lichen",
        BlockDescriptor::new("dig.grass", ToolRule::new(ToolKind::Shears, Coverage::Plants))
            .equivalence(Equivalence::IgnoringState("multi_face_direction_bits"))
            .loot(LootRule::MultiFaceCount {
                silk_touch_only: false,
            }),
    )?;

    reg.register_block(
        "minecraft:vine",
        BlockDescriptor::new("dig.roots", ToolRule::new(ToolKind::Shears, Coverage::Plants))
            .equivalence(Equivalence::IgnoringState("vine_direction_bits"))
            .loot(LootRule::Table(LootTable::new().when(
                LootCondition::tool_is("minecraft:shears"),
                vec![LootPool::single(LootEntry::item("minecraft:vine", 1))],
            ))),
    )?;

    Ok(())
}
