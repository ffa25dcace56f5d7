//! Refined mineral storage blocks and light-emitting minerals.

use qmine_loot::{EntryKind, LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Equivalence, LootRule, Tier, ToolKind, ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

fn mineral(tier: Tier) -> BlockDescriptor {
    BlockDescriptor::new(
        "dig.stone",
        ToolRule::new(ToolKind::Pickaxe, Coverage::Minerals).tier(tier),
    )
}

/// Silk touch keeps the block, otherwise a capped uniform count of the
/// dust-like drop.
fn lamp_table(block_id: &str, drop: &str, min: u32, max: u32) -> LootTable {
    LootTable::new()
        .when(
            LootCondition::silk_touch(),
            vec![LootPool::single(LootEntry::item(block_id, 1))],
        )
        .always(vec![LootPool::single(LootEntry::new(
            EntryKind::DiscreteUniform {
                drop: drop.to_string(),
                min,
                max,
                cap: Some(max),
            },
        ))])
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    reg.register_block("minecraft:coal_block", mineral(Tier::Any))?;
    reg.register_block("minecraft:quartz_block", mineral(Tier::Any))?;
    reg.register_block("minecraft:redstone_block", mineral(Tier::Any))?;
    reg.register_block("minecraft:iron_block", mineral(Tier::Stone))?;
    reg.register_block("minecraft:lapis_block", mineral(Tier::Stone))?;
    reg.register_block("minecraft:gold_block", mineral(Tier::Iron))?;
    reg.register_block("minecraft:diamond_block", mineral(Tier::Iron))?;
    reg.register_block("minecraft:emerald_block", mineral(Tier::Iron))?;
    reg.register_block("minecraft:netherite_block", mineral(Tier::Diamond))?;

    // Copper weathers in place. Every oxidation stage, waxed or not,
    // belongs to the same deposit.
    let copper_ids = [
        "minecraft:copper_block",
        "minecraft:exposed_copper",
        "minecraft:weathered_copper",
        "minecraft:oxidized_copper",
        "minecraft:waxed_copper",
        "minecraft:waxed_exposed_copper",
        "minecraft:waxed_weathered_copper",
        "minecraft:waxed_oxidized_copper",
    ];
    reg.register_blocks(
        &copper_ids,
        mineral(Tier::Stone)
            .equivalence(Equivalence::AnyOf(copper_ids.iter().map(|s| s.to_string()).collect())),
    )?;

    reg.register_block(
        "minecraft:bone_block",
        BlockDescriptor::new(
            "dig.bone_block",
            ToolRule::new(ToolKind::Pickaxe, Coverage::Minerals),
        )
        .equivalence(Equivalence::TypeIdOnly),
    )?;

    reg.register_block(
        "minecraft:glowstone",
        BlockDescriptor::new(
            "random.glass",
            ToolRule::new(ToolKind::Pickaxe, Coverage::Minerals),
        )
        .loot(LootRule::Table(lamp_table(
            "minecraft:glowstone",
            "minecraft:glowstone_dust",
            2,
            4,
        ))),
    )?;
    reg.register_block(
        "minecraft:sea_lantern",
        BlockDescriptor::new(
            "random.glass",
            ToolRule::new(ToolKind::Pickaxe, Coverage::Minerals),
        )
        .loot(LootRule::Table(lamp_table(
            "minecraft:sea_lantern",
            "minecraft:prismarine_crystals",
            2,
            5,
        ))),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::vanilla_registry;
    use qmine_world::{Block, BlockPos, ItemStack, Permutation, PlayerPrefs};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn block(id: &str) -> Block {
        Block {
            pos: BlockPos::new(0, 0, 0),
            permutation: Permutation::new(id),
            waterlogged: false,
            tags: Default::default(),
        }
    }

    #[test]
    fn copper_variants_are_mutually_equivalent() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:copper_block"));
        let a = Permutation::new("minecraft:copper_block");
        let b = Permutation::new("minecraft:waxed_oxidized_copper");
        assert!(desc.is_equivalent(&a, &b));
        assert!(!desc.is_equivalent(&a, &Permutation::new("minecraft:iron_block")));
    }

    #[test]
    fn bone_block_matches_any_orientation() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:bone_block"));
        let a = Permutation::new("minecraft:bone_block").with_state("pillar_axis", "x");
        let b = Permutation::new("minecraft:bone_block").with_state("pillar_axis", "z");
        assert!(desc.is_equivalent(&a, &b));
    }

    #[test]
    fn glowstone_drops_capped_dust() {
        let reg = vanilla_registry().unwrap();
        let b = block("minecraft:glowstone");
        let desc = reg.classify(&b);
        let fortune = ItemStack::new("minecraft:pick", 1)
            .with_tag("minecraft:is_pickaxe")
            .with_enchantment("fortune", 3);
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let drops = desc.resolve_loot(&b.permutation, Some(&fortune), &mut rng);
            assert_eq!(drops[0].type_id, "minecraft:glowstone_dust");
            assert!((2..=4).contains(&drops[0].amount));
        }
    }

    #[test]
    fn netherite_block_needs_a_diamond_pick() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:netherite_block");
        let desc = reg.classify(&b);
        let iron = ItemStack::new("minecraft:pick", 1)
            .with_tag("minecraft:is_pickaxe")
            .with_tag("minecraft:iron_tier");
        let diamond = ItemStack::new("minecraft:pick", 1)
            .with_tag("minecraft:is_pickaxe")
            .with_tag("minecraft:diamond_tier");
        assert!(!desc.is_tool_suitable(&b.permutation, Some(&iron), &prefs));
        assert!(desc.is_tool_suitable(&b.permutation, Some(&diamond), &prefs));
    }
}
