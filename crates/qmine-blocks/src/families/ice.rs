//! Ice blocks.

use qmine_loot::{LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, BreakTransform, Coverage, LootRule, ToolKind, ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

fn silk_only_table(id: &str) -> LootTable {
    LootTable::new().when(
        LootCondition::silk_touch(),
        vec![LootPool::single(LootEntry::item(id, 1))],
    )
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    // Plain ice melts into water when mined without silk touch, unless
    // there is nothing underneath to hold it.
    reg.register_block(
        "minecraft:ice",
        BlockDescriptor::new("random.glass", ToolRule::new(ToolKind::Pickaxe, Coverage::Ice))
            .loot(LootRule::Table(silk_only_table("minecraft:ice")))
            .transform(BreakTransform::IceMelt),
    )?;

    // Packed and blue ice will not even join a run without silk touch.
    for id in ["minecraft:packed_ice", "minecraft:blue_ice"] {
        reg.register_block(
            id,
            BlockDescriptor::new(
                "random.glass",
                ToolRule::new(ToolKind::Pickaxe, Coverage::Ice).needs_silk_touch(),
            )
            .loot(LootRule::Table(silk_only_table(id))),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::descriptor::BreakTransform;
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

    fn pick() -> ItemStack {
        ItemStack::new("minecraft:pick", 1).with_tag("minecraft:is_pickaxe")
    }

    #[test]
    fn plain_ice_takes_any_pickaxe_but_melts() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:ice");
        let desc = reg.classify(&b);
        assert!(desc.is_tool_suitable(&b.permutation, Some(&pick()), &prefs));
        assert_eq!(desc.break_transform(), BreakTransform::IceMelt);

        let mut rng = StdRng::seed_from_u64(15);
        assert!(desc.resolve_loot(&b.permutation, Some(&pick()), &mut rng).is_empty());
        let silk = pick().with_enchantment("silk_touch", 1);
        let drops = desc.resolve_loot(&b.permutation, Some(&silk), &mut rng);
        assert_eq!(drops[0].type_id, "minecraft:ice");
    }

    #[test]
    fn packed_ice_demands_silk_touch_up_front() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:packed_ice");
        let desc = reg.classify(&b);
        assert!(!desc.is_tool_suitable(&b.permutation, Some(&pick()), &prefs));
        let silk = pick().with_enchantment("silk_touch", 1);
        assert!(desc.is_tool_suitable(&b.permutation, Some(&silk), &prefs));
        assert_eq!(desc.break_transform(), BreakTransform::Default);
    }
}
