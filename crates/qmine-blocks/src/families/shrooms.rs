//! Huge mushrooms and the nether wart family.

use qmine_loot::{LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Equivalence, LootRule, Propagation, ToolKind, ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

/// Bedrock packs both caps and stems into one block per color, selected
/// by `huge_mushroom_bits`. Bits 10 and 15 are the stem faces.
fn mushroom_loot(block_id: &str, mushroom: &str) -> LootRule {
    // Stems drop the brown block under silk touch whatever their color,
    // and nothing otherwise.
    let stem = LootTable::new().when(
        LootCondition::silk_touch(),
        vec![LootPool::single(LootEntry::item(
            "minecraft:brown_mushroom_block",
            1,
        ))],
    );
    let cap = LootTable::new()
        .when(
            LootCondition::silk_touch(),
            vec![LootPool::single(LootEntry::item(block_id, 1))],
        )
        .always(vec![LootPool::single(LootEntry::item(mushroom, 1)).rolls(0, 2)]);
    LootRule::ByState {
        key: "huge_mushroom_bits",
        arms: vec![(10.into(), stem.clone()), (15.into(), stem)],
        fallback: Some(cap),
        assume_absent: None,
    }
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    for (block_id, mushroom) in [
        ("minecraft:brown_mushroom_block", "minecraft:brown_mushroom"),
        ("minecraft:red_mushroom_block", "minecraft:red_mushroom"),
    ] {
        reg.register_block(
            block_id,
            BlockDescriptor::new("dig.wood", ToolRule::new(ToolKind::Axe, Coverage::Mushrooms))
                .equivalence(Equivalence::TypeIdOnly)
                .propagation(Propagation::SameTypeId)
                .loot(mushroom_loot(block_id, mushroom)),
        )?;
    }

    // Wart blocks and shroomlight grow into each other inside huge
    // fungi, so a run crosses between them freely.
    let fungus_group = vec![
        "minecraft:nether_wart_block".to_string(),
        "minecraft:warped_wart_block".to_string(),
        "minecraft:shroomlight".to_string(),
    ];
    for (id, sound) in [
        ("minecraft:nether_wart_block", "dig.nether_wart"),
        ("minecraft:warped_wart_block", "dig.nether_wart"),
        ("minecraft:shroomlight", "dig.shroomlight"),
    ] {
        reg.register_block(
            id,
            BlockDescriptor::new(sound, ToolRule::new(ToolKind::Hoe, Coverage::Mushrooms))
                .equivalence(Equivalence::TypeIdOnly)
                .propagation(Propagation::Group(fungus_group.clone())),
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::descriptor::MiningWay;
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

    fn silk_axe() -> ItemStack {
        ItemStack::new("minecraft:iron_axe", 1)
            .with_tag("minecraft:is_axe")
            .with_enchantment("silk_touch", 1)
    }

    #[test]
    fn mushroom_runs_ignore_face_bits() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let desc = reg.classify(&block("minecraft:red_mushroom_block"));
        let cap = Permutation::new("minecraft:red_mushroom_block").with_state("huge_mushroom_bits", 14);
        let stem = Permutation::new("minecraft:red_mushroom_block").with_state("huge_mushroom_bits", 10);
        let brown = Permutation::new("minecraft:brown_mushroom_block");
        assert_eq!(desc.mining_way(&cap, &stem, &prefs), MiningWay::MineRegularly);
        assert_eq!(desc.mining_way(&cap, &brown, &prefs), MiningWay::LeaveAlone);
    }

    #[test]
    fn red_stem_silk_drops_the_brown_block() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:red_mushroom_block"));
        let stem = Permutation::new("minecraft:red_mushroom_block").with_state("huge_mushroom_bits", 15);
        let mut rng = StdRng::seed_from_u64(12);
        let drops = desc.resolve_loot(&stem, Some(&silk_axe()), &mut rng);
        assert_eq!(drops[0].type_id, "minecraft:brown_mushroom_block");
    }

    #[test]
    fn stem_without_silk_drops_nothing() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:brown_mushroom_block"));
        let stem = Permutation::new("minecraft:brown_mushroom_block").with_state("huge_mushroom_bits", 10);
        let mut rng = StdRng::seed_from_u64(13);
        assert!(desc.resolve_loot(&stem, None, &mut rng).is_empty());
    }

    #[test]
    fn caps_shed_up_to_two_mushrooms() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:red_mushroom_block"));
        let cap = Permutation::new("minecraft:red_mushroom_block").with_state("huge_mushroom_bits", 14);
        let mut rng = StdRng::seed_from_u64(14);
        for _ in 0..100 {
            let drops = desc.resolve_loot(&cap, None, &mut rng);
            let total: u32 = drops.iter().map(|s| s.amount).sum();
            assert!(total <= 2);
            for stack in &drops {
                assert_eq!(stack.type_id, "minecraft:red_mushroom");
            }
        }
    }

    #[test]
    fn wart_blocks_cross_into_shroomlight() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:warped_wart_block");
        let desc = reg.classify(&b);
        let hoe = ItemStack::new("minecraft:iron_hoe", 1).with_tag("minecraft:is_hoe");
        assert!(desc.is_tool_suitable(&b.permutation, Some(&hoe), &prefs));

        let origin = Permutation::new("minecraft:warped_wart_block");
        let light = Permutation::new("minecraft:shroomlight");
        let nether = Permutation::new("minecraft:nether_wart_block");
        assert_eq!(desc.mining_way(&origin, &light, &prefs), MiningWay::MineRegularly);
        assert_eq!(desc.mining_way(&origin, &nether, &prefs), MiningWay::MineRegularly);
    }
}
