//! Sculk growths.

use qmine_loot::{LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Equivalence, LootRule, ToolKind, ToolRule, XpYield,
};
use crate::registry::{BlockRegistry, RegistryError};

fn silk_only_table(id: &str) -> LootTable {
    LootTable::new().when(
        LootCondition::silk_touch(),
        vec![LootPool::single(LootEntry::item(id, 1))],
    )
}

fn sculk(id: &str, sound: &str, xp: u32) -> BlockDescriptor {
    BlockDescriptor::new(sound, ToolRule::new(ToolKind::Hoe, Coverage::Sculk))
        .loot(LootRule::Table(silk_only_table(id)))
        .xp(XpYield::Range(xp, xp))
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    reg.register_block("minecraft:sculk", sculk("minecraft:sculk", "break.sculk", 1))?;
    reg.register_block(
        "minecraft:sculk_catalyst",
        sculk("minecraft:sculk_catalyst", "break.sculk_catalyst", 5),
    )?;
    reg.register_block(
        "minecraft:sculk_sensor",
        sculk("minecraft:sculk_sensor", "break.sculk_sensor", 5),
    )?;
    reg.register_block(
        "minecraft:sculk_shrieker",
        sculk("minecraft:sculk_shrieker", "break.sculk_shrieker", 5),
    )?;

    // Veins drop one per occupied face, silk touch only.
    reg.register_block(
        "minecraft:sculk_vein",
        BlockDescriptor::new("break.sculk_vein", ToolRule::new(ToolKind::Hoe, Coverage::Sculk))
            .equivalence(Equivalence::IgnoringState("multi_face_direction_bits"))
            .loot(LootRule::MultiFaceCount {
                silk_touch_only: true,
            }),
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

    fn hoe() -> ItemStack {
        ItemStack::new("minecraft:iron_hoe", 1).with_tag("minecraft:is_hoe")
    }

    #[test]
    fn sculk_wants_a_hoe() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:sculk");
        let desc = reg.classify(&b);
        assert!(desc.is_tool_suitable(&b.permutation, Some(&hoe()), &prefs));
        let pick = ItemStack::new("minecraft:pick", 1).with_tag("minecraft:is_pickaxe");
        assert!(!desc.is_tool_suitable(&b.permutation, Some(&pick), &prefs));
    }

    #[test]
    fn xp_flows_only_without_silk_touch() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:sculk_catalyst"));
        let mut rng = StdRng::seed_from_u64(16);
        assert_eq!(desc.experience(Some(&hoe()), &mut rng), 5);
        let silk = hoe().with_enchantment("silk_touch", 1);
        assert_eq!(desc.experience(Some(&silk), &mut rng), 0);
    }

    #[test]
    fn vein_drops_count_faces_under_silk_touch() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:sculk_vein"));
        let vein = Permutation::new("minecraft:sculk_vein").with_state("multi_face_direction_bits", 0b101);
        let mut rng = StdRng::seed_from_u64(17);
        assert!(desc.resolve_loot(&vein, Some(&hoe()), &mut rng).is_empty());
        let silk = hoe().with_enchantment("silk_touch", 1);
        let drops = desc.resolve_loot(&vein, Some(&silk), &mut rng);
        assert_eq!(drops[0].amount, 2);
    }

    #[test]
    fn vein_faces_do_not_split_a_patch() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:sculk_vein"));
        let a = Permutation::new("minecraft:sculk_vein").with_state("multi_face_direction_bits", 1);
        let b = Permutation::new("minecraft:sculk_vein").with_state("multi_face_direction_bits", 63);
        assert!(desc.is_equivalent(&a, &b));
    }
}
