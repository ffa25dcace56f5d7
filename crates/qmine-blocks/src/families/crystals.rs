//! Amethyst geodes.

use qmine_loot::{EntryKind, LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Guard, LootRule, ToolKind, ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

fn crystal(sound: &str) -> BlockDescriptor {
    BlockDescriptor::new(sound, ToolRule::new(ToolKind::Pickaxe, Coverage::Crystals))
}

fn silk_only_table(id: &str) -> LootTable {
    LootTable::new().when(
        LootCondition::silk_touch(),
        vec![LootPool::single(LootEntry::item(id, 1))],
    )
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    reg.register_block("minecraft:amethyst_block", crystal("break.amethyst_block"))?;

    // Buds survive harvest only under silk touch, both as a gate and in
    // the drop.
    for (id, sound) in [
        ("minecraft:small_amethyst_bud", "break.small_amethyst_bud"),
        ("minecraft:medium_amethyst_bud", "break.medium_amethyst_bud"),
        ("minecraft:large_amethyst_bud", "break.large_amethyst_bud"),
    ] {
        reg.register_block(
            id,
            BlockDescriptor::new(
                sound,
                ToolRule::new(ToolKind::Pickaxe, Coverage::Crystals).needs_silk_touch(),
            )
            .loot(LootRule::Table(silk_only_table(id))),
        )?;
    }

    reg.register_block(
        "minecraft:amethyst_cluster",
        crystal("break.amethyst_cluster").loot(LootRule::Table(
            LootTable::new()
                .when(
                    LootCondition::silk_touch(),
                    vec![LootPool::single(LootEntry::item(
                        "minecraft:amethyst_cluster",
                        1,
                    ))],
                )
                .always(vec![LootPool::single(LootEntry::new(
                    EntryKind::Multiplicative {
                        drop: "minecraft:amethyst_shard".to_string(),
                        min: 4,
                        max: 4,
                    },
                ))]),
        )),
    )?;

    // Budding amethyst can never be regrown, so the engine refuses to
    // break it for survival players who keep the safeguard on.
    reg.register_block(
        "minecraft:budding_amethyst",
        BlockDescriptor::new("break.amethyst_block", ToolRule::nothing())
            .guard(Guard::BuddingAmethyst),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::vanilla_registry;
    use qmine_world::{Block, BlockPos, GameMode, ItemStack, Permutation, PlayerPrefs};
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
    fn buds_require_silk_touch_to_start() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:small_amethyst_bud");
        let desc = reg.classify(&b);
        assert!(!desc.is_tool_suitable(&b.permutation, Some(&pick()), &prefs));
        let silk = pick().with_enchantment("silk_touch", 1);
        assert!(desc.is_tool_suitable(&b.permutation, Some(&silk), &prefs));
    }

    #[test]
    fn cluster_drops_four_shards_without_silk() {
        let reg = vanilla_registry().unwrap();
        let b = block("minecraft:amethyst_cluster");
        let desc = reg.classify(&b);
        let mut rng = StdRng::seed_from_u64(6);
        let drops = desc.resolve_loot(&b.permutation, Some(&pick()), &mut rng);
        assert_eq!(drops[0].type_id, "minecraft:amethyst_shard");
        assert_eq!(drops[0].amount, 4);
    }

    #[test]
    fn budding_amethyst_is_guarded_in_survival() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:budding_amethyst");
        let desc = reg.classify(&b);
        assert!(desc.is_protected(GameMode::Survival, &prefs));
        assert!(!desc.is_protected(GameMode::Creative, &prefs));
        let silk = pick().with_enchantment("silk_touch", 1);
        assert!(!desc.is_tool_suitable(&b.permutation, Some(&silk), &prefs));
    }
}
