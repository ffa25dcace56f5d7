//! Bulk stone and its nether cousins.

use qmine_loot::{LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, Equivalence, LootRule, Tier, ToolKind, ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

fn rock(sound: &str) -> BlockDescriptor {
    BlockDescriptor::new(sound, ToolRule::new(ToolKind::Pickaxe, Coverage::Rocks))
}

/// Silk touch keeps the block, otherwise it crumbles into `rubble`.
fn crumble_table(id: &str, rubble: &str) -> LootTable {
    LootTable::new()
        .when(
            LootCondition::silk_touch(),
            vec![LootPool::single(LootEntry::item(id, 1))],
        )
        .always(vec![LootPool::single(LootEntry::item(rubble, 1))])
}

const COLORS: [&str; 16] = [
    "white", "orange", "magenta", "light_blue", "yellow", "lime", "pink", "gray", "light_gray",
    "cyan", "purple", "blue", "brown", "green", "red", "black",
];

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    reg.register_block(
        "minecraft:stone",
        rock("dig.stone").loot(LootRule::Table(crumble_table(
            "minecraft:stone",
            "minecraft:cobblestone",
        ))),
    )?;
    reg.register_block("minecraft:cobblestone", rock("dig.stone"))?;
    reg.register_block("minecraft:mossy_cobblestone", rock("dig.stone"))?;

    reg.register_block(
        "minecraft:deepslate",
        rock("dig.deepslate")
            .equivalence(Equivalence::IgnoringState("pillar_axis"))
            .loot(LootRule::Table(crumble_table(
                "minecraft:deepslate",
                "minecraft:cobbled_deepslate",
            ))),
    )?;
    reg.register_block("minecraft:cobbled_deepslate", rock("dig.deepslate"))?;

    for id in [
        "minecraft:end_stone",
        "minecraft:andesite",
        "minecraft:diorite",
        "minecraft:granite",
        "minecraft:blackstone",
        "minecraft:magma",
    ] {
        reg.register_block(id, rock("dig.stone"))?;
    }
    reg.register_block(
        "minecraft:basalt",
        rock("dig.basalt").equivalence(Equivalence::IgnoringState("pillar_axis")),
    )?;
    reg.register_block("minecraft:tuff", rock("break.tuff"))?;
    reg.register_block("minecraft:calcite", rock("break.calcite"))?;
    reg.register_block("minecraft:dripstone_block", rock("break.dripstone_block"))?;

    for id in ["minecraft:obsidian", "minecraft:crying_obsidian"] {
        reg.register_block(
            id,
            BlockDescriptor::new(
                "dig.stone",
                ToolRule::new(ToolKind::Pickaxe, Coverage::Rocks).tier(Tier::Diamond),
            ),
        )?;
    }

    reg.register_block("minecraft:netherrack", rock("dig.netherrack"))?;
    for id in ["minecraft:crimson_nylium", "minecraft:warped_nylium"] {
        reg.register_block(
            id,
            rock("dig.nylium").loot(LootRule::Table(crumble_table(id, "minecraft:netherrack"))),
        )?;
    }

    reg.register_block("minecraft:hardened_clay", rock("dig.stone"))?;
    for color in COLORS {
        reg.register_block(format!("minecraft:{color}_terracotta"), rock("dig.stone"))?;
    }

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

    fn pick() -> ItemStack {
        ItemStack::new("minecraft:pick", 1).with_tag("minecraft:is_pickaxe")
    }

    #[test]
    fn stone_crumbles_to_cobblestone() {
        let reg = vanilla_registry().unwrap();
        let b = block("minecraft:stone");
        let desc = reg.classify(&b);
        let mut rng = StdRng::seed_from_u64(23);
        let drops = desc.resolve_loot(&b.permutation, Some(&pick()), &mut rng);
        assert_eq!(drops[0].type_id, "minecraft:cobblestone");
        let silk = pick().with_enchantment("silk_touch", 1);
        let drops = desc.resolve_loot(&b.permutation, Some(&silk), &mut rng);
        assert_eq!(drops[0].type_id, "minecraft:stone");
    }

    #[test]
    fn deepslate_pillars_match_either_axis() {
        let reg = vanilla_registry().unwrap();
        let desc = reg.classify(&block("minecraft:deepslate"));
        let a = Permutation::new("minecraft:deepslate").with_state("pillar_axis", "x");
        let b = Permutation::new("minecraft:deepslate").with_state("pillar_axis", "y");
        assert!(desc.is_equivalent(&a, &b));
        assert_eq!(desc.breaking_sound(), "dig.deepslate");
    }

    #[test]
    fn obsidian_needs_a_diamond_pick() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:obsidian");
        let desc = reg.classify(&b);
        assert!(!desc.is_tool_suitable(&b.permutation, Some(&pick()), &prefs));
        let diamond = pick().with_tag("minecraft:diamond_tier");
        assert!(desc.is_tool_suitable(&b.permutation, Some(&diamond), &prefs));
    }

    #[test]
    fn nylium_sheds_its_crust() {
        let reg = vanilla_registry().unwrap();
        let b = block("minecraft:warped_nylium");
        let desc = reg.classify(&b);
        let mut rng = StdRng::seed_from_u64(24);
        let drops = desc.resolve_loot(&b.permutation, Some(&pick()), &mut rng);
        assert_eq!(drops[0].type_id, "minecraft:netherrack");
    }

    #[test]
    fn every_terracotta_color_is_known() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        for color in super::COLORS {
            let b = block(&format!("minecraft:{color}_terracotta"));
            let desc = reg.classify(&b);
            assert!(
                desc.is_tool_suitable(&b.permutation, Some(&pick()), &prefs),
                "{color} terracotta unclassified"
            );
        }
    }
}
