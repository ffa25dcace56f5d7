//! Coral reefs.

use qmine_loot::{LootCondition, LootEntry, LootPool, LootTable};

use crate::descriptor::{
    BlockDescriptor, Coverage, DurabilityRule, Equivalence, LootRule, Propagation, ToolKind,
    ToolRule,
};
use crate::registry::{BlockRegistry, RegistryError};

const COLORS: [&str; 5] = ["tube", "brain", "bubble", "fire", "horn"];

/// Every fragile reef growth that comes down with a coral block.
fn reef_bonus() -> Vec<String> {
    let mut ids = vec!["minecraft:sea_pickle".to_string()];
    for color in COLORS {
        ids.push(format!("minecraft:{color}_coral"));
        ids.push(format!("minecraft:dead_{color}_coral"));
        ids.push(format!("minecraft:{color}_coral_fan"));
        ids.push(format!("minecraft:dead_{color}_coral_fan"));
    }
    ids
}

fn silk_only_table(id: &str) -> LootTable {
    LootTable::new().when(
        LootCondition::silk_touch(),
        vec![LootPool::single(LootEntry::item(id, 1))],
    )
}

pub(crate) fn register(reg: &mut BlockRegistry) -> Result<(), RegistryError> {
    // Coral plants and fans are too fragile to harvest without silk
    // touch, and cutting them costs nothing.
    for id in reef_bonus() {
        if id == "minecraft:sea_pickle" {
            continue;
        }
        reg.register_block(
            id.clone(),
            BlockDescriptor::new(
                "dig.stone",
                ToolRule::new(ToolKind::Pickaxe, Coverage::Plants).needs_silk_touch(),
            )
            .equivalence(Equivalence::TypeIdOnly)
            .dependence(2)
            .durability(DurabilityRule::Never)
            .loot(LootRule::Table(silk_only_table(&id))),
        )?;
    }
    reg.register_block(
        "minecraft:sea_pickle",
        BlockDescriptor::new("dig.grass", ToolRule::nothing())
            .equivalence(Equivalence::TypeIdOnly)
            .dependence(2),
    )?;

    for color in COLORS {
        let live = format!("minecraft:{color}_coral_block");
        let dead = format!("minecraft:dead_{color}_coral_block");

        // Mining a live block without silk touch kills it.
        reg.register_block(
            live.clone(),
            BlockDescriptor::new("dig.stone", ToolRule::new(ToolKind::Pickaxe, Coverage::Plants))
                .equivalence(Equivalence::TypeIdOnly)
                .propagation(Propagation::Colony {
                    bonus: reef_bonus(),
                })
                .loot(LootRule::Table(
                    LootTable::new()
                        .when(
                            LootCondition::silk_touch(),
                            vec![LootPool::single(LootEntry::item(&live, 1))],
                        )
                        .always(vec![LootPool::single(LootEntry::item(&dead, 1))]),
                )),
        )?;
        reg.register_block(
            dead.clone(),
            BlockDescriptor::new("dig.stone", ToolRule::new(ToolKind::Pickaxe, Coverage::Plants))
                .equivalence(Equivalence::TypeIdOnly)
                .propagation(Propagation::Colony {
                    bonus: reef_bonus(),
                }),
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

    fn pick() -> ItemStack {
        ItemStack::new("minecraft:pick", 1).with_tag("minecraft:is_pickaxe")
    }

    #[test]
    fn live_coral_block_dies_without_silk_touch() {
        let reg = vanilla_registry().unwrap();
        let b = block("minecraft:brain_coral_block");
        let desc = reg.classify(&b);
        let mut rng = StdRng::seed_from_u64(29);
        let drops = desc.resolve_loot(&b.permutation, Some(&pick()), &mut rng);
        assert_eq!(drops[0].type_id, "minecraft:dead_brain_coral_block");
        let silk = pick().with_enchantment("silk_touch", 1);
        let drops = desc.resolve_loot(&b.permutation, Some(&silk), &mut rng);
        assert_eq!(drops[0].type_id, "minecraft:brain_coral_block");
    }

    #[test]
    fn coral_blocks_bonus_mine_the_reef_growth() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let desc = reg.classify(&block("minecraft:tube_coral_block"));
        let origin = Permutation::new("minecraft:tube_coral_block");
        let fan = Permutation::new("minecraft:fire_coral_fan");
        let pickle = Permutation::new("minecraft:sea_pickle");
        let other = Permutation::new("minecraft:brain_coral_block");
        assert_eq!(desc.mining_way(&origin, &fan, &prefs), MiningWay::MineAsBonus);
        assert_eq!(desc.mining_way(&origin, &pickle, &prefs), MiningWay::MineAsBonus);
        assert_eq!(desc.mining_way(&origin, &other, &prefs), MiningWay::LeaveAlone);
    }

    #[test]
    fn coral_plants_need_silk_touch_and_cost_no_durability() {
        let reg = vanilla_registry().unwrap();
        let prefs = PlayerPrefs::default();
        let b = block("minecraft:horn_coral");
        let desc = reg.classify(&b);
        assert!(!desc.is_tool_suitable(&b.permutation, Some(&pick()), &prefs));
        let silk = pick().with_enchantment("silk_touch", 1);
        assert!(desc.is_tool_suitable(&b.permutation, Some(&silk), &prefs));
        assert!(!desc.consumes_durability(&silk));
    }

    #[test]
    fn bonus_mined_coral_drops_nothing() {
        // Bonus breaks resolve loot as a bare hand, so the silk arm
        // never fires.
        let reg = vanilla_registry().unwrap();
        let b = block("minecraft:tube_coral_fan");
        let desc = reg.classify(&b);
        let mut rng = StdRng::seed_from_u64(30);
        assert!(desc.resolve_loot(&b.permutation, None, &mut rng).is_empty());
    }
}
