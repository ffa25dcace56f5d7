//! Conditions gating loot arms, pools, and entries.

use rand::Rng;

use qmine_world::ItemStack;

use crate::{fortune_level, ENCHANT_SILK_TOUCH};

/// A predicate over the tool used to break the block. Chance-based
/// conditions also draw from the RNG.
#[derive(Debug, Clone)]
pub enum LootCondition {
    Always,
    Not(Box<LootCondition>),
    AllOf(Vec<LootCondition>),
    AnyOf(Vec<LootCondition>),
    /// Succeeds with a probability picked by the tool's fortune level.
    /// Levels past the last slot use the last slot.
    RandomChance(Vec<f64>),
    /// Matches properties of the tool itself. A bare hand never matches.
    MatchTool {
        type_id: Option<String>,
        enchantments: Vec<String>,
    },
}

impl LootCondition {
    /// Convenience: the tool carries silk touch.
    pub fn silk_touch() -> Self {
        LootCondition::MatchTool {
            type_id: None,
            enchantments: vec![ENCHANT_SILK_TOUCH.to_string()],
        }
    }

    /// Convenience: the tool does NOT carry silk touch (a bare hand passes).
    pub fn without_silk_touch() -> Self {
        LootCondition::Not(Box::new(Self::silk_touch()))
    }

    /// Convenience: the tool is exactly this item type.
    pub fn tool_is(type_id: impl Into<String>) -> Self {
        LootCondition::MatchTool {
            type_id: Some(type_id.into()),
            enchantments: Vec::new(),
        }
    }

    pub fn eval(&self, tool: Option<&ItemStack>, rng: &mut impl Rng) -> bool {
        match self {
            LootCondition::Always => true,
            LootCondition::Not(inner) => !inner.eval(tool, rng),
            LootCondition::AllOf(all) => all.iter().all(|c| c.eval(tool, rng)),
            LootCondition::AnyOf(any) => any.iter().any(|c| c.eval(tool, rng)),
            LootCondition::RandomChance(chances) => {
                if chances.is_empty() {
                    return false;
                }
                let idx = (fortune_level(tool) as usize).min(chances.len() - 1);
                rng.gen::<f64>() < chances[idx]
            }
            LootCondition::MatchTool {
                type_id,
                enchantments,
            } => {
                let Some(tool) = tool else {
                    return false;
                };
                if let Some(want) = type_id {
                    if tool.type_id != *want {
                        return false;
                    }
                }
                enchantments.iter().all(|e| tool.has_enchantment(e))
            }
        }
    }
}
