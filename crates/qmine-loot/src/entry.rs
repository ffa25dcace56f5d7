//! Loot entries: what one weighted slot of a pool yields.

use rand::Rng;

use qmine_world::ItemStack;

use crate::condition::LootCondition;
use crate::fortune_level;

/// Decomposition chance per fortune level for gravel-like drops.
const GRAVEL_REFINE_CHANCE: [f64; 4] = [0.1, 0.14, 0.25, 1.0];

/// One-in-eight chance of a seed from grass-like plants.
const GRASS_DROP_CHANCE: f64 = 1.0 / 8.0;

/// How a selected entry turns into item stacks.
#[derive(Debug, Clone)]
pub enum EntryKind {
    /// A fixed stack.
    Item(ItemStack),
    /// Nothing. Weighted against item entries to under-drop a pool.
    Empty,
    /// `U[min, max]` rolls, multiplied by `U[1, fortune + 1]` when the tool
    /// has fortune. Ore-style drops.
    Multiplicative {
        drop: String,
        min: u32,
        max: u32,
    },
    /// `U[min, max] + U[0, fortune]`, clamped to `cap` when set.
    /// Crop-and-cluster-style drops.
    DiscreteUniform {
        drop: String,
        min: u32,
        max: u32,
        cap: Option<u32>,
    },
    /// One-in-eight chance of `1 + U[0, 2 * fortune]`. Seed-style drops.
    GrassLike {
        drop: String,
    },
    /// Drops `refined` with a fortune-indexed chance, otherwise `raw`.
    GravelLike {
        raw: String,
        refined: String,
    },
    /// One guaranteed drop plus `n + fortune` extra chances at probability
    /// `p` each.
    Binomial {
        drop: String,
        n: u32,
        p: f64,
    },
}

/// A weighted, optionally conditioned slot in a pool.
#[derive(Debug, Clone)]
pub struct LootEntry {
    pub weight: u32,
    pub condition: LootCondition,
    pub kind: EntryKind,
}

impl LootEntry {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            weight: 1,
            condition: LootCondition::Always,
            kind,
        }
    }

    /// Shorthand for a plain item drop.
    pub fn item(type_id: impl Into<String>, amount: u32) -> Self {
        Self::new(EntryKind::Item(ItemStack::new(type_id, amount)))
    }

    pub fn empty() -> Self {
        Self::new(EntryKind::Empty)
    }

    pub fn weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn when(mut self, condition: LootCondition) -> Self {
        self.condition = condition;
        self
    }

    /// Resolve this entry against the tool. May yield nothing.
    pub fn resolve(&self, tool: Option<&ItemStack>, rng: &mut impl Rng) -> Option<ItemStack> {
        let fortune = fortune_level(tool);
        match &self.kind {
            EntryKind::Item(stack) => Some(stack.clone()),
            EntryKind::Empty => None,
            EntryKind::Multiplicative { drop, min, max } => {
                let rolls = rng.gen_range(*min..=*max);
                let multiplier = if fortune > 0 {
                    rng.gen_range(1..=fortune + 1)
                } else {
                    1
                };
                nonzero_stack(drop, rolls * multiplier)
            }
            EntryKind::DiscreteUniform {
                drop,
                min,
                max,
                cap,
            } => {
                let mut amount = rng.gen_range(*min..=*max) + rng.gen_range(0..=fortune);
                if let Some(cap) = cap {
                    amount = amount.min(*cap);
                }
                nonzero_stack(drop, amount)
            }
            EntryKind::GrassLike { drop } => {
                if rng.gen::<f64>() >= GRASS_DROP_CHANCE {
                    return None;
                }
                let amount = 1 + rng.gen_range(0..=2 * fortune);
                Some(ItemStack::new(drop.clone(), amount))
            }
            EntryKind::GravelLike { raw, refined } => {
                let idx = (fortune as usize).min(GRAVEL_REFINE_CHANCE.len() - 1);
                if rng.gen::<f64>() < GRAVEL_REFINE_CHANCE[idx] {
                    Some(ItemStack::new(refined.clone(), 1))
                } else {
                    Some(ItemStack::new(raw.clone(), 1))
                }
            }
            EntryKind::Binomial { drop, n, p } => {
                let mut amount = 1;
                for _ in 0..(n + fortune) {
                    if rng.gen::<f64>() < *p {
                        amount += 1;
                    }
                }
                Some(ItemStack::new(drop.clone(), amount))
            }
        }
    }
}

fn nonzero_stack(type_id: &str, amount: u32) -> Option<ItemStack> {
    (amount > 0).then(|| ItemStack::new(type_id.to_string(), amount))
}
