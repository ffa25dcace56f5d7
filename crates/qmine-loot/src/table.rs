//! Loot tables and pools.

use rand::Rng;

use qmine_world::ItemStack;

use crate::condition::LootCondition;
use crate::entry::LootEntry;

/// A pool rolled a number of times, each roll selecting one entry by weight.
#[derive(Debug, Clone)]
pub struct LootPool {
    rolls: (u32, u32),
    condition: LootCondition,
    entries: Vec<LootEntry>,
}

impl LootPool {
    pub fn new(entries: Vec<LootEntry>) -> Self {
        Self {
            rolls: (1, 1),
            condition: LootCondition::Always,
            entries,
        }
    }

    /// Shorthand for a single unconditioned entry rolled once.
    pub fn single(entry: LootEntry) -> Self {
        Self::new(vec![entry])
    }

    pub fn rolls(mut self, min: u32, max: u32) -> Self {
        self.rolls = (min, max);
        self
    }

    pub fn when(mut self, condition: LootCondition) -> Self {
        self.condition = condition;
        self
    }

    fn resolve(&self, tool: Option<&ItemStack>, rng: &mut impl Rng, out: &mut Vec<ItemStack>) {
        let (min, max) = self.rolls;
        let n = if min < max {
            rng.gen_range(min..=max)
        } else {
            min
        };
        for _ in 0..n {
            // The gating condition is drawn per roll, so a chance-gated
            // pool thins each roll rather than all or nothing.
            if !self.condition.eval(tool, rng) {
                continue;
            }
            if let Some(entry) = self.select_entry(tool, rng) {
                if let Some(stack) = entry.resolve(tool, rng) {
                    push_merged(out, stack);
                }
            }
        }
    }

    /// Weighted selection among entries whose conditions hold this roll.
    fn select_entry(&self, tool: Option<&ItemStack>, rng: &mut impl Rng) -> Option<&LootEntry> {
        let eligible: Vec<&LootEntry> = self
            .entries
            .iter()
            .filter(|e| e.weight > 0)
            .filter(|e| e.condition.eval(tool, rng))
            .collect();
        let total: u32 = eligible.iter().map(|e| e.weight).sum();
        if total == 0 {
            return None;
        }
        let mut roll = rng.gen_range(0..total);
        for entry in eligible {
            if roll < entry.weight {
                return Some(entry);
            }
            roll -= entry.weight;
        }
        None
    }
}

/// A loot table: condition-gated arms tried in order, first match wins.
#[derive(Debug, Clone, Default)]
pub struct LootTable {
    arms: Vec<(LootCondition, Vec<LootPool>)>,
}

impl LootTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an arm tried when `condition` holds. Arms are tried in insertion
    /// order.
    pub fn when(mut self, condition: LootCondition, pools: Vec<LootPool>) -> Self {
        self.arms.push((condition, pools));
        self
    }

    /// Add an unconditional arm. Usually last.
    pub fn always(self, pools: Vec<LootPool>) -> Self {
        self.when(LootCondition::Always, pools)
    }

    /// Shorthand for a table that always drops one fixed item.
    pub fn fixed(type_id: impl Into<String>, amount: u32) -> Self {
        Self::new().always(vec![LootPool::single(LootEntry::item(type_id, amount))])
    }

    /// Resolve against the tool. Stacks of the same item are merged.
    pub fn resolve(&self, tool: Option<&ItemStack>, rng: &mut impl Rng) -> Vec<ItemStack> {
        let mut out = Vec::new();
        for (condition, pools) in &self.arms {
            if condition.eval(tool, rng) {
                for pool in pools {
                    pool.resolve(tool, rng, &mut out);
                }
                break;
            }
        }
        out
    }
}

fn push_merged(out: &mut Vec<ItemStack>, stack: ItemStack) {
    for existing in out.iter_mut() {
        if existing.can_merge_with(&stack) {
            existing.amount += stack.amount;
            return;
        }
    }
    out.push(stack);
}
