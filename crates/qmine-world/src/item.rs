//! Item stacks, tool tags, enchantments, and durability.

use std::collections::{BTreeMap, BTreeSet};

/// Durability state of a damageable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Durability {
    /// Damage already taken.
    pub damage: u32,
    /// Maximum damage before the item breaks.
    pub max: u32,
}

impl Durability {
    /// Points left before the item breaks.
    pub fn remaining(&self) -> u32 {
        self.max.saturating_sub(self.damage)
    }
}

/// A stack of items, possibly a tool with tags and enchantments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStack {
    pub type_id: String,
    pub amount: u32,
    /// Custom name given on an anvil. Named tools get extra protection.
    pub name_tag: Option<String>,
    tags: BTreeSet<String>,
    enchantments: BTreeMap<String, u32>,
    pub durability: Option<Durability>,
}

impl ItemStack {
    /// Maximum amount a single inventory slot can hold.
    pub const MAX_STACK: u32 = 64;

    pub fn new(type_id: impl Into<String>, amount: u32) -> Self {
        Self {
            type_id: type_id.into(),
            amount,
            name_tag: None,
            tags: BTreeSet::new(),
            enchantments: BTreeMap::new(),
            durability: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_enchantment(mut self, id: impl Into<String>, level: u32) -> Self {
        self.enchantments.insert(id.into(), level);
        self
    }

    pub fn with_durability(mut self, max: u32) -> Self {
        self.durability = Some(Durability { damage: 0, max });
        self
    }

    pub fn with_damage(mut self, damage: u32) -> Self {
        if let Some(d) = self.durability.as_mut() {
            d.damage = damage;
        }
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_tag = Some(name.into());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn has_enchantment(&self, id: &str) -> bool {
        self.enchantments.contains_key(id)
    }

    /// Level of an enchantment, 0 when absent.
    pub fn enchant_level(&self, id: &str) -> u32 {
        self.enchantments.get(id).copied().unwrap_or(0)
    }

    /// Whether `other` can be merged into this stack (same kind, unnamed,
    /// same enchantments; durability-bearing items never stack).
    pub fn can_merge_with(&self, other: &ItemStack) -> bool {
        self.type_id == other.type_id
            && self.name_tag.is_none()
            && other.name_tag.is_none()
            && self.durability.is_none()
            && other.durability.is_none()
            && self.enchantments == other.enchantments
    }

    /// Apply wear. Returns the remaining durability, or `None` for
    /// non-damageable items.
    pub fn consume_durability(&mut self, points: u32) -> Option<u32> {
        let d = self.durability.as_mut()?;
        d.damage = (d.damage + points).min(d.max);
        Some(d.remaining())
    }

    /// Undo wear, saturating at full repair. Returns the points actually
    /// restored.
    pub fn repair(&mut self, points: u32) -> u32 {
        match self.durability.as_mut() {
            Some(d) => {
                let restored = points.min(d.damage);
                d.damage -= restored;
                restored
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enchant_level_defaults_to_zero() {
        let pick = ItemStack::new("minecraft:iron_pickaxe", 1).with_enchantment("fortune", 2);
        assert_eq!(pick.enchant_level("fortune"), 2);
        assert_eq!(pick.enchant_level("silk_touch"), 0);
        assert!(!pick.has_enchantment("silk_touch"));
    }

    #[test]
    fn merge_compatibility() {
        let a = ItemStack::new("minecraft:coal", 10);
        let b = ItemStack::new("minecraft:coal", 5);
        assert!(a.can_merge_with(&b));

        let named = ItemStack::new("minecraft:coal", 1).with_name("keepsake");
        assert!(!a.can_merge_with(&named));

        let tool = ItemStack::new("minecraft:coal", 1).with_durability(100);
        assert!(!a.can_merge_with(&tool));
    }

    #[test]
    fn durability_wear_and_repair() {
        let mut pick = ItemStack::new("minecraft:iron_pickaxe", 1).with_durability(250);
        assert_eq!(pick.consume_durability(10), Some(240));
        assert_eq!(pick.repair(4), 4);
        assert_eq!(pick.durability.unwrap().remaining(), 244);
        // Repair never exceeds full.
        assert_eq!(pick.repair(1000), 6);
        assert_eq!(pick.durability.unwrap().remaining(), 250);
    }

    #[test]
    fn bare_item_ignores_durability() {
        let mut coal = ItemStack::new("minecraft:coal", 1);
        assert_eq!(coal.consume_durability(1), None);
        assert_eq!(coal.repair(1), 0);
    }
}
