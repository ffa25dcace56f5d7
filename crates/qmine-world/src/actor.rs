//! The actor boundary: the player doing the mining.

use crate::item::ItemStack;
use crate::pos::BlockPos;

/// Player game mode, as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    #[default]
    Survival,
    Creative,
    Adventure,
    Spectator,
}

/// Player-side operations the mining engine needs.
pub trait Actor {
    fn name(&self) -> &str;

    /// Whether the actor is still present in the world. Loot for an invalid
    /// actor falls back to spawning at the mining origin.
    fn is_valid(&self) -> bool;

    /// Feet position (continuous coordinates).
    fn position(&self) -> (f64, f64, f64);

    fn game_mode(&self) -> GameMode;

    fn is_sneaking(&self) -> bool;

    fn main_hand(&self) -> Option<&ItemStack>;

    fn main_hand_mut(&mut self) -> Option<&mut ItemStack>;

    /// All equipped damageable items, main hand included. Used when mending
    /// picks a repair target.
    fn equipment_mut(&mut self) -> Vec<&mut ItemStack>;

    /// Add a stack to the inventory, merging where possible. Returns the
    /// quantity that did not fit.
    fn give(&mut self, stack: ItemStack) -> u32;

    fn add_experience(&mut self, amount: u32);

    fn experience(&self) -> u32;

    fn level(&self) -> u32;
}

/// Whether the actor's feet rest on top of the block at `pos`. Allows a
/// small horizontal overhang past the block edge.
pub fn is_standing_on(actor: &dyn Actor, pos: BlockPos) -> bool {
    const EDGE_DELTA: f64 = 0.3;
    let (x, y, z) = actor.position();
    let above = (pos.y as f64) < y && y < (pos.y + 2) as f64;
    let over_x = (pos.x as f64 - EDGE_DELTA) <= x && x <= (pos.x + 1) as f64 + EDGE_DELTA;
    let over_z = (pos.z as f64 - EDGE_DELTA) <= z && z <= (pos.z + 1) as f64 + EDGE_DELTA;
    above && over_x && over_z
}

// ---------------------------------------------------------------------------
// XP formulas
// ---------------------------------------------------------------------------

/// XP needed to advance from `level` to `level + 1`.
fn xp_for_next_level(level: u32) -> u32 {
    if level < 16 {
        2 * level + 7
    } else if level < 31 {
        5 * level - 38
    } else {
        9 * level - 158
    }
}

fn level_from_total_xp(total: u32) -> u32 {
    let mut level = 0;
    let mut remaining = total;
    loop {
        let needed = xp_for_next_level(level);
        if remaining < needed {
            break;
        }
        remaining -= needed;
        level += 1;
    }
    level
}

// ---------------------------------------------------------------------------
// In-memory actor
// ---------------------------------------------------------------------------

const INVENTORY_SLOTS: usize = 36;

/// In-memory actor with a 36-slot inventory, off hand, and armor slots.
#[derive(Debug)]
pub struct MemoryActor {
    name: String,
    valid: bool,
    pub position: (f64, f64, f64),
    pub game_mode: GameMode,
    pub sneaking: bool,
    main_hand: Option<ItemStack>,
    off_hand: Option<ItemStack>,
    armor: Vec<ItemStack>,
    inventory: Vec<Option<ItemStack>>,
    total_xp: u32,
}

impl MemoryActor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            valid: true,
            position: (0.5, 64.0, 0.5),
            game_mode: GameMode::Survival,
            sneaking: false,
            main_hand: None,
            off_hand: None,
            armor: Vec::new(),
            inventory: vec![None; INVENTORY_SLOTS],
            total_xp: 0,
        }
    }

    pub fn with_main_hand(mut self, stack: ItemStack) -> Self {
        self.main_hand = Some(stack);
        self
    }

    pub fn with_off_hand(mut self, stack: ItemStack) -> Self {
        self.off_hand = Some(stack);
        self
    }

    pub fn with_armor(mut self, stack: ItemStack) -> Self {
        self.armor.push(stack);
        self
    }

    pub fn sneaking(mut self, sneaking: bool) -> Self {
        self.sneaking = sneaking;
        self
    }

    pub fn at(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = (x, y, z);
        self
    }

    /// Simulate a disconnect: the actor stops being valid.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// Total quantity of a given item type held anywhere in the inventory.
    pub fn held_amount_of(&self, type_id: &str) -> u32 {
        self.inventory
            .iter()
            .flatten()
            .filter(|s| s.type_id == type_id)
            .map(|s| s.amount)
            .sum()
    }

    /// Fill every inventory slot so nothing more fits.
    pub fn fill_inventory(&mut self, filler: ItemStack) {
        for slot in self.inventory.iter_mut() {
            let mut stack = filler.clone();
            stack.amount = ItemStack::MAX_STACK;
            *slot = Some(stack);
        }
    }
}

impl Actor for MemoryActor {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_valid(&self) -> bool {
        self.valid
    }

    fn position(&self) -> (f64, f64, f64) {
        self.position
    }

    fn game_mode(&self) -> GameMode {
        self.game_mode
    }

    fn is_sneaking(&self) -> bool {
        self.sneaking
    }

    fn main_hand(&self) -> Option<&ItemStack> {
        self.main_hand.as_ref()
    }

    fn main_hand_mut(&mut self) -> Option<&mut ItemStack> {
        self.main_hand.as_mut()
    }

    fn equipment_mut(&mut self) -> Vec<&mut ItemStack> {
        let mut out: Vec<&mut ItemStack> = Vec::new();
        if let Some(s) = self.main_hand.as_mut() {
            out.push(s);
        }
        if let Some(s) = self.off_hand.as_mut() {
            out.push(s);
        }
        out.extend(self.armor.iter_mut());
        out.retain(|s| s.durability.is_some());
        out
    }

    fn give(&mut self, stack: ItemStack) -> u32 {
        let mut remaining = stack.amount;

        // Top up matching stacks first.
        for slot in self.inventory.iter_mut().flatten() {
            if remaining == 0 {
                break;
            }
            if slot.can_merge_with(&stack) && slot.amount < ItemStack::MAX_STACK {
                let moved = remaining.min(ItemStack::MAX_STACK - slot.amount);
                slot.amount += moved;
                remaining -= moved;
            }
        }

        // Then open empty slots.
        for slot in self.inventory.iter_mut() {
            if remaining == 0 {
                break;
            }
            if slot.is_none() {
                let moved = remaining.min(ItemStack::MAX_STACK);
                let mut placed = stack.clone();
                placed.amount = moved;
                *slot = Some(placed);
                remaining -= moved;
            }
        }

        remaining
    }

    fn add_experience(&mut self, amount: u32) {
        self.total_xp += amount;
    }

    fn experience(&self) -> u32 {
        self.total_xp
    }

    fn level(&self) -> u32 {
        level_from_total_xp(self.total_xp)
    }
}
