//! The dimension boundary: block reads/writes and world-side effects.

use std::collections::{BTreeSet, HashMap};

use crate::block::Block;
use crate::item::ItemStack;
use crate::permutation::Permutation;
use crate::pos::BlockPos;
use crate::AIR;

/// World-side operations the mining engine needs. The host game implements
/// this over its live world; tests use [`MemoryDimension`].
pub trait Dimension {
    fn id(&self) -> &str;

    /// Block snapshot at `pos`, or `None` outside the build height.
    fn block_at(&self, pos: BlockPos) -> Option<Block>;

    /// Replace the block at `pos`. Out-of-bounds writes are ignored.
    fn set_block(&mut self, pos: BlockPos, permutation: Permutation);

    /// Drop an item stack into the world at `pos`.
    fn spawn_item(&mut self, stack: ItemStack, pos: BlockPos);

    /// Spawn an experience orb worth `amount` points at `pos`.
    fn spawn_xp_orb(&mut self, amount: u32, pos: BlockPos);

    /// Play a named sound effect at `pos`.
    fn play_sound(&mut self, sound: &str, pos: BlockPos);
}

#[derive(Debug, Clone)]
struct PlacedBlock {
    permutation: Permutation,
    waterlogged: bool,
    tags: BTreeSet<String>,
}

/// In-memory dimension backed by a sparse position map. Positions never
/// written read back as air; everything the engine spawns or plays is
/// recorded for assertions.
#[derive(Debug)]
pub struct MemoryDimension {
    id: String,
    min_y: i32,
    max_y: i32,
    blocks: HashMap<BlockPos, PlacedBlock>,
    /// Item stacks spawned into the world, in spawn order.
    pub spawned_items: Vec<(ItemStack, BlockPos)>,
    /// XP orbs spawned into the world, in spawn order.
    pub spawned_xp: Vec<(u32, BlockPos)>,
    /// Sounds played, in play order.
    pub sounds: Vec<(String, BlockPos)>,
}

impl MemoryDimension {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            min_y: -64,
            max_y: 320,
            blocks: HashMap::new(),
            spawned_items: Vec::new(),
            spawned_xp: Vec::new(),
            sounds: Vec::new(),
        }
    }

    pub fn with_height_range(mut self, min_y: i32, max_y: i32) -> Self {
        self.min_y = min_y;
        self.max_y = max_y;
        self
    }

    /// Place a block, replacing whatever was there.
    pub fn place(&mut self, pos: BlockPos, permutation: Permutation) {
        self.place_tagged(pos, permutation, std::iter::empty::<String>());
    }

    /// Place a block carrying host-assigned tags.
    pub fn place_tagged<I, S>(&mut self, pos: BlockPos, permutation: Permutation, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.in_bounds(pos) {
            return;
        }
        self.blocks.insert(
            pos,
            PlacedBlock {
                permutation,
                waterlogged: false,
                tags: tags.into_iter().map(Into::into).collect(),
            },
        );
    }

    /// Mark the block at `pos` as waterlogged.
    pub fn set_waterlogged(&mut self, pos: BlockPos, waterlogged: bool) {
        if let Some(b) = self.blocks.get_mut(&pos) {
            b.waterlogged = waterlogged;
        }
    }

    fn in_bounds(&self, pos: BlockPos) -> bool {
        (self.min_y..=self.max_y).contains(&pos.y)
    }

    /// Total quantity of a given item type spawned so far.
    pub fn spawned_amount_of(&self, type_id: &str) -> u32 {
        self.spawned_items
            .iter()
            .filter(|(s, _)| s.type_id == type_id)
            .map(|(s, _)| s.amount)
            .sum()
    }
}

impl Dimension for MemoryDimension {
    fn id(&self) -> &str {
        &self.id
    }

    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        if !self.in_bounds(pos) {
            return None;
        }
        Some(match self.blocks.get(&pos) {
            Some(b) => Block {
                pos,
                permutation: b.permutation.clone(),
                waterlogged: b.waterlogged,
                tags: b.tags.clone(),
            },
            None => Block {
                pos,
                permutation: Permutation::new(AIR),
                waterlogged: false,
                tags: BTreeSet::new(),
            },
        })
    }

    fn set_block(&mut self, pos: BlockPos, permutation: Permutation) {
        if !self.in_bounds(pos) {
            return;
        }
        if permutation.type_id() == AIR {
            self.blocks.remove(&pos);
        } else {
            self.blocks.insert(
                pos,
                PlacedBlock {
                    permutation,
                    waterlogged: false,
                    tags: BTreeSet::new(),
                },
            );
        }
    }

    fn spawn_item(&mut self, stack: ItemStack, pos: BlockPos) {
        self.spawned_items.push((stack, pos));
    }

    fn spawn_xp_orb(&mut self, amount: u32, pos: BlockPos) {
        self.spawned_xp.push((amount, pos));
    }

    fn play_sound(&mut self, sound: &str, pos: BlockPos) {
        self.sounds.push((sound.to_string(), pos));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwritten_positions_read_as_air() {
        let dim = MemoryDimension::new("overworld");
        let b = dim.block_at(BlockPos::new(0, 64, 0)).unwrap();
        assert!(b.is_air());
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let dim = MemoryDimension::new("overworld").with_height_range(-64, 320);
        assert!(dim.block_at(BlockPos::new(0, -65, 0)).is_none());
        assert!(dim.block_at(BlockPos::new(0, 321, 0)).is_none());
        assert!(dim.block_at(BlockPos::new(0, 320, 0)).is_some());
    }

    #[test]
    fn setting_air_removes_the_block() {
        let mut dim = MemoryDimension::new("overworld");
        let pos = BlockPos::new(1, 10, 1);
        dim.place(pos, Permutation::new("minecraft:stone"));
        assert_eq!(dim.block_at(pos).unwrap().type_id(), "minecraft:stone");

        dim.set_block(pos, Permutation::new(AIR));
        assert!(dim.block_at(pos).unwrap().is_air());
    }

    #[test]
    fn placed_tags_survive_reads() {
        let mut dim = MemoryDimension::new("overworld");
        let pos = BlockPos::new(0, 10, 0);
        dim.place_tagged(pos, Permutation::new("minecraft:oak_log"), ["wood"]);
        let b = dim.block_at(pos).unwrap();
        assert!(b.tags.contains("wood"));
    }

    #[test]
    fn effects_are_recorded() {
        let mut dim = MemoryDimension::new("overworld");
        let pos = BlockPos::new(0, 10, 0);
        dim.spawn_item(ItemStack::new("minecraft:coal", 3), pos);
        dim.spawn_item(ItemStack::new("minecraft:coal", 2), pos);
        dim.spawn_xp_orb(5, pos);
        dim.play_sound("dig.stone", pos);

        assert_eq!(dim.spawned_amount_of("minecraft:coal"), 5);
        assert_eq!(dim.spawned_xp, vec![(5, pos)]);
        assert_eq!(dim.sounds.len(), 1);
    }
}
