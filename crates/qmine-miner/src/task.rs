//! The mining task: scans a connected run out from the origin block,
//! then commits the breaks under a per-slice time budget.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use qmine_blocks::{BlockDescriptor, BlockRegistry, BreakTransform, MiningWay};
use qmine_loot::{has_silk_touch, ENCHANT_MENDING};
use qmine_world::{
    is_standing_on, Actor, Block, BlockPos, Dimension, GameMode, ItemStack, Permutation,
    PlayerPrefs, AIR, WATER,
};

use crate::limits::MinerLimits;

/// Sound played when collected loot does not fit the inventory.
const SPILL_SOUND: &str = "random.pop";

/// Durability restored per experience point by mending gear.
const MENDING_REPAIR_PER_XP: u32 = 2;

/// Where a task currently is. Runs move strictly forward, except that
/// [`MinerTask::cancel`] can end them from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Walking the neighborhood graph out from the origin.
    Scanning,
    /// Breaking the scanned blocks, most fragile and highest first.
    Committing,
    /// Delivering loot and experience.
    Flushing,
    Done,
    Cancelled,
}

/// One block the scan decided to break.
#[derive(Debug, Clone)]
struct Target {
    pos: BlockPos,
    permutation: Permutation,
    way: MiningWay,
    dependence: u8,
}

/// A single quick-mining run for one player. Created when the trigger
/// pipeline accepts a block break; driven by `advance` once per tick
/// until finished.
pub struct MinerTask {
    registry: Arc<BlockRegistry>,
    prefs: PlayerPrefs,
    limits: MinerLimits,
    state: TaskState,
    aborted: bool,

    origin: BlockPos,
    origin_permutation: Permutation,
    origin_descriptor: Arc<BlockDescriptor>,

    pending: Vec<BlockPos>,
    visited: HashSet<BlockPos>,
    targets: Vec<Target>,
    next_target: usize,

    collected: Vec<ItemStack>,
    experience: u32,
    rng: StdRng,
}

impl MinerTask {
    pub fn new(
        registry: Arc<BlockRegistry>,
        prefs: PlayerPrefs,
        limits: MinerLimits,
        origin: &Block,
    ) -> Self {
        let origin_descriptor = registry.classify(origin);
        Self {
            registry,
            prefs,
            limits,
            state: TaskState::Scanning,
            aborted: false,
            origin: origin.pos,
            origin_permutation: origin.permutation.clone(),
            origin_descriptor,
            pending: vec![origin.pos],
            visited: HashSet::from([origin.pos]),
            targets: Vec::new(),
            next_target: 0,
            collected: Vec::new(),
            experience: 0,
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed RNG seed, for reproducible tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, TaskState::Done | TaskState::Cancelled)
    }

    /// Whether the run stopped early to protect the tool.
    pub fn was_aborted(&self) -> bool {
        self.aborted
    }

    /// End the run. Loot and XP gathered so far are still delivered;
    /// an invalid actor's share lands at the origin.
    pub fn cancel(&mut self, dim: &mut dyn Dimension, actor: &mut dyn Actor) {
        if !self.is_finished() {
            debug!(origin = ?self.origin, "mining task cancelled");
            self.flush(dim, actor);
            self.state = TaskState::Cancelled;
        }
    }

    /// Run one slice of work. Makes progress on at least one block even
    /// when the budget is already spent, so a starved tick still moves
    /// the task forward. Loot gathered during the slice is delivered
    /// before control returns, so an interrupted run never holds loot
    /// across ticks.
    pub fn advance(&mut self, dim: &mut dyn Dimension, actor: &mut dyn Actor) -> TaskState {
        let deadline = Instant::now() + self.limits.time_budget;
        let mut sounds_played: HashSet<String> = HashSet::new();
        loop {
            match self.state {
                TaskState::Scanning => self.scan_one(dim),
                TaskState::Committing => self.commit_one(dim, actor, &mut sounds_played),
                TaskState::Flushing => {
                    self.flush(dim, actor);
                    self.state = TaskState::Done;
                }
                TaskState::Done | TaskState::Cancelled => break,
            }
            if Instant::now() >= deadline {
                break;
            }
        }
        if self.state == TaskState::Committing {
            self.flush(dim, actor);
        }
        self.state
    }

    // -- scanning ---------------------------------------------------------

    fn scan_one(&mut self, dim: &mut dyn Dimension) {
        let Some(pos) = self.pending.pop() else {
            self.finish_scan();
            return;
        };
        let Some(block) = dim.block_at(pos) else {
            return;
        };
        if block.is_air() {
            return;
        }
        if pos.horizontal_distance_to(self.origin) > self.limits.max_horizontal as f64
            || pos.vertical_distance_to(self.origin) > self.limits.max_vertical
        {
            return;
        }

        let way = self.origin_descriptor.mining_way(
            &self.origin_permutation,
            &block.permutation,
            &self.prefs,
        );
        if way == MiningWay::LeaveAlone {
            return;
        }

        let dependence = self.registry.classify(&block).dependence_level();
        self.targets.push(Target {
            pos,
            permutation: block.permutation,
            way,
            dependence,
        });
        if self.targets.len() >= self.limits.max_blocks {
            self.finish_scan();
            return;
        }

        for neighbor in pos.neighborhood() {
            if self.visited.insert(neighbor) {
                self.pending.push(neighbor);
            }
        }
    }

    /// Order the targets so dependent blocks fall before their supports,
    /// and higher blocks before lower ones.
    fn finish_scan(&mut self) {
        self.targets.sort_by(|a, b| {
            b.dependence
                .cmp(&a.dependence)
                .then(b.pos.y.cmp(&a.pos.y))
                .then(a.pos.x.cmp(&b.pos.x))
                .then(a.pos.z.cmp(&b.pos.z))
        });
        debug!(origin = ?self.origin, targets = self.targets.len(), "scan complete");
        self.state = TaskState::Committing;
    }

    // -- committing -------------------------------------------------------

    fn commit_one(
        &mut self,
        dim: &mut dyn Dimension,
        actor: &mut dyn Actor,
        sounds_played: &mut HashSet<String>,
    ) {
        let Some(target) = self.targets.get(self.next_target).cloned() else {
            self.state = TaskState::Flushing;
            return;
        };
        self.next_target += 1;

        // Revalidate against the live world; anything that changed since
        // the scan stays untouched.
        let Some(block) = dim.block_at(target.pos) else {
            return;
        };
        let descriptor = self.registry.classify(&block);
        if !descriptor.is_equivalent(&target.permutation, &block.permutation) {
            return;
        }
        if self.prefs.protection.keep_ground && is_standing_on(actor, target.pos) {
            return;
        }

        let survival = actor.game_mode() != GameMode::Creative;
        let tool = match target.way {
            MiningWay::MineRegularly => actor.main_hand().cloned(),
            // Bonus blocks break as if by hand.
            _ => None,
        };

        if target.way == MiningWay::MineRegularly && survival {
            let wears = match actor.main_hand() {
                Some(held) if descriptor.consumes_durability(held) => {
                    if self.should_protect_tool(held) {
                        debug!(origin = ?self.origin, "aborting run to protect the tool");
                        self.aborted = true;
                        self.state = TaskState::Flushing;
                        return;
                    }
                    true
                }
                _ => false,
            };
            if wears {
                if let Some(held) = actor.main_hand_mut() {
                    held.consume_durability(1);
                }
            }
        }

        let drops = descriptor.resolve_loot(&block.permutation, tool.as_ref(), &mut self.rng);
        if self.prefs.auto_collect {
            for stack in drops {
                push_merged(&mut self.collected, stack);
            }
        } else {
            for stack in drops {
                dim.spawn_item(stack, target.pos);
            }
        }
        self.experience += descriptor.experience(tool.as_ref(), &mut self.rng);

        let sound = descriptor.breaking_sound();
        if !sound.is_empty() && sounds_played.insert(sound.to_string()) {
            dim.play_sound(sound, target.pos);
        }

        let replacement = self.replacement_for(dim, &block, tool.as_ref(), descriptor.break_transform());
        dim.set_block(target.pos, Permutation::new(replacement));
    }

    fn should_protect_tool(&self, tool: &ItemStack) -> bool {
        let Some(durability) = tool.durability else {
            return false;
        };
        let guarded = self.prefs.protection.abort_before_tool_breaks
            || (tool.name_tag.is_some() && self.prefs.protection.abort_before_named_tool_breaks);
        guarded && durability.remaining() <= self.limits.tool_protection_margin
    }

    fn replacement_for(
        &self,
        dim: &dyn Dimension,
        block: &Block,
        tool: Option<&ItemStack>,
        transform: BreakTransform,
    ) -> &'static str {
        if block.waterlogged {
            return WATER;
        }
        if transform == BreakTransform::IceMelt
            && !has_silk_touch(tool)
            && !dim.id().ends_with("nether")
        {
            let below = dim.block_at(block.pos.offset(0, -1, 0));
            if matches!(below, Some(b) if !b.is_air()) {
                return WATER;
            }
        }
        AIR
    }

    // -- flushing ---------------------------------------------------------

    /// Deliver everything gathered so far. Runs at the end of every
    /// slice and on termination, so accumulated loot never outlives the
    /// tick that earned it.
    fn flush(&mut self, dim: &mut dyn Dimension, actor: &mut dyn Actor) {
        // Mending gear feeds on the experience first.
        let mut xp = self.experience;
        if xp > 0 {
            for item in actor.equipment_mut() {
                if xp == 0 {
                    break;
                }
                if !item.has_enchantment(ENCHANT_MENDING) {
                    continue;
                }
                let restored = item.repair(xp * MENDING_REPAIR_PER_XP);
                xp -= restored.div_ceil(MENDING_REPAIR_PER_XP).min(xp);
            }
        }

        if actor.is_valid() {
            actor.add_experience(xp);
            let (x, y, z) = actor.position();
            let feet = BlockPos::new(x.floor() as i32, y.floor() as i32, z.floor() as i32);
            let mut spilled = false;
            for stack in self.collected.drain(..) {
                let leftover = actor.give(stack.clone());
                if leftover > 0 {
                    let mut spill = stack;
                    spill.amount = leftover;
                    dim.spawn_item(spill, feet);
                    spilled = true;
                }
            }
            if spilled {
                dim.play_sound(SPILL_SOUND, feet);
            }
        } else {
            // The player left mid-run; everything lands at the origin.
            if xp > 0 {
                dim.spawn_xp_orb(xp, self.origin);
            }
            for stack in self.collected.drain(..) {
                dim.spawn_item(stack, self.origin);
            }
        }

        debug!(origin = ?self.origin, xp = self.experience, "loot flushed");
        self.experience = 0;
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
