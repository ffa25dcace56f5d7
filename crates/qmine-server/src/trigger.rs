//! The trigger pipeline: decides what happens when a player starts
//! breaking a block.

use std::sync::Arc;

use tracing::debug;

use qmine_blocks::BlockRegistry;
use qmine_miner::{MinerLimits, MinerTask};
use qmine_world::{Actor, BlockPos, Dimension, GameMode, QuickMiningMode};

use crate::session::PlayerSession;

/// What the host should do with the vanilla block break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Let the vanilla break proceed untouched.
    PassThrough,
    /// Cancel the vanilla break and do nothing more.
    Cancel,
    /// Cancel the vanilla break; a mining run now owns the block.
    RunStarted,
}

fn mode_allows(mode: QuickMiningMode, sneaking: bool) -> bool {
    match mode {
        QuickMiningMode::WhenSneaking => sneaking,
        QuickMiningMode::UnlessSneaking => !sneaking,
        QuickMiningMode::AlwaysEnabled => true,
        QuickMiningMode::AlwaysDisabled => false,
    }
}

/// Run the admission checks for a break attempt at `pos` and start a
/// mining run when they all pass.
pub fn handle_break_attempt(
    session: &mut PlayerSession,
    registry: &Arc<BlockRegistry>,
    dim: &dyn Dimension,
    actor: &dyn Actor,
    pos: BlockPos,
    limits: MinerLimits,
) -> BreakDecision {
    let Some(block) = dim.block_at(pos) else {
        return BreakDecision::PassThrough;
    };
    if block.is_air() {
        return BreakDecision::PassThrough;
    }
    let descriptor = registry.classify(&block);
    let prefs = &session.prefs;

    // Guarded blocks are never broken, quick mining or not.
    if descriptor.is_protected(actor.game_mode(), prefs) {
        debug!(player = %session.player(), ?pos, "break cancelled, block is protected");
        return BreakDecision::Cancel;
    }

    // A bare hand never quick-mines.
    let Some(tool) = actor.main_hand() else {
        return BreakDecision::PassThrough;
    };

    // Tool protection fires before the very first break, not just
    // mid-run: a treasured tool at the margin stops everything.
    if actor.game_mode() != GameMode::Creative {
        let guarded = prefs.protection.abort_before_tool_breaks
            || (tool.name_tag.is_some() && prefs.protection.abort_before_named_tool_breaks);
        if guarded {
            if let Some(durability) = tool.durability {
                if durability.remaining() <= limits.tool_protection_margin {
                    debug!(player = %session.player(), "break cancelled to protect the tool");
                    return BreakDecision::Cancel;
                }
            }
        }
    }

    if !mode_allows(prefs.mode, actor.is_sneaking()) {
        return BreakDecision::PassThrough;
    }
    if !descriptor.is_tool_suitable(&block.permutation, Some(tool), prefs) {
        return BreakDecision::PassThrough;
    }

    let task = MinerTask::new(Arc::clone(registry), prefs.clone(), limits, &block);
    if session.try_start(task) {
        BreakDecision::RunStarted
    } else {
        // A run is already in flight; leave this break to the vanilla
        // path.
        BreakDecision::PassThrough
    }
}
