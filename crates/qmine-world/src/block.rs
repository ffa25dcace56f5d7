//! A snapshot of one block as read from a dimension.

use std::collections::BTreeSet;

use crate::permutation::Permutation;
use crate::pos::BlockPos;
use crate::AIR;

/// A block as observed at a specific location. The snapshot does not track
/// the live world; re-fetch before acting on it.
#[derive(Debug, Clone)]
pub struct Block {
    pub pos: BlockPos,
    pub permutation: Permutation,
    pub waterlogged: bool,
    /// Host-assigned block tags (e.g. `wood`), checked before type ids
    /// during classification.
    pub tags: BTreeSet<String>,
}

impl Block {
    pub fn type_id(&self) -> &str {
        self.permutation.type_id()
    }

    pub fn is_air(&self) -> bool {
        self.permutation.type_id() == AIR
    }
}
