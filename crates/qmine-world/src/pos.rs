//! Integer block positions and the distance helpers used by scan caps.

use serde::{Deserialize, Serialize};

/// An integer block location within a dimension.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Position displaced by the given deltas.
    pub const fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Euclidean distance to `other` projected onto the horizontal plane.
    pub fn horizontal_distance_to(self, other: Self) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dz = (self.z - other.z) as f64;
        (dx * dx + dz * dz).sqrt()
    }

    /// Absolute vertical distance to `other`.
    pub fn vertical_distance_to(self, other: Self) -> u32 {
        self.y.abs_diff(other.y)
    }

    /// The 26 neighbouring positions (3×3×3 cube minus the centre).
    pub fn neighborhood(self) -> impl Iterator<Item = BlockPos> {
        let mut out = Vec::with_capacity(26);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if dx != 0 || dy != 0 || dz != 0 {
                        out.push(self.offset(dx, dy, dz));
                    }
                }
            }
        }
        out.into_iter()
    }
}
