use core::ops::BitOr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of one tile within an area's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellIndex {
    pub x: i32,
    pub y: i32,
}

impl CellIndex {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// True when `other` is one of this cell's 8 neighbors.
    pub fn is_adjacent(self, other: Self) -> bool {
        let dx = (self.x - other.x).abs();
        let dy = (self.y - other.y).abs();
        dx <= 1 && dy <= 1 && (dx, dy) != (0, 0)
    }
}

/// Cells occupied by an agent anchored at an index:
/// `[x, x + width) × [y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Footprint {
    pub width: i32,
    pub height: i32,
}

impl Footprint {
    pub const SINGLE: Self = Self {
        width: 1,
        height: 1,
    };

    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::SINGLE
    }
}

/// Ground category of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Terrain {
    Ground,
    Rough,
    Water,
    Chasm,
}

impl Terrain {
    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Set of ground categories an agent is permitted to cross.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainSet(u8);

impl TerrainSet {
    pub const EMPTY: Self = Self(0);

    pub const fn of(terrain: Terrain) -> Self {
        Self(terrain.bit())
    }

    pub const fn all() -> Self {
        Self(
            Terrain::Ground.bit()
                | Terrain::Rough.bit()
                | Terrain::Water.bit()
                | Terrain::Chasm.bit(),
        )
    }

    pub const fn with(self, terrain: Terrain) -> Self {
        Self(self.0 | terrain.bit())
    }

    pub const fn contains(self, terrain: Terrain) -> bool {
        self.0 & terrain.bit() != 0
    }
}

impl Default for TerrainSet {
    fn default() -> Self {
        Self::of(Terrain::Ground)
    }
}

impl BitOr for TerrainSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl From<Terrain> for TerrainSet {
    fn from(terrain: Terrain) -> Self {
        Self::of(terrain)
    }
}

/// Tier of a breakable or movable obstacle occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObstacleTier {
    Light,
    Heavy,
    /// Never traversable, regardless of tolerance.
    Unbreakable,
}

/// Ordered obstacle capability of an agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Tolerance {
    #[default]
    None,
    Light,
    Heavy,
}

impl Tolerance {
    /// True when an agent with this tolerance may enter a cell holding `tier`.
    pub fn clears(self, tier: ObstacleTier) -> bool {
        match tier {
            ObstacleTier::Light => self >= Tolerance::Light,
            ObstacleTier::Heavy => self >= Tolerance::Heavy,
            ObstacleTier::Unbreakable => false,
        }
    }
}

/// Traversability parameters carried by every navigation query.
///
/// A cached path is only meaningful together with the profile that produced
/// it; any field change invalidates the cache as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentProfile {
    pub footprint: Footprint,
    pub terrain: TerrainSet,
    pub tolerance: Tolerance,
}
