use crate::{CellIndex, Footprint, NavGrid, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identity of an area, assigned by the owning simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AreaId(pub u64);

/// An area identity plus the grid generation it was observed at.
///
/// Path caches store the stamp they were computed under and drop themselves
/// when it no longer matches, which is how destructible-obstacle edits reach
/// every task without any registry of live tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AreaStamp {
    pub area: AreaId,
    pub generation: u64,
}

/// One bounded area: a navigation grid anchored at a world-space center.
///
/// The area owns its grid for the area's lifetime; agents own their path
/// tasks. Dropping the area drops the grid.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Area {
    id: AreaId,
    center: Vec2,
    cell_size: f32,
    grid: NavGrid,
}

impl Area {
    pub fn new(id: AreaId, center: Vec2, cell_size: f32, grid: NavGrid) -> Self {
        assert!(cell_size > 0.0, "cell_size must be > 0");
        Self {
            id,
            center,
            cell_size,
            grid,
        }
    }

    pub fn id(&self) -> AreaId {
        self.id
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn grid(&self) -> &NavGrid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut NavGrid {
        &mut self.grid
    }

    pub fn stamp(&self) -> AreaStamp {
        AreaStamp {
            area: self.id,
            generation: self.grid.generation(),
        }
    }

    /// Anchor index whose footprint center is nearest to `position`.
    pub fn index_from_world(&self, position: Vec2, footprint: Footprint) -> CellIndex {
        index_from_world(
            position,
            self.center,
            self.grid.width(),
            self.grid.height(),
            self.cell_size,
            footprint,
        )
    }

    /// World-space center of the footprint anchored at `index`.
    pub fn world_from_index(&self, index: CellIndex, footprint: Footprint) -> Vec2 {
        world_from_index(
            index,
            self.center,
            self.grid.width(),
            self.grid.height(),
            self.cell_size,
            footprint,
        )
    }

    /// Clamp an anchor so the whole footprint stays inside the grid.
    pub fn clamp_index(&self, index: CellIndex, footprint: Footprint) -> CellIndex {
        let max_x = (self.grid.width() - footprint.width).max(0);
        let max_y = (self.grid.height() - footprint.height).max(0);
        CellIndex::new(index.x.clamp(0, max_x), index.y.clamp(0, max_y))
    }
}

fn origin(center: Vec2, width: i32, height: i32, cell_size: f32) -> Vec2 {
    center - Vec2::new(width as f32, height as f32) * (cell_size * 0.5)
}

/// Anchor index whose footprint center is nearest to `position`.
///
/// Exact inverse of [`world_from_index`] for in-bounds anchors. The result is
/// not clamped; callers that accept arbitrary world positions clamp the index
/// afterwards.
pub fn index_from_world(
    position: Vec2,
    center: Vec2,
    width: i32,
    height: i32,
    cell_size: f32,
    footprint: Footprint,
) -> CellIndex {
    let origin = origin(center, width, height, cell_size);
    let x = (position.x - origin.x) / cell_size - footprint.width as f32 * 0.5;
    let y = (position.y - origin.y) / cell_size - footprint.height as f32 * 0.5;
    CellIndex::new(x.round() as i32, y.round() as i32)
}

/// World-space center of the footprint anchored at `index`.
pub fn world_from_index(
    index: CellIndex,
    center: Vec2,
    width: i32,
    height: i32,
    cell_size: f32,
    footprint: Footprint,
) -> Vec2 {
    let origin = origin(center, width, height, cell_size);
    origin
        + Vec2::new(
            (index.x as f32 + footprint.width as f32 * 0.5) * cell_size,
            (index.y as f32 + footprint.height as f32 * 0.5) * cell_size,
        )
}
