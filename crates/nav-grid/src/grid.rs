use core::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::{AgentProfile, CellIndex, ObstacleTier, Terrain};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// Integer step costs keep the open-list key total and deterministic;
// 1414/1000 under-approximates √2 so the octile heuristic stays admissible.
const CARDINAL_COST: u32 = 1000;
const DIAGONAL_COST: u32 = 1414;

// Fixed order for determinism: N, NE, E, SE, S, SW, W, NW.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

#[derive(Debug)]
struct OpenNode {
    f: u32,
    g: u32,
    cell: CellIndex,
    tie: u64,
}

impl OpenNode {
    fn key(&self) -> (u32, u32, CellIndex, u64) {
        (self.f, self.g, self.cell, self.tie)
    }
}

impl PartialEq for OpenNode {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenNode {}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap behave like a min-heap.
        other.key().cmp(&self.key())
    }
}

/// Contents of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellState {
    pub terrain: Terrain,
    pub obstacle: Option<ObstacleTier>,
}

impl Default for CellState {
    fn default() -> Self {
        Self {
            terrain: Terrain::Ground,
            obstacle: None,
        }
    }
}

/// Traversability grid for one bounded area.
///
/// Built once when the area is instantiated and read by many path consumers;
/// every cell edit bumps [`NavGrid::generation`] so caches stamped with an
/// older generation invalidate themselves on their next query.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavGrid {
    width: i32,
    height: i32,
    cells: Vec<CellState>,
    generation: u64,
}

impl NavGrid {
    /// All-ground grid with no obstacles.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid must be non-empty");
        let width = width as i32;
        let height = height as i32;
        Self {
            width,
            height,
            cells: vec![CellState::default(); (width * height) as usize],
            generation: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Bumped on every effective cell edit.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn in_bounds(&self, cell: CellIndex) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    pub fn terrain(&self, cell: CellIndex) -> Option<Terrain> {
        self.idx(cell).map(|idx| self.cells[idx].terrain)
    }

    pub fn obstacle(&self, cell: CellIndex) -> Option<ObstacleTier> {
        self.idx(cell).and_then(|idx| self.cells[idx].obstacle)
    }

    /// Out-of-bounds edits are ignored; unchanged values do not bump the
    /// generation.
    pub fn set_terrain(&mut self, cell: CellIndex, terrain: Terrain) {
        if let Some(idx) = self.idx(cell) {
            if self.cells[idx].terrain != terrain {
                self.cells[idx].terrain = terrain;
                self.generation += 1;
            }
        }
    }

    pub fn set_obstacle(&mut self, cell: CellIndex, obstacle: Option<ObstacleTier>) {
        if let Some(idx) = self.idx(cell) {
            if self.cells[idx].obstacle != obstacle {
                self.cells[idx].obstacle = obstacle;
                self.generation += 1;
            }
        }
    }

    fn idx(&self, cell: CellIndex) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some((cell.y * self.width + cell.x) as usize)
    }

    fn cell_from_idx(&self, idx: usize) -> CellIndex {
        let idx = idx as i32;
        CellIndex::new(idx % self.width, idx / self.width)
    }

    fn cell_enterable(&self, cell: CellIndex, profile: &AgentProfile) -> bool {
        let Some(idx) = self.idx(cell) else {
            return false;
        };
        let state = self.cells[idx];
        if !profile.terrain.contains(state.terrain) {
            return false;
        }
        match state.obstacle {
            None => true,
            Some(tier) => profile.tolerance.clears(tier),
        }
    }

    /// True iff every cell covered by `profile.footprint` anchored at `cell`
    /// is in bounds, on permitted terrain, and free of uncleared obstacles.
    ///
    /// Out-of-bounds anchors are simply non-traversable; the grid never
    /// panics on them.
    pub fn is_traversable(&self, cell: CellIndex, profile: &AgentProfile) -> bool {
        for dy in 0..profile.footprint.height {
            for dx in 0..profile.footprint.width {
                if !self.cell_enterable(cell.offset(dx, dy), profile) {
                    return false;
                }
            }
        }
        true
    }

    /// Traversable 8-neighborhood of `cell`, in a fixed order for determinism.
    ///
    /// A diagonal neighbor additionally requires at least one of its two
    /// flanking cardinal cells to be traversable, so paths cannot cut through
    /// a blocked corner.
    pub fn adjacent_traversable(&self, cell: CellIndex, profile: &AgentProfile) -> Vec<CellIndex> {
        let mut out = Vec::with_capacity(8);
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let neighbor = cell.offset(dx, dy);
            if !self.is_traversable(neighbor, profile) {
                continue;
            }
            if dx != 0
                && dy != 0
                && !self.is_traversable(cell.offset(dx, 0), profile)
                && !self.is_traversable(cell.offset(0, dy), profile)
            {
                continue;
            }
            out.push(neighbor);
        }
        out
    }

    /// Shortest path from `start` to `target` as an ordered list of indices.
    ///
    /// Returns an empty path when either endpoint is untraversable or no
    /// connected route exists; "no route" is a result, not an error. A
    /// traversable `start == target` yields a single-element path.
    pub fn find_path(
        &self,
        start: CellIndex,
        target: CellIndex,
        profile: &AgentProfile,
    ) -> Vec<CellIndex> {
        if !self.is_traversable(start, profile) || !self.is_traversable(target, profile) {
            return Vec::new();
        }
        if start == target {
            return vec![start];
        }
        let (Some(start_idx), Some(target_idx)) = (self.idx(start), self.idx(target)) else {
            return Vec::new();
        };

        let grid_len = (self.width * self.height) as usize;
        let mut g_score = vec![u32::MAX; grid_len];
        let mut came_from: Vec<Option<usize>> = vec![None; grid_len];

        let mut open = BinaryHeap::new();
        let mut tie: u64 = 0;

        g_score[start_idx] = 0;
        open.push(OpenNode {
            f: heuristic(start, target),
            g: 0,
            cell: start,
            tie,
        });
        tie += 1;

        while let Some(node) = open.pop() {
            if node.cell == target {
                return self.reconstruct_path(&came_from, target_idx);
            }

            let Some(node_idx) = self.idx(node.cell) else {
                continue;
            };
            if node.g != g_score[node_idx] {
                // Stale heap entry.
                continue;
            }

            for neighbor in self.adjacent_traversable(node.cell, profile) {
                let Some(neighbor_idx) = self.idx(neighbor) else {
                    continue;
                };
                let step = if neighbor.x != node.cell.x && neighbor.y != node.cell.y {
                    DIAGONAL_COST
                } else {
                    CARDINAL_COST
                };
                let tentative_g = node.g.saturating_add(step);
                if tentative_g >= g_score[neighbor_idx] {
                    continue;
                }

                came_from[neighbor_idx] = Some(node_idx);
                g_score[neighbor_idx] = tentative_g;
                open.push(OpenNode {
                    f: tentative_g.saturating_add(heuristic(neighbor, target)),
                    g: tentative_g,
                    cell: neighbor,
                    tie,
                });
                tie += 1;
            }
        }

        Vec::new()
    }

    fn reconstruct_path(&self, came_from: &[Option<usize>], goal: usize) -> Vec<CellIndex> {
        let mut indices = vec![goal];
        let mut current = goal;
        while let Some(prev) = came_from[current] {
            current = prev;
            indices.push(current);
        }
        indices.reverse();
        indices
            .into_iter()
            .map(|idx| self.cell_from_idx(idx))
            .collect()
    }
}

/// Octile distance in scaled-integer cost units.
fn heuristic(a: CellIndex, b: CellIndex) -> u32 {
    let dx = (a.x - b.x).unsigned_abs();
    let dy = (a.y - b.y).unsigned_abs();
    let (long, short) = if dx >= dy { (dx, dy) } else { (dy, dx) };
    CARDINAL_COST * (long - short) + DIAGONAL_COST * short
}
