//! Grid navigation primitives: per-area traversability, deterministic search,
//! and incremental per-agent path caching.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod actions;
pub mod area;
pub mod cell;
pub mod grid;
pub mod math;
pub mod path;
pub mod task;
pub mod world;

pub use actions::MoveToAction;
pub use area::{index_from_world, world_from_index, Area, AreaId, AreaStamp};
pub use cell::{
    AgentProfile, CellIndex, Footprint, ObstacleTier, Terrain, TerrainSet, Tolerance,
};
pub use grid::NavGrid;
pub use math::Vec2;
pub use path::{path_cost, step_cost};
pub use task::{
    PathRequest, PathTask, PathTaskStats, ReusePolicy, TRACE_HIT, TRACE_NO_ROUTE, TRACE_SEARCH,
    TRACE_SPLICE,
};
pub use world::{NavWorldMut, NavWorldView};
