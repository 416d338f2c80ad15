use nav_tools::{TraceEvent, TraceLog};

use crate::{path, AgentProfile, Area, AreaStamp, CellIndex, Footprint, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Trace tags recorded by a tracing [`PathTask`], one event per request.
pub const TRACE_HIT: &str = "path.hit";
pub const TRACE_SPLICE: &str = "path.splice";
pub const TRACE_SEARCH: &str = "path.search";
pub const TRACE_NO_ROUTE: &str = "path.no_route";

/// Cache-reuse tuning for [`PathTask`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReusePolicy {
    /// World-space slack within which a moved endpoint still counts as the
    /// same tile.
    pub exit_extents: f32,
    /// Relative cost drift tolerated before a spliced path is discarded in
    /// favor of a fresh search.
    pub max_cost_drift: f32,
}

impl Default for ReusePolicy {
    fn default() -> Self {
        Self {
            exit_extents: 0.25,
            max_cost_drift: 0.25,
        }
    }
}

/// One path query in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathRequest {
    pub profile: AgentProfile,
    pub start: Vec2,
    pub target: Vec2,
}

/// Per-request counters.
///
/// `searches` counts full grid searches; tests that must prove a request was
/// served from the cache or by splicing compare it across calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PathTaskStats {
    pub requests: u64,
    pub cache_hits: u64,
    pub splices: u64,
    pub searches: u64,
}

#[derive(Debug, Clone)]
struct PathCache {
    stamp: AreaStamp,
    profile: AgentProfile,
    start: CellIndex,
    target: CellIndex,
    path: Vec<CellIndex>,
    /// Cost at the last full search. Splice drift is measured cumulatively
    /// against this, not against the previous splice.
    baseline_cost: f32,
}

/// Incremental path cache for one moving agent.
///
/// Amortizes full grid searches across per-tick queries whose start and
/// target usually move by a fraction of a tile. One instance per agent,
/// mutated in place on every request and never shared; dropping the agent
/// drops the task.
#[derive(Debug, Clone, Default)]
pub struct PathTask {
    cache: Option<PathCache>,
    stats: PathTaskStats,
    trace: Option<TraceLog>,
}

impl PathTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// A task that records one trace event per request.
    pub fn with_trace() -> Self {
        Self {
            trace: Some(TraceLog::default()),
            ..Self::default()
        }
    }

    pub fn stats(&self) -> PathTaskStats {
        self.stats
    }

    /// Drain recorded events; empty unless the task was built with tracing.
    pub fn take_trace(&mut self) -> TraceLog {
        self.trace.as_mut().map(core::mem::take).unwrap_or_default()
    }

    /// Resolve a world-space path request, reusing the cached path when the
    /// endpoints moved little and recomputing otherwise.
    ///
    /// The returned waypoints are footprint centers of the tile path; an
    /// empty list means no route and callers must treat it as "stay put",
    /// never as a fault. Out-of-bounds positions are clamped into the area's
    /// traversal bounds before indexing.
    pub fn request_path_points(
        &mut self,
        area: &Area,
        request: &PathRequest,
        policy: &ReusePolicy,
    ) -> Vec<Vec2> {
        self.stats.requests += 1;
        let footprint = request.profile.footprint;

        // Any change of area, generation, or profile drops the cache as a
        // whole; there is no partial reuse across parameter changes.
        let stale = self
            .cache
            .as_ref()
            .is_some_and(|cache| cache.stamp != area.stamp() || cache.profile != request.profile);
        if stale {
            self.cache = None;
        }

        let new_start = area.clamp_index(area.index_from_world(request.start, footprint), footprint);
        let new_target =
            area.clamp_index(area.index_from_world(request.target, footprint), footprint);

        // Unchanged endpoints: hand back the cached path as-is.
        if let Some(cache) = &self.cache {
            if cache.start == new_start && cache.target == new_target {
                let len = cache.path.len() as u64;
                self.stats.cache_hits += 1;
                record(&mut self.trace, self.stats.requests, TRACE_HIT, len, 0);
                return to_world(area, footprint, &cache.path);
            }
        }

        // Splice: truncate and extend the cached path at the moved ends,
        // keeping it only while its cost stays close to the last full search.
        let spliced = match &self.cache {
            Some(cache) if !cache.path.is_empty() => {
                try_splice(area, cache, new_start, new_target, &request.profile, policy)
            }
            _ => None,
        };
        if let (Some(revised), Some(cache)) = (spliced, self.cache.as_mut()) {
            if let (Some(&first), Some(&last)) = (revised.first(), revised.last()) {
                cache.start = first;
                cache.target = last;
            }
            cache.path = revised;
            let len = cache.path.len() as u64;
            self.stats.splices += 1;
            record(&mut self.trace, self.stats.requests, TRACE_SPLICE, len, 0);
            return to_world(area, footprint, &cache.path);
        }

        // Full recompute.
        let found = area
            .grid()
            .find_path(new_start, new_target, &request.profile);
        self.stats.searches += 1;
        let cost = path::path_cost(&found);
        let tag = if found.is_empty() {
            TRACE_NO_ROUTE
        } else {
            TRACE_SEARCH
        };
        record(
            &mut self.trace,
            self.stats.requests,
            tag,
            found.len() as u64,
            (cost * 1000.0) as u64,
        );
        let points = to_world(area, footprint, &found);
        self.cache = Some(PathCache {
            stamp: area.stamp(),
            profile: request.profile,
            start: new_start,
            target: new_target,
            path: found,
            baseline_cost: cost,
        });
        points
    }
}

/// Revised path with the moved endpoints spliced on, or `None` when either
/// endpoint is too far from the cached path or the revision drifted too far
/// from the baseline cost.
fn try_splice(
    area: &Area,
    cache: &PathCache,
    new_start: CellIndex,
    new_target: CellIndex,
    profile: &AgentProfile,
    policy: &ReusePolicy,
) -> Option<Vec<CellIndex>> {
    let footprint = profile.footprint;
    let grid = area.grid();
    let mut revised = cache.path.clone();

    // Start endpoint, resolved against the back of the path so the splice
    // keeps the shortest usable remainder.
    let start_world = area.world_from_index(new_start, footprint);
    let prev_start_world = area.world_from_index(cache.start, footprint);
    if start_world.distance(prev_start_world) <= policy.exit_extents {
        // Within slack: endpoint unchanged.
    } else if let Some(at) = revised.iter().rposition(|&cell| cell == new_start) {
        revised.drain(..at);
    } else if grid.is_traversable(new_start, profile) {
        let neighbors = grid.adjacent_traversable(new_start, profile);
        let at = revised.iter().rposition(|cell| neighbors.contains(cell))?;
        revised.drain(..at);
        revised.insert(0, new_start);
    } else {
        return None;
    }

    // Target endpoint, resolved against the front.
    let target_world = area.world_from_index(new_target, footprint);
    let prev_target_world = area.world_from_index(cache.target, footprint);
    if target_world.distance(prev_target_world) <= policy.exit_extents {
        // Within slack.
    } else if let Some(at) = revised.iter().position(|&cell| cell == new_target) {
        revised.truncate(at + 1);
    } else if grid.is_traversable(new_target, profile) {
        let neighbors = grid.adjacent_traversable(new_target, profile);
        let at = revised.iter().position(|cell| neighbors.contains(cell))?;
        revised.truncate(at + 1);
        revised.push(new_target);
    } else {
        return None;
    }

    let revised_cost = path::path_cost(&revised);
    if cache.baseline_cost <= f32::EPSILON {
        // A zero-cost baseline only ever matches a zero-cost revision.
        if revised_cost > f32::EPSILON {
            return None;
        }
    } else if (revised_cost / cache.baseline_cost - 1.0).abs() >= policy.max_cost_drift {
        return None;
    }

    Some(revised)
}

fn to_world(area: &Area, footprint: Footprint, path: &[CellIndex]) -> Vec<Vec2> {
    path.iter()
        .map(|&cell| area.world_from_index(cell, footprint))
        .collect()
}

fn record(trace: &mut Option<TraceLog>, request: u64, tag: &'static str, a: u64, b: u64) {
    if let Some(log) = trace {
        log.push(TraceEvent::new(request, tag).with_a(a).with_b(b));
    }
}
