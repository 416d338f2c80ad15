use nav_core::{Action, ActionStatus, TickContext};

use crate::{AgentProfile, NavWorldMut, PathRequest, PathTask, PathTaskStats, ReusePolicy, Vec2};

/// Reference path-following action.
///
/// Walks its agent toward `goal` along waypoints served by a per-agent
/// [`PathTask`], so per-tick queries reuse the cached path instead of
/// re-searching the grid.
#[derive(Debug, Clone)]
pub struct MoveToAction {
    goal: Vec2,
    speed: f32,
    arrival_distance: f32,
    profile: AgentProfile,
    policy: ReusePolicy,
    task: PathTask,
}

impl MoveToAction {
    pub fn new(goal: Vec2, speed: f32, arrival_distance: f32, profile: AgentProfile) -> Self {
        Self {
            goal,
            speed,
            arrival_distance,
            profile,
            policy: ReusePolicy::default(),
            task: PathTask::new(),
        }
    }

    pub fn with_policy(mut self, policy: ReusePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Reuse counters of the underlying task.
    pub fn stats(&self) -> PathTaskStats {
        self.task.stats()
    }
}

impl<W> Action<W> for MoveToAction
where
    W: NavWorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) -> ActionStatus {
        let Some(pos) = world.position(agent) else {
            return ActionStatus::Failure;
        };

        if pos.distance(self.goal) <= self.arrival_distance {
            return ActionStatus::Success;
        }

        let request = PathRequest {
            profile: self.profile,
            start: pos,
            target: self.goal,
        };
        let points = self
            .task
            .request_path_points(world.area(), &request, &self.policy);
        if points.is_empty() {
            return ActionStatus::Failure;
        }

        let dt = ctx.dt_seconds.max(0.0);
        let mut remaining = self.speed.max(0.0) * dt;
        let mut current = pos;

        // The first waypoint is the agent's own tile; head for the tail.
        let mut next_index = if points.len() > 1 { 1 } else { 0 };
        while next_index < points.len() && remaining > 0.0 {
            let target = points[next_index];
            let to_target = target - current;
            let dist = to_target.length();

            if dist <= f32::EPSILON {
                next_index += 1;
                continue;
            }

            if remaining >= dist {
                current = target;
                next_index += 1;
                remaining -= dist;
                continue;
            }

            current = current + to_target * (remaining / dist);
            remaining = 0.0;
        }

        // Close the sub-tile gap between the goal tile's center and the goal.
        if remaining > 0.0 {
            let to_goal = self.goal - current;
            let dist = to_goal.length();
            if dist > f32::EPSILON {
                if remaining >= dist {
                    current = self.goal;
                } else {
                    current = current + to_goal * (remaining / dist);
                }
            }
        }

        world.set_position(agent, current);
        ActionStatus::Running
    }
}
