use crate::{TickContext, WorldMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStatus {
    Running,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Success,
    Failure,
}

impl From<ActionOutcome> for ActionStatus {
    fn from(value: ActionOutcome) -> Self {
        match value {
            ActionOutcome::Success => ActionStatus::Success,
            ActionOutcome::Failure => ActionStatus::Failure,
        }
    }
}

impl ActionStatus {
    pub fn outcome(self) -> Option<ActionOutcome> {
        match self {
            ActionStatus::Running => None,
            ActionStatus::Success => Some(ActionOutcome::Success),
            ActionStatus::Failure => Some(ActionOutcome::Failure),
        }
    }
}

/// A per-agent behavior ticked once per simulation step by the owning loop.
pub trait Action<W>: 'static
where
    W: WorldMut + 'static,
{
    fn tick(&mut self, ctx: &TickContext, agent: W::Agent, world: &mut W) -> ActionStatus;

    fn cancel(&mut self, _ctx: &TickContext, _agent: W::Agent, _world: &mut W) {}
}
