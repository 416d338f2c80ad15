use nav_core::{Action, ActionOutcome, ActionStatus, TickContext, WorldMut, WorldView};

#[derive(Debug)]
struct NullWorld;

impl WorldView for NullWorld {
    type Agent = u32;
}

impl WorldMut for NullWorld {}

#[derive(Debug)]
struct Countdown {
    remaining: u32,
}

impl Action<NullWorld> for Countdown {
    fn tick(&mut self, _ctx: &TickContext, _agent: u32, _world: &mut NullWorld) -> ActionStatus {
        if self.remaining == 0 {
            return ActionStatus::Success;
        }
        self.remaining -= 1;
        ActionStatus::Running
    }
}

#[test]
fn action_runs_until_done() {
    let mut world = NullWorld;
    let mut action = Countdown { remaining: 2 };
    let ctx = TickContext {
        tick: 0,
        dt_seconds: 0.1,
    };

    assert_eq!(action.tick(&ctx, 1, &mut world), ActionStatus::Running);
    assert_eq!(action.tick(&ctx, 1, &mut world), ActionStatus::Running);
    assert_eq!(action.tick(&ctx, 1, &mut world), ActionStatus::Success);
}

#[test]
fn outcome_maps_terminal_statuses_only() {
    assert_eq!(ActionStatus::Running.outcome(), None);
    assert_eq!(
        ActionStatus::Success.outcome(),
        Some(ActionOutcome::Success)
    );
    assert_eq!(
        ActionStatus::Failure.outcome(),
        Some(ActionOutcome::Failure)
    );

    assert_eq!(
        ActionStatus::from(ActionOutcome::Failure),
        ActionStatus::Failure
    );
}
