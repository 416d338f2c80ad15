/// Per-step context handed to every ticked component.
///
/// The simulation loop owns the clock; components never poll wall time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickContext {
    pub tick: u64,
    pub dt_seconds: f32,
}
