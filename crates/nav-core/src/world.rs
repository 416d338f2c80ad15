use core::fmt::Debug;

/// Read-only world access.
///
/// The kernel intentionally does not prescribe which queries a world must
/// expose; specific subsystems (navigation, perception, etc.) should define
/// extension traits.
pub trait WorldView {
    type Agent: Copy + Eq + Debug;
}

/// Write access / effect sink.
pub trait WorldMut: WorldView {}
