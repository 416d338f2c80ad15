//! Deterministic, engine-agnostic simulation kernel primitives.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod action;
pub mod tick;
pub mod world;

pub use action::{Action, ActionOutcome, ActionStatus};
pub use tick::TickContext;
pub use world::{WorldMut, WorldView};
