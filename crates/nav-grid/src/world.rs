use nav_core::{WorldMut, WorldView};

use crate::{Area, Vec2};

pub trait NavWorldView: WorldView {
    fn position(&self, agent: Self::Agent) -> Option<Vec2>;
    fn area(&self) -> &Area;
}

pub trait NavWorldMut: WorldMut + NavWorldView {
    fn set_position(&mut self, agent: Self::Agent, position: Vec2);
}
