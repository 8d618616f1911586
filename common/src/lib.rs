pub mod shapes;

pub use shapes::{Aabb, Circle, Vec2};
