//! Animation primitives and the cursor.

pub mod animation;
pub mod button;
pub mod cursor;

pub use animation::{AnimatedValue, AnimationEquation};
pub use button::{Expand, MenuButton, Shape};
pub use cursor::CursorTrail;
