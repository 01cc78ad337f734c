//! Input abstraction between the window host and the menu core.

pub mod events;
pub mod manager;

pub use events::{FrameInput, MenuEvent, MenuKey, PointerButton};
pub use manager::InputManager;
