//! Plain data shared by the menu, the catalog and the host.

pub mod common;
pub mod settings;
pub mod track;

pub use settings::Settings;
pub use track::{TimingPoint, Track};
