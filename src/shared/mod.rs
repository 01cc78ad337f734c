//! Data shared between the menu core and the host.

pub mod snapshot;
