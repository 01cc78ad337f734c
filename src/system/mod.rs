//! Cross-thread plumbing.

pub mod bus;
