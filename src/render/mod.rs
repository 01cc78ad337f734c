//! Window host driving the title screen.

pub mod app;
