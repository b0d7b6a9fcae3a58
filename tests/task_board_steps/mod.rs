//! Step definitions for task board behaviour scenarios.

pub mod world;

mod given;
mod then;
mod when;
