//! Step definitions for chat command scenarios.

mod given;
mod then;
mod when;
pub mod world;
