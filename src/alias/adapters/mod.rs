//! Adapter implementations for alias ports.
//!
//! The HTTP adapter for the automation service lives in
//! [`crate::stackstorm`]; this module holds the in-memory doubles.

pub mod memory;

pub use memory::{InMemoryAliasExecutor, InMemoryAliasSource, ScriptedExecution};
