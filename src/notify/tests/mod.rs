//! Unit tests for the notify module.
