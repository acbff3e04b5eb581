//! Unit tests for the automation service adapter.
