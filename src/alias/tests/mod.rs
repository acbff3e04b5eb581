//! Unit tests for the alias module.
//!
//! Tests are organised by component: pattern compilation, snapshot
//! construction, and the resolution, refresh and dispatch services.
