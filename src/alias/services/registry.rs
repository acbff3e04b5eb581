//! Atomically replaceable command registry.

use arc_swap::ArcSwap;
use mockable::Clock;
use std::sync::Arc;

use crate::alias::domain::{AliasDefinition, RegistrySnapshot};

/// Holder of the current [`RegistrySnapshot`].
///
/// Readers pin the snapshot they load; a replacement publishes a fully built
/// snapshot with a single pointer swap, so no reader can observe a
/// partially built registry. The previous snapshot is dropped once the last
/// reader releases it.
#[derive(Debug)]
pub struct CommandRegistry {
    current: ArcSwap<RegistrySnapshot>,
}

impl CommandRegistry {
    /// Creates a registry holding an empty snapshot.
    #[must_use]
    pub fn new(clock: &impl Clock) -> Self {
        Self::with_snapshot(RegistrySnapshot::empty(clock))
    }

    /// Creates a registry holding `snapshot`.
    #[must_use]
    pub fn with_snapshot(snapshot: RegistrySnapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn current(&self) -> Arc<RegistrySnapshot> {
        self.current.load_full()
    }

    /// Returns `true` when the current snapshot has no commands.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.load().is_empty()
    }

    /// Publishes a prebuilt snapshot, discarding the previous one.
    pub fn install(&self, snapshot: RegistrySnapshot) -> Arc<RegistrySnapshot> {
        let installed = Arc::new(snapshot);
        self.current.store(Arc::clone(&installed));
        installed
    }

    /// Builds a snapshot from `aliases` and publishes it.
    pub fn replace(
        &self,
        aliases: impl IntoIterator<Item = AliasDefinition>,
        clock: &impl Clock,
    ) -> Arc<RegistrySnapshot> {
        self.install(RegistrySnapshot::build(aliases, clock))
    }
}
