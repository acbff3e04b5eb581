//! Periodic registry refresh from the alias source.

use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::CommandRegistry;
use crate::alias::ports::{AliasSource, AliasSourceError};

/// Default interval between refresh cycles.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(120);

/// Errors that end a single refresh cycle.
#[derive(Debug, Clone, Error)]
pub enum RefreshError {
    /// The alias listing could not be obtained or decoded.
    #[error("failed to retrieve commands: {0}")]
    Source(#[from] AliasSourceError),
}

/// Summary of a successful refresh cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Aliases present in the installed snapshot.
    pub aliases: usize,
    /// Format strings present in the installed snapshot.
    pub matchers: usize,
}

/// Keeps a [`CommandRegistry`] in step with an [`AliasSource`].
///
/// Failed cycles leave the installed snapshot untouched. Cycles are not
/// serialized against each other: when a slow fetch overlaps the next tick,
/// whichever cycle finishes last installs its snapshot.
pub struct RegistryRefresher<S, C>
where
    S: AliasSource,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    registry: Arc<CommandRegistry>,
    clock: Arc<C>,
    interval: Duration,
}

impl<S, C> RegistryRefresher<S, C>
where
    S: AliasSource + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a refresher.
    #[must_use]
    pub const fn new(
        source: Arc<S>,
        registry: Arc<CommandRegistry>,
        clock: Arc<C>,
        interval: Duration,
    ) -> Self {
        Self {
            source,
            registry,
            clock,
            interval,
        }
    }

    /// Returns the interval between cycles.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Runs one fetch-build-install cycle.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] when the listing cannot be fetched; the
    /// registry is left unchanged in that case.
    pub async fn refresh_once(&self) -> Result<RefreshOutcome, RefreshError> {
        tracing::info!("loading commands");
        let aliases = self.source.fetch_aliases().await?;
        let installed = self.registry.replace(aliases, &*self.clock);
        let outcome = RefreshOutcome {
            aliases: installed.alias_count(),
            matchers: installed.len(),
        };
        tracing::info!(
            aliases = outcome.aliases,
            formats = outcome.matchers,
            "installed command registry"
        );
        Ok(outcome)
    }

    /// Spawns the refresh loop.
    ///
    /// The first cycle starts immediately, later cycles every
    /// [`interval`](Self::interval). Each cycle runs in its own task so a
    /// hung fetch never delays the next tick. The loop runs until the
    /// runtime shuts down.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let period = if self.interval.is_zero() {
                DEFAULT_REFRESH_INTERVAL
            } else {
                self.interval
            };
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let cycle = Arc::clone(&self);
                tokio::spawn(async move {
                    if let Err(error) = cycle.refresh_once().await {
                        tracing::error!(%error, "command refresh failed; keeping previous registry");
                    }
                });
            }
        })
    }
}
