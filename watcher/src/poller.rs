//! One fetch-evaluate-notify pass over the catalog, plus the found/watching
//! state carried between passes.

use shared::Topping;

use crate::catalog::CatalogSource;
use crate::config::WatchTarget;
use crate::error::CycleError;
use crate::messages;
use crate::notifier::Notifier;

/// Whether the target has been seen in stock. Only ever moves forward.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum WatchState {
    #[default]
    Watching,
    Found {
        description: String,
    },
}

impl WatchState {
    pub fn is_found(&self) -> bool {
        matches!(self, WatchState::Found { .. })
    }

    /// Transition to `Found`. A second call leaves the first description in place.
    pub fn mark_found(&mut self, description: &str) {
        if !self.is_found() {
            *self = WatchState::Found {
                description: description.to_string(),
            };
        }
    }
}

/// What a single poll cycle did.
#[derive(Debug)]
pub enum CycleOutcome {
    /// Already found earlier; no request was made
    Skipped,
    /// Only the placeholder (or nothing) is purchasable
    Unavailable,
    /// A real option is purchasable. Terminal.
    Found(Topping),
    /// The check failed and the failure was reported to the notifier
    Recovered(CycleError),
}

impl CycleOutcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CycleOutcome::Found(_))
    }
}

pub struct AvailabilityPoller<C, N> {
    catalog: C,
    notifier: N,
    target: WatchTarget,
    state: WatchState,
}

impl<C: CatalogSource, N: Notifier> AvailabilityPoller<C, N> {
    pub fn new(catalog: C, notifier: N, target: WatchTarget) -> Self {
        Self {
            catalog,
            notifier,
            target,
            state: WatchState::Watching,
        }
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    /// Run one poll cycle. Never fails: errors are reported through the
    /// notifier and handed back as [`CycleOutcome::Recovered`].
    pub async fn poll_once(&mut self) -> CycleOutcome {
        if self.state.is_found() {
            tracing::info!("Target already found, skipping check");
            return CycleOutcome::Skipped;
        }

        tracing::info!("Starting availability check");

        match self.check().await {
            Ok(Some(topping)) => {
                tracing::info!("\"{}\" is available! Sending notification", topping.description);
                self.notifier.notify(&messages::found(&topping.description)).await;
                self.state.mark_found(&topping.description);
                CycleOutcome::Found(topping)
            }
            Ok(None) => {
                tracing::info!(
                    "No stock yet in \"{}\", only \"{}\" is offered",
                    self.target.category,
                    self.target.sentinel
                );
                CycleOutcome::Unavailable
            }
            Err(e) => {
                tracing::error!("Availability check failed: {}", e);
                self.notifier.notify(&messages::cycle_error(&e)).await;
                CycleOutcome::Recovered(e)
            }
        }
    }

    async fn check(&self) -> Result<Option<Topping>, CycleError> {
        let response = self.catalog.fetch_toppings().await?;

        let category = response
            .category(&self.target.category)
            .ok_or_else(|| CycleError::CategoryMissing(self.target.category.clone()))?;

        Ok(category.first_available_except(&self.target.sentinel).cloned())
    }
}
