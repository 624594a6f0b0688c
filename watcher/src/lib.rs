//! Watches a product's topping catalog and sends a Telegram message as soon
//! as a real (non-placeholder) option becomes purchasable.

pub mod catalog;
pub mod config;
pub mod error;
pub mod messages;
pub mod notifier;
pub mod poller;
pub mod scheduler;

pub use catalog::{CatalogSource, HttpCatalogClient};
pub use config::{WatchConfig, WatchTarget};
pub use error::{ConfigError, CycleError};
pub use notifier::{Delivery, Notifier, TelegramNotifier};
pub use poller::{AvailabilityPoller, CycleOutcome, WatchState};
pub use scheduler::{SchedulerHandle, SchedulerState, WatchScheduler, WatchSummary};
