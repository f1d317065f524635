//! Registry-backed implementations of the ports.

mod config;
mod misfired;
mod running;

pub use config::RegistryConfigurationCatalog;
pub use misfired::RegistryMisfireTracker;
pub use running::RegistryRunningTracker;
