//! switchcore: the operations core for a model-railroad dispatch server.
//!
//! This crate tracks the state of an operating session — rolling stock,
//! car-order demand, and train switch-list planning — behind a generic
//! document-store contract. It owns no transport, persistence engine, or UI;
//! those are external collaborators that speak to the services below.
//!
//! # Architecture
//!
//! switchcore is organized by bounded context in the hexagonal style:
//!
//! - **Domain**: pure business logic with no infrastructure dependencies
//! - **Ports**: abstract trait interfaces for persistence
//! - **Services**: orchestration, validation ordering, and advisory locking
//! - **Adapters**: concrete implementations of ports (in-memory, for now)
//!
//! # Modules
//!
//! - [`store`]: the generic document-store contract every repository wraps
//! - [`roster`]: reference data and rolling stock (stations, routes,
//!   locomotives, cars, AAR types, industries)
//! - [`session`]: the current-session singleton and the atomic advance/
//!   rollback of world state it orchestrates
//! - [`car_order`]: demand-driven car-order generation and lifecycle
//! - [`train`]: train lifecycle and switch-list planning

pub mod car_order;
pub mod roster;
pub mod session;
pub mod store;
pub mod train;

/// Runtime configuration for a switchcore service registry.
///
/// Constructed from explicit fields rather than a config-file crate: the
/// core has no file-system or environment surface of its own, and the
/// advisory lock is a narrow strengthening a caller may opt out of, not a
/// deployment concern that belongs in a config file.
#[derive(Debug, Clone, Copy)]
pub struct SwitchcoreConfig {
    /// Whether `SessionService`/`TrainService` hold a process-wide advisory
    /// lock around `advance`/`rollback`/`completeTrain`/`cancelTrain`/
    /// `generateSwitchList`. Permitted but not required; disabling it is
    /// only safe behind a caller that already serializes these calls itself
    /// (e.g. a single-writer HTTP layer).
    pub advisory_lock_enabled: bool,
}

impl SwitchcoreConfig {
    /// Returns the default configuration: the advisory lock enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            advisory_lock_enabled: true,
        }
    }
}

impl Default for SwitchcoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::SwitchcoreConfig;

    #[test]
    fn default_config_enables_the_advisory_lock() {
        assert!(SwitchcoreConfig::default().advisory_lock_enabled);
    }
}
