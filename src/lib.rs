//! carecache — persisted dashboard cache for call-center operator data.
//!
//! The dashboard displays two record collections (beneficiaries and
//! follow-up calls) that are expensive to refetch on every navigation.
//! This crate owns the cached copy: an in-memory store mirrored to
//! durable storage under a fixed key, where the decision to reload is
//! driven by data presence and operator identity, never by wall-clock
//! expiry.
//!
//! - [`store::DashboardStore`]: the persisted store and its reload policy
//! - [`storage`]: the pluggable key-value port (memory and file backends)
//! - [`loader`]: the page-load flow feeding the store from a remote source
//! - [`identity::OperatorId`]: normalized operator identity
//! - [`models`]: the cached record types

pub mod config;
pub mod identity;
pub mod loader;
pub mod models;
pub mod storage;
pub mod store;
pub mod utils;

pub use identity::OperatorId;
pub use loader::{ensure_fresh, DataSource, LoadOutcome};
pub use models::{Beneficiary, FollowUp};
pub use storage::{FileStorage, MemoryStorage, StorageError, StoragePort};
pub use store::{DashboardStore, LoadState};
