//! The persisted dashboard store.
//!
//! Single source of truth for dashboard-display data between page
//! navigations. Holds the two record collections in memory, mirrors
//! them to durable storage on every change, and answers the one policy
//! question the page-load flow asks: does this operator need a fresh
//! load? Reloads are driven purely by absence of data and by operator
//! switches; there is no time-based expiry.

pub mod envelope;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::identity::OperatorId;
use crate::models::{Beneficiary, FollowUp};
use crate::storage::{StorageError, StoragePort};

use self::envelope::{Envelope, PersistedState, STORE_KEY};

/// Whether the data currently in memory corresponds to the active
/// operator. `is_loading` is transient UI state and is never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadState {
    pub is_loading: bool,
    pub data_loaded: bool,
    pub last_loaded: Option<OperatorId>,
}

pub struct DashboardStore<P: StoragePort> {
    beneficiaries: Vec<Beneficiary>,
    follow_ups: Vec<FollowUp>,
    load_state: LoadState,
    /// When the snapshot was last written, for diagnostics only.
    stored_at: Option<DateTime<Utc>>,
    port: P,
}

impl<P: StoragePort> DashboardStore<P> {
    /// Fresh empty store over the given port. Does not read prior state.
    pub fn new(port: P) -> Self {
        Self {
            beneficiaries: Vec::new(),
            follow_ups: Vec::new(),
            load_state: LoadState::default(),
            stored_at: None,
            port,
        }
    }

    /// Open a store, rehydrating from the port. An absent or malformed
    /// entry yields the empty initial state.
    pub fn open(port: P) -> Self {
        let mut store = Self::new(port);
        store.hydrate();
        store
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn beneficiaries(&self) -> &[Beneficiary] {
        &self.beneficiaries
    }

    pub fn follow_ups(&self) -> &[FollowUp] {
        &self.follow_ups
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_loading(&self) -> bool {
        self.load_state.is_loading
    }

    pub fn stored_at(&self) -> Option<DateTime<Utc>> {
        self.stored_at
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Replace the beneficiaries collection. No merge, order preserved.
    pub fn set_beneficiaries(&mut self, records: Vec<Beneficiary>) {
        self.beneficiaries = records;
        self.persist();
    }

    /// Replace the follow-ups collection. No merge, order preserved.
    pub fn set_follow_ups(&mut self, records: Vec<FollowUp>) {
        self.follow_ups = records;
        self.persist();
    }

    /// Flip the transient loading flag. Excluded from the snapshot, so
    /// there is nothing to persist.
    pub fn set_loading(&mut self, loading: bool) {
        self.load_state.is_loading = loading;
    }

    /// Record a completed load for `operator`.
    pub fn mark_loaded(&mut self, operator: OperatorId) {
        self.load_state.data_loaded = true;
        self.load_state.last_loaded = Some(operator);
        self.persist();
    }

    /// Core reload policy: fresh data is needed when nothing was loaded,
    /// when the beneficiaries collection is empty, or when the active
    /// operator differs from the one the data was loaded for.
    pub fn needs_reload(&self, operator: &OperatorId) -> bool {
        !self.load_state.data_loaded
            || self.beneficiaries.is_empty()
            || self.load_state.last_loaded.as_ref() != Some(operator)
    }

    /// Reset everything to the initial state (logout path) and persist
    /// the empty snapshot.
    pub fn clear(&mut self) {
        self.beneficiaries.clear();
        self.follow_ups.clear();
        self.load_state = LoadState::default();
        self.persist();
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    fn snapshot(&self) -> PersistedState {
        PersistedState {
            beneficiaries: self.beneficiaries.clone(),
            follow_ups: self.follow_ups.clone(),
            data_loaded: self.load_state.data_loaded,
            last_loaded_email: self
                .load_state
                .last_loaded
                .clone()
                .map(OperatorId::into_string),
        }
    }

    /// Mirror the current state to the port. Storage failures never
    /// surface to the caller: quota exhaustion degrades to writing the
    /// empty snapshot so the key stays parseable, anything else is
    /// logged and the in-memory state stands.
    fn persist(&mut self) {
        let envelope = Envelope::new(self.snapshot());
        let json = match envelope.encode() {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "failed to serialize dashboard snapshot");
                return;
            }
        };

        match self.port.set(STORE_KEY, &json) {
            Ok(()) => self.stored_at = envelope.stored_at,
            Err(StorageError::QuotaExceeded) => {
                warn!("storage quota exceeded, writing empty fallback snapshot");
                self.persist_fallback();
            }
            Err(e) => warn!(error = %e, "failed to persist dashboard snapshot"),
        }
    }

    fn persist_fallback(&mut self) {
        let fallback = Envelope::new(PersistedState::default());
        match fallback.encode() {
            Ok(json) => {
                if let Err(e) = self.port.set(STORE_KEY, &json) {
                    warn!(error = %e, "failed to write fallback snapshot");
                }
            }
            Err(e) => warn!(error = %e, "failed to serialize fallback snapshot"),
        }
    }

    fn hydrate(&mut self) {
        let raw = match self.port.get(STORE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return,
            Err(e) => {
                debug!(error = %e, "failed to read persisted snapshot");
                return;
            }
        };

        let Some(envelope) = Envelope::decode(&raw) else {
            return;
        };

        self.beneficiaries = envelope.state.beneficiaries;
        self.follow_ups = envelope.state.follow_ups;
        self.load_state = LoadState {
            is_loading: false,
            data_loaded: envelope.state.data_loaded,
            last_loaded: envelope
                .state
                .last_loaded_email
                .as_deref()
                .and_then(OperatorId::new),
        };
        self.stored_at = envelope.stored_at;
    }
}

// ============================================================================
// Tests
// ============================================================================
