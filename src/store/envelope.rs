//! Wire format of the persisted snapshot.
//!
//! The durable entry is a JSON envelope wrapping a `state` object, the
//! format the dashboard client's persisted-store middleware reads:
//!
//! ```json
//! {
//!   "state": {
//!     "beneficiaries": [...],
//!     "seguimientos": [...],
//!     "dataLoaded": true,
//!     "lastLoadedEmail": "ana@example.com"
//!   },
//!   "version": 0,
//!   "storedAt": "2026-08-07T10:12:00Z"
//! }
//! ```
//!
//! Field names are load-bearing: the client reads them verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Beneficiary, FollowUp};

/// Fixed durable-storage key for the dashboard snapshot.
pub const STORE_KEY: &str = "dashboard-storage";

/// Snapshot schema version written into the envelope.
pub const STORE_VERSION: u32 = 0;

/// The persisted subset of the store's fields. `isLoading` is transient
/// and never written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub beneficiaries: Vec<Beneficiary>,
    #[serde(rename = "seguimientos", default)]
    pub follow_ups: Vec<FollowUp>,
    #[serde(rename = "dataLoaded", default)]
    pub data_loaded: bool,
    #[serde(rename = "lastLoadedEmail", default)]
    pub last_loaded_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub state: PersistedState,
    #[serde(default)]
    pub version: u32,
    #[serde(rename = "storedAt", default, skip_serializing_if = "Option::is_none")]
    pub stored_at: Option<DateTime<Utc>>,
}

impl Envelope {
    pub fn new(state: PersistedState) -> Self {
        Self {
            state,
            version: STORE_VERSION,
            stored_at: Some(Utc::now()),
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a raw durable entry. Malformed data is discarded, not an
    /// error: the caller starts from the empty initial state.
    pub fn decode(raw: &str) -> Option<Self> {
        match serde_json::from_str(raw) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                debug!(error = %e, "discarding malformed dashboard snapshot");
                None
            }
        }
    }
}

/// Human age of a snapshot timestamp, for diagnostics output.
pub fn age_display(stored_at: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - stored_at).num_minutes();
    if minutes < 1 {
        // Covers clock skew as well
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}
