//! Page-load orchestration.
//!
//! The dashboard asks one question on every navigation: is the cached
//! data good for the operator who is signed in right now? `ensure_fresh`
//! answers it against the store's reload policy and, only when needed,
//! pulls both collections from the remote source and commits them as a
//! unit. There is a single logical writer; calls are sequential.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::identity::OperatorId;
use crate::models::{Beneficiary, FollowUp};
use crate::storage::StoragePort;
use crate::store::DashboardStore;

/// Remote source of dashboard records. Implementations (the document
/// database client) live outside this crate; tests use stubs.
#[allow(async_fn_in_trait)]
pub trait DataSource {
    async fn fetch_beneficiaries(&self, operator: &OperatorId) -> Result<Vec<Beneficiary>>;
    async fn fetch_follow_ups(&self, operator: &OperatorId) -> Result<Vec<FollowUp>>;
}

/// What `ensure_fresh` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Cached data already belongs to this operator; the source was not
    /// touched.
    CacheHit,
    Refreshed {
        beneficiaries: usize,
        follow_ups: usize,
    },
}

/// Make sure the store holds current data for `operator`, fetching from
/// `source` when the reload policy says so.
///
/// Both collections are fetched before either is committed, so a failed
/// fetch leaves the store exactly as it was (minus the loading flag,
/// which is always cleared).
pub async fn ensure_fresh<P, S>(
    store: &mut DashboardStore<P>,
    source: &S,
    operator: &OperatorId,
) -> Result<LoadOutcome>
where
    P: StoragePort,
    S: DataSource,
{
    if !store.needs_reload(operator) {
        debug!(operator = %operator, "cached dashboard data is current");
        return Ok(LoadOutcome::CacheHit);
    }

    info!(operator = %operator, "loading dashboard data");
    store.set_loading(true);
    let outcome = load_into(store, source, operator).await;
    store.set_loading(false);
    outcome
}

async fn load_into<P, S>(
    store: &mut DashboardStore<P>,
    source: &S,
    operator: &OperatorId,
) -> Result<LoadOutcome>
where
    P: StoragePort,
    S: DataSource,
{
    let beneficiaries = source
        .fetch_beneficiaries(operator)
        .await
        .context("failed to fetch beneficiaries")?;
    let follow_ups = source
        .fetch_follow_ups(operator)
        .await
        .context("failed to fetch follow-ups")?;

    let outcome = LoadOutcome::Refreshed {
        beneficiaries: beneficiaries.len(),
        follow_ups: follow_ups.len(),
    };
    store.set_beneficiaries(beneficiaries);
    store.set_follow_ups(follow_ups);
    store.mark_loaded(operator.clone());
    Ok(outcome)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use anyhow::anyhow;
    use std::cell::Cell;

    struct StubSource {
        beneficiaries: usize,
        fetches: Cell<usize>,
    }

    impl StubSource {
        fn with_records(beneficiaries: usize) -> Self {
            Self {
                beneficiaries,
                fetches: Cell::new(0),
            }
        }
    }

    impl DataSource for StubSource {
        async fn fetch_beneficiaries(&self, _operator: &OperatorId) -> Result<Vec<Beneficiary>> {
            self.fetches.set(self.fetches.get() + 1);
            Ok((0..self.beneficiaries)
                .map(|i| Beneficiary {
                    id: Some(i.to_string()),
                    ..Default::default()
                })
                .collect())
        }

        async fn fetch_follow_ups(&self, _operator: &OperatorId) -> Result<Vec<FollowUp>> {
            Ok(vec![FollowUp::default()])
        }
    }

    struct FailingSource;

    impl DataSource for FailingSource {
        async fn fetch_beneficiaries(&self, _operator: &OperatorId) -> Result<Vec<Beneficiary>> {
            Err(anyhow!("backend unavailable"))
        }

        async fn fetch_follow_ups(&self, _operator: &OperatorId) -> Result<Vec<FollowUp>> {
            Err(anyhow!("backend unavailable"))
        }
    }

    fn operator(email: &str) -> OperatorId {
        OperatorId::new(email).unwrap()
    }

    #[tokio::test]
    async fn test_second_load_for_same_operator_hits_cache() {
        let mut store = DashboardStore::new(MemoryStorage::new());
        let source = StubSource::with_records(3);
        let ana = operator("ana@x.com");

        let first = ensure_fresh(&mut store, &source, &ana).await.unwrap();
        assert_eq!(
            first,
            LoadOutcome::Refreshed {
                beneficiaries: 3,
                follow_ups: 1
            }
        );

        let second = ensure_fresh(&mut store, &source, &ana).await.unwrap();
        assert_eq!(second, LoadOutcome::CacheHit);
        assert_eq!(source.fetches.get(), 1);
    }

    #[tokio::test]
    async fn test_operator_switch_refetches() {
        let mut store = DashboardStore::new(MemoryStorage::new());
        let source = StubSource::with_records(2);

        ensure_fresh(&mut store, &source, &operator("ana@x.com"))
            .await
            .unwrap();
        ensure_fresh(&mut store, &source, &operator("eva@x.com"))
            .await
            .unwrap();

        assert_eq!(source.fetches.get(), 2);
        assert!(!store.needs_reload(&operator("eva@x.com")));
        assert!(store.needs_reload(&operator("ana@x.com")));
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_store_intact() {
        let mut store = DashboardStore::new(MemoryStorage::new());
        let ana = operator("ana@x.com");

        ensure_fresh(&mut store, &StubSource::with_records(4), &ana)
            .await
            .unwrap();

        // A later forced reload (operator switch) that fails must not
        // clobber the previous data, and must clear the loading flag.
        let eva = operator("eva@x.com");
        let err = ensure_fresh(&mut store, &FailingSource, &eva).await;
        assert!(err.is_err());
        assert!(!store.is_loading());
        assert_eq!(store.beneficiaries().len(), 4);
        assert!(!store.needs_reload(&ana));
    }

    #[tokio::test]
    async fn test_empty_result_still_counts_as_reload_needed() {
        let mut store = DashboardStore::new(MemoryStorage::new());
        let ana = operator("ana@x.com");

        ensure_fresh(&mut store, &StubSource::with_records(0), &ana)
            .await
            .unwrap();

        // Zero beneficiaries means the policy keeps asking for a reload.
        assert!(store.needs_reload(&ana));
    }
}
