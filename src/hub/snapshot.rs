//! Dashboard snapshot providers

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::Result;
use crate::models::DashboardSummary;

/// Produces the current dashboard aggregate on demand
///
/// Called synchronously on a connection's handling path, so implementations
/// should be cheap.
pub trait SnapshotProvider: Send + Sync {
    fn dashboard_summary(&self) -> Result<DashboardSummary>;
}

impl<F> SnapshotProvider for F
where
    F: Fn() -> Result<DashboardSummary> + Send + Sync,
{
    fn dashboard_summary(&self) -> Result<DashboardSummary> {
        self()
    }
}

/// Holds the latest published dashboard aggregate
///
/// Readers never block writers: each `replace` swaps in a new `Arc`.
#[derive(Debug)]
pub struct DashboardStore {
    current: ArcSwap<DashboardSummary>,
}

impl DashboardStore {
    pub fn new(initial: DashboardSummary) -> Self {
        Self {
            current: ArcSwap::from_pointee(initial),
        }
    }

    pub fn current(&self) -> Arc<DashboardSummary> {
        self.current.load_full()
    }

    pub fn replace(&self, summary: DashboardSummary) {
        self.current.store(Arc::new(summary));
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new(DashboardSummary::default())
    }
}

impl SnapshotProvider for DashboardStore {
    fn dashboard_summary(&self) -> Result<DashboardSummary> {
        Ok(self.current().as_ref().clone())
    }
}
