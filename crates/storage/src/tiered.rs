//! Ordered fallback across stores.

use std::sync::Arc;

use mbdefaults_core::{BranchRun, NamedConfig};
use tracing::{info, instrument};

use super::{ConfigStore, CheckoutTier, GlobalConfigFiles, Result, WorkspaceTier};

/// Consults each tier in order and returns the first hit.
///
/// An error from any tier ends the lookup; later tiers are not tried.
#[derive(Clone, Default)]
pub struct TieredConfigStore {
    tiers: Vec<Arc<dyn ConfigStore>>,
}

impl TieredConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Checkout, then workspace, then the given managed files.
    pub fn standard(global: GlobalConfigFiles) -> Self {
        Self::new()
            .with_tier(Arc::new(CheckoutTier::new()))
            .with_tier(Arc::new(WorkspaceTier::new()))
            .with_tier(Arc::new(global))
    }

    /// Append a tier with lower priority than the existing ones.
    pub fn with_tier(mut self, tier: Arc<dyn ConfigStore>) -> Self {
        self.tiers.push(tier);
        self
    }

    /// Number of tiers.
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// True when no tiers are configured.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

impl ConfigStore for TieredConfigStore {
    #[instrument(skip(self, run), fields(job = %run.job, branch = %run.branch))]
    fn lookup(&self, run: &BranchRun, id: &str) -> Result<Option<NamedConfig>> {
        for tier in &self.tiers {
            if let Some(config) = tier.lookup(run, id)? {
                info!(origin = %config.origin, "Resolved {}", id);
                return Ok(Some(config));
            }
        }
        Ok(None)
    }
}
