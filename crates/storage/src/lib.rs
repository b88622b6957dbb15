//! Config store abstraction and the tiers behind it.
//!
//! A lookup walks the branch checkout, then the run workspace, then the
//! instance-wide managed files, and returns the first snippet found.

#![warn(missing_docs)]

pub mod trait_;
pub mod checkout;
pub mod workspace;
pub mod global;
pub mod tiered;

pub use trait_::{ConfigStore, StoreError, Result, validate_id};
pub use checkout::CheckoutTier;
pub use workspace::WorkspaceTier;
pub use global::{GlobalConfigFiles, ManagedConfig};
pub use tiered::TieredConfigStore;
