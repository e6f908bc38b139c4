//! Usage fetching, plan resolution, and the status-bar relay.

pub mod aggregate;
pub mod cli_runner;
pub mod github;
pub mod logging;
pub mod models;
pub mod plans;
pub mod statusbar;

pub use aggregate::{Aggregate, aggregate};
pub use github::{GhClient, UsageSource};
pub use models::{BillingPeriod, UsageRecord, UsageSnapshot};
pub use plans::{LimitSource, Plan, ResolvedLimit, resolve_limit, resolve_plan};
