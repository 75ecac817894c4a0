//! Task definitions, one module per resource group.
//!
//! Every group has a `Provision` task that creates the configured resources,
//! a `Destroy` task that removes everything of that kind from the project,
//! and an [`Ensure`] task that runs the two in that order.

pub mod checkout_keys;
pub mod ensure;
pub mod environment_variables;
pub mod projects;
pub mod ssh_key;
pub mod ssh_keys;

pub use ensure::{Ensure, Resource};
pub use projects::Follow;

/// Default name of provision tasks.
pub const PROVISION: &str = "provision";
/// Default name of destroy tasks.
pub const DESTROY: &str = "destroy";
/// Default name of ensure tasks.
pub const ENSURE: &str = "ensure";
/// Default name of the follow task.
pub const FOLLOW: &str = "follow";
