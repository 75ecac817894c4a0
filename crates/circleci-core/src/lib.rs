//! CircleCI Core - thin client for the CircleCI project settings API.
//!
//! This crate wraps the v1.1 and v2 REST endpoints used to manage a
//! project's environment variables, SSH keys, checkout keys and follow
//! state, and normalizes every non-2xx response into a single error.

#![warn(rust_2024_compatibility, missing_docs, missing_debug_implementations)]

pub mod client;
pub mod error;
pub mod fingerprint;
pub mod http;
pub mod model;
pub mod project;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::Client;
pub use error::{CoreError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use model::{CheckoutKey, CheckoutKeyType, EnvironmentVariable, SshKey};
pub use project::{DEFAULT_BASE_URL, ProjectReference};

/// Re-export common types for convenience.
pub mod prelude {
    pub use crate::{
        CheckoutKeyType, Client, CoreError, HttpTransport, ProjectReference, Result,
    };
}
