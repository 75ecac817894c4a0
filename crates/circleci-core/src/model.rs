//! Resource types exchanged with the CircleCI API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project environment variable.
///
/// The provider never returns values when listing, so listings only yield
/// names; this type is what gets sent on creation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    /// Variable name.
    pub name: String,

    /// Variable value.
    pub value: String,
}

impl EnvironmentVariable {
    /// Create a new environment variable.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Debug for EnvironmentVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentVariable")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .finish()
    }
}

/// An SSH key registered on a project, as listed in the project settings.
///
/// Listings may carry the private key material; it is never printed by the
/// `Debug` implementation.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    /// SHA-1 fingerprint of the public half, colon-separated hex.
    pub fingerprint: String,

    /// Host the key is scoped to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Private key material, when the provider includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl fmt::Debug for SshKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshKey")
            .field("fingerprint", &self.fingerprint)
            .field("hostname", &self.hostname)
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Kind of checkout key.
///
/// The two known kinds map to the provider's wire strings; anything else is
/// passed through verbatim so newer provider kinds keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CheckoutKeyType {
    /// A deploy key generated for the project.
    DeployKey,
    /// The key of a GitHub user.
    GithubUserKey,
    /// Any other kind, sent as-is.
    Other(String),
}

impl CheckoutKeyType {
    /// The string sent to and received from the provider.
    #[must_use]
    pub fn as_wire_str(&self) -> &str {
        match self {
            Self::DeployKey => "deploy-key",
            Self::GithubUserKey => "github-user-key",
            Self::Other(other) => other,
        }
    }
}

impl From<&str> for CheckoutKeyType {
    fn from(value: &str) -> Self {
        match value {
            "deploy_key" | "deploy-key" => Self::DeployKey,
            "github_user_key" | "github-user-key" => Self::GithubUserKey,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for CheckoutKeyType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<CheckoutKeyType> for String {
    fn from(value: CheckoutKeyType) -> Self {
        match value {
            CheckoutKeyType::Other(other) => other,
            known => known.as_wire_str().to_string(),
        }
    }
}

impl fmt::Display for CheckoutKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// A checkout key, as returned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutKey {
    /// Kind of key.
    #[serde(rename = "type")]
    pub key_type: CheckoutKeyType,

    /// Fingerprint, used to address the key on deletion.
    pub fingerprint: String,

    /// Public half of the key.
    #[serde(default)]
    pub public_key: Option<String>,

    /// GitHub login, for user keys.
    #[serde(default)]
    pub login: Option<String>,

    /// Whether the provider prefers this key for checkouts.
    #[serde(default)]
    pub preferred: bool,

    /// Creation time.
    #[serde(default)]
    pub time: Option<DateTime<Utc>>,
}

/// The part of a checkout key listing entry needed to delete it.
#[derive(Debug, Deserialize)]
pub(crate) struct CheckoutKeyRef {
    pub fingerprint: String,
}

/// Page of the v2 environment variable listing.
#[derive(Debug, Deserialize)]
pub(crate) struct EnvVarPage {
    #[serde(default)]
    pub items: Vec<EnvVarItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnvVarItem {
    pub name: String,
}

/// The part of the v1.1 project settings this crate reads.
#[derive(Debug, Deserialize)]
pub(crate) struct ProjectSettings {
    #[serde(default)]
    pub ssh_keys: Vec<SshKey>,
}

#[derive(Serialize)]
pub(crate) struct NewSshKey<'a> {
    pub fingerprint: &'a str,
    pub private_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct SshKeySelector<'a> {
    pub fingerprint: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct NewCheckoutKey<'a> {
    #[serde(rename = "type")]
    pub key_type: &'a str,
}
