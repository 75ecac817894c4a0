//! Project reference and URL construction.

use serde::{Deserialize, Serialize};

/// Base URL of the public CircleCI API.
pub const DEFAULT_BASE_URL: &str = "https://circleci.com/api";

/// Returns the default base URL as an owned string, for serde defaults.
#[must_use]
pub fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Identifies a CircleCI project and the credentials used to manage it.
///
/// A reference is immutable once handed to a [`Client`](crate::Client); every
/// URL and authentication header the client produces is derived from it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    /// API root, e.g. `https://circleci.com/api`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Personal API token.
    pub api_token: String,

    /// Project slug, e.g. `github/org/repo`.
    pub project_slug: String,
}

impl ProjectReference {
    /// Create a new project reference.
    ///
    /// # Examples
    ///
    /// ```
    /// use circleci_core::ProjectReference;
    ///
    /// let project = ProjectReference::new(
    ///     "https://circleci.com/api",
    ///     "some-token",
    ///     "github/org/repo",
    /// );
    /// assert_eq!(project.project_slug, "github/org/repo");
    /// ```
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        project_slug: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_token: api_token.into(),
            project_slug: project_slug.into(),
        }
    }

    /// Create a reference against [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn with_default_base_url(
        api_token: impl Into<String>,
        project_slug: impl Into<String>,
    ) -> Self {
        Self::new(DEFAULT_BASE_URL, api_token, project_slug)
    }

    /// URL builder for this project.
    #[must_use]
    pub const fn urls(&self) -> Urls<'_> {
        Urls { project: self }
    }
}

impl std::fmt::Debug for ProjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectReference")
            .field("base_url", &self.base_url)
            .field("api_token", &"<redacted>")
            .field("project_slug", &self.project_slug)
            .finish()
    }
}

/// Endpoint URLs for one project.
///
/// The v1.1 endpoints that authenticate through the query string carry the
/// token as `circle-token`; the others rely on the `Circle-Token` header.
#[derive(Debug, Clone, Copy)]
pub struct Urls<'a> {
    project: &'a ProjectReference,
}

impl Urls<'_> {
    /// `POST` target for following the project.
    #[must_use]
    pub fn follow(&self) -> String {
        format!(
            "{}/v1.1/project/{}/follow?circle-token={}",
            self.project.base_url, self.project.project_slug, self.project.api_token
        )
    }

    /// Environment variable collection.
    #[must_use]
    pub fn env_vars(&self) -> String {
        format!(
            "{}/v2/project/{}/envvar",
            self.project.base_url, self.project.project_slug
        )
    }

    /// A single environment variable.
    #[must_use]
    pub fn env_var(&self, name: &str) -> String {
        format!("{}/{name}", self.env_vars())
    }

    /// Project settings, which include the configured SSH keys.
    #[must_use]
    pub fn settings(&self) -> String {
        format!(
            "{}/v1.1/project/{}/settings?circle-token={}",
            self.project.base_url, self.project.project_slug, self.project.api_token
        )
    }

    /// SSH key collection, used for both creation and deletion.
    #[must_use]
    pub fn ssh_keys(&self) -> String {
        format!(
            "{}/v1.1/project/{}/ssh-key?circle-token={}",
            self.project.base_url, self.project.project_slug, self.project.api_token
        )
    }

    /// Checkout key collection.
    #[must_use]
    pub fn checkout_keys(&self) -> String {
        format!(
            "{}/v1.1/project/{}/checkout-key",
            self.project.base_url, self.project.project_slug
        )
    }

    /// A single checkout key.
    #[must_use]
    pub fn checkout_key(&self, fingerprint: &str) -> String {
        format!("{}/{fingerprint}", self.checkout_keys())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> ProjectReference {
        ProjectReference::with_default_base_url("some-token", "github/org/repo")
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(project().base_url, "https://circleci.com/api");
    }

    #[test]
    fn test_v2_urls() {
        let project = project();
        let urls = project.urls();
        assert_eq!(
            urls.env_vars(),
            "https://circleci.com/api/v2/project/github/org/repo/envvar"
        );
        assert_eq!(
            urls.env_var("THING_ONE"),
            "https://circleci.com/api/v2/project/github/org/repo/envvar/THING_ONE"
        );
    }

    #[test]
    fn test_v1_urls_with_token() {
        let project = project();
        let urls = project.urls();
        assert_eq!(
            urls.follow(),
            "https://circleci.com/api/v1.1/project/github/org/repo/follow?circle-token=some-token"
        );
        assert_eq!(
            urls.settings(),
            "https://circleci.com/api/v1.1/project/github/org/repo/settings?circle-token=some-token"
        );
        assert_eq!(
            urls.ssh_keys(),
            "https://circleci.com/api/v1.1/project/github/org/repo/ssh-key?circle-token=some-token"
        );
    }

    #[test]
    fn test_checkout_key_urls() {
        let project = project();
        let urls = project.urls();
        assert_eq!(
            urls.checkout_keys(),
            "https://circleci.com/api/v1.1/project/github/org/repo/checkout-key"
        );
        assert_eq!(
            urls.checkout_key("aa:bb"),
            "https://circleci.com/api/v1.1/project/github/org/repo/checkout-key/aa:bb"
        );
    }

    #[test]
    fn test_overridden_base_url_prefixes_every_url() {
        let project = ProjectReference::new("http://localhost:8080/api", "t", "gh/o/r");
        let urls = project.urls();
        for url in [
            urls.follow(),
            urls.env_vars(),
            urls.env_var("A"),
            urls.settings(),
            urls.ssh_keys(),
            urls.checkout_keys(),
            urls.checkout_key("f"),
        ] {
            assert!(url.starts_with("http://localhost:8080/api/"), "{url}");
        }
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", project());
        assert!(!debug.contains("some-token"));
        assert!(debug.contains("github/org/repo"));
    }

    #[test]
    fn test_deserialize_defaults_base_url() {
        let project: ProjectReference =
            serde_json::from_str(r#"{"api_token":"t","project_slug":"gh/o/r"}"#).unwrap();
        assert_eq!(project.base_url, DEFAULT_BASE_URL);
    }
}
