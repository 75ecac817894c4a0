//! Client for the CircleCI project settings endpoints.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::fingerprint::sha1_fingerprint;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::model::{
    CheckoutKey, CheckoutKeyRef, CheckoutKeyType, EnvVarPage, EnvironmentVariable,
    NewCheckoutKey, NewSshKey, ProjectSettings, SshKey, SshKeySelector,
};
use crate::project::ProjectReference;

/// Client for one CircleCI project.
///
/// Every operation performs its requests one after another and fails on the
/// first response outside `[200, 300)`. The `delete_all_*` operations list
/// first and then delete each entry in listing order; a failure part-way
/// leaves the already-deleted entries deleted.
///
/// # Examples
///
/// ```no_run
/// use circleci_core::{Client, ProjectReference};
///
/// #[tokio::main]
/// async fn main() -> Result<(), circleci_core::CoreError> {
///     let project = ProjectReference::with_default_base_url("token", "github/org/repo");
///     let client = Client::new(project)?;
///
///     client.create_env_var("THING_ONE", "value-one").await?;
///     for name in client.list_env_vars().await? {
///         println!("{name}");
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    project: ProjectReference,
    transport: Arc<dyn HttpTransport>,
}

impl Client {
    /// Create a client backed by [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(project: ProjectReference) -> Result<Self> {
        Ok(Self::with_transport(project, Arc::new(ReqwestTransport::new()?)))
    }

    /// Create a client over an existing transport.
    #[must_use]
    pub fn with_transport(project: ProjectReference, transport: Arc<dyn HttpTransport>) -> Self {
        Self { project, transport }
    }

    /// The project this client manages.
    #[must_use]
    pub const fn project(&self) -> &ProjectReference {
        &self.project
    }

    /// Follow the project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn follow_project(&self) -> Result<()> {
        self.send(HttpMethod::Post, self.project.urls().follow(), None)
            .await?;
        Ok(())
    }

    /// Names of the environment variables on the project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn list_env_vars(&self) -> Result<Vec<String>> {
        let response = self
            .send(HttpMethod::Get, self.project.urls().env_vars(), None)
            .await?;
        let page: EnvVarPage = serde_json::from_str(&response.body)?;
        Ok(page.items.into_iter().map(|item| item.name).collect())
    }

    /// Create an environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, value), fields(project = %self.project.project_slug))]
    pub async fn create_env_var(&self, name: &str, value: &str) -> Result<()> {
        let body = json(&EnvironmentVariable::new(name, value))?;
        self.send(HttpMethod::Post, self.project.urls().env_vars(), Some(body))
            .await?;
        Ok(())
    }

    /// Delete an environment variable by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn delete_env_var(&self, name: &str) -> Result<()> {
        self.send(HttpMethod::Delete, self.project.urls().env_var(name), None)
            .await?;
        Ok(())
    }

    /// Delete every environment variable on the project.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn delete_all_env_vars(&self) -> Result<()> {
        for name in self.list_env_vars().await? {
            self.delete_env_var(&name).await?;
        }
        Ok(())
    }

    /// SSH keys configured on the project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn list_ssh_keys(&self) -> Result<Vec<SshKey>> {
        let response = self
            .send(HttpMethod::Get, self.project.urls().settings(), None)
            .await?;
        let settings: ProjectSettings = serde_json::from_str(&response.body)?;
        Ok(settings.ssh_keys)
    }

    /// Add an SSH key, optionally scoped to `hostname`.
    ///
    /// The fingerprint is derived from `private_key` before the request is
    /// built, so malformed keys fail without touching the network.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be parsed or the request fails.
    #[instrument(skip(self, private_key), fields(project = %self.project.project_slug))]
    pub async fn create_ssh_key(&self, private_key: &str, hostname: Option<&str>) -> Result<()> {
        let fingerprint = sha1_fingerprint(private_key)?;
        let body = json(&NewSshKey {
            fingerprint: &fingerprint,
            private_key,
            hostname,
        })?;
        self.send(HttpMethod::Post, self.project.urls().ssh_keys(), Some(body))
            .await?;
        Ok(())
    }

    /// Remove an SSH key by fingerprint, optionally scoped to `hostname`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn delete_ssh_key(&self, fingerprint: &str, hostname: Option<&str>) -> Result<()> {
        let body = json(&SshKeySelector {
            fingerprint,
            hostname,
        })?;
        self.send(HttpMethod::Delete, self.project.urls().ssh_keys(), Some(body))
            .await?;
        Ok(())
    }

    /// Remove every SSH key on the project, each with its own hostname.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn delete_all_ssh_keys(&self) -> Result<()> {
        for key in self.list_ssh_keys().await? {
            self.delete_ssh_key(&key.fingerprint, key.hostname.as_deref())
                .await?;
        }
        Ok(())
    }

    /// Checkout keys on the project.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn list_checkout_keys(&self) -> Result<Vec<CheckoutKey>> {
        let response = self
            .send(HttpMethod::Get, self.project.urls().checkout_keys(), None)
            .await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Ask the provider to generate a checkout key of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn create_checkout_key(&self, key_type: &CheckoutKeyType) -> Result<()> {
        let body = json(&NewCheckoutKey {
            key_type: key_type.as_wire_str(),
        })?;
        self.send(
            HttpMethod::Post,
            self.project.urls().checkout_keys(),
            Some(body),
        )
        .await?;
        Ok(())
    }

    /// Delete a checkout key by fingerprint.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn delete_checkout_key(&self, fingerprint: &str) -> Result<()> {
        self.send(
            HttpMethod::Delete,
            self.project.urls().checkout_key(fingerprint),
            None,
        )
        .await?;
        Ok(())
    }

    /// Delete every checkout key on the project.
    ///
    /// Only the fingerprint of each listed key is read.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    #[instrument(skip(self), fields(project = %self.project.project_slug))]
    pub async fn delete_all_checkout_keys(&self) -> Result<()> {
        let response = self
            .send(HttpMethod::Get, self.project.urls().checkout_keys(), None)
            .await?;
        let keys: Vec<CheckoutKeyRef> = serde_json::from_str(&response.body)?;
        for key in keys {
            self.delete_checkout_key(&key.fingerprint).await?;
        }
        Ok(())
    }

    fn headers(&self) -> Vec<(String, String)> {
        vec![
            ("Circle-Token".to_string(), self.project.api_token.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ]
    }

    async fn send(
        &self,
        method: HttpMethod,
        url: String,
        body: Option<String>,
    ) -> Result<HttpResponse> {
        let request = HttpRequest {
            method,
            url,
            headers: self.headers(),
            body,
        };
        debug!(%method, url = request.url_without_query(), "Sending request");

        let response = self.transport.send(request).await?;
        debug!(status = response.status, "Received response");

        response.error_for_status()
    }
}

fn json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubTransport;

    const ENV_VARS_URL: &str = "https://circleci.com/api/v2/project/github/org/repo/envvar";

    fn client(transport: &Arc<StubTransport>) -> Client {
        Client::with_transport(
            ProjectReference::with_default_base_url("some-token", "github/org/repo"),
            transport.clone(),
        )
    }

    #[tokio::test]
    async fn test_create_env_var_sends_json_body_and_headers() {
        let transport = Arc::new(StubTransport::new());
        client(&transport)
            .create_env_var("THING_ONE", "value-one")
            .await
            .unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, ENV_VARS_URL);
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"name":"THING_ONE","value":"value-one"}"#)
        );
        assert_eq!(request.header("Circle-Token"), Some("some-token"));
        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(request.header("Accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn test_create_env_var_failure() {
        let transport = Arc::new(StubTransport::new());
        transport.stub(HttpMethod::Post, ENV_VARS_URL, 400, "");

        let error = client(&transport)
            .create_env_var("THING_ONE", "value-one")
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            format!("Unsuccessful request: {ENV_VARS_URL} 400 Bad Request")
        );
    }

    #[tokio::test]
    async fn test_list_env_vars_returns_names() {
        let transport = Arc::new(StubTransport::new());
        transport.stub(
            HttpMethod::Get,
            ENV_VARS_URL,
            200,
            r#"{"items":[{"name":"A","value":"xxxx1"},{"name":"B","value":"xxxx2"}],"next_page_token":null}"#,
        );

        let names = client(&transport).list_env_vars().await.unwrap();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_create_checkout_key_maps_type() {
        let transport = Arc::new(StubTransport::new());
        let client = client(&transport);

        client
            .create_checkout_key(&CheckoutKeyType::DeployKey)
            .await
            .unwrap();
        client
            .create_checkout_key(&CheckoutKeyType::GithubUserKey)
            .await
            .unwrap();
        client
            .create_checkout_key(&CheckoutKeyType::from("something-else"))
            .await
            .unwrap();

        let bodies: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| r.body.unwrap_or_default())
            .collect();
        assert_eq!(
            bodies,
            vec![
                r#"{"type":"deploy-key"}"#,
                r#"{"type":"github-user-key"}"#,
                r#"{"type":"something-else"}"#,
            ]
        );
    }

    #[tokio::test]
    async fn test_follow_project() {
        let transport = Arc::new(StubTransport::new());
        client(&transport).follow_project().await.unwrap();

        assert_eq!(
            transport.calls(),
            vec![(
                HttpMethod::Post,
                "https://circleci.com/api/v1.1/project/github/org/repo/follow?circle-token=some-token"
                    .to_string()
            )]
        );
        assert!(transport.requests()[0].body.is_none());
    }

    #[tokio::test]
    async fn test_create_ssh_key_with_invalid_key_makes_no_request() {
        let transport = Arc::new(StubTransport::new());
        let result = client(&transport).create_ssh_key("nonsense", None).await;

        assert!(matches!(result, Err(crate::CoreError::InvalidKey(_))));
        assert!(transport.requests().is_empty());
    }
}
