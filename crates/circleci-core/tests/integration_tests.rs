// Integration tests for CircleCI Core
//
// These tests drive the client end to end against the in-memory transport.

use std::sync::Arc;

use circleci_core::fingerprint::sha1_fingerprint;
use circleci_core::testing::StubTransport;
use circleci_core::{Client, CoreError, HttpMethod, ProjectReference};

const RSA_PEM_KEY: &str = include_str!("fixtures/rsa_pem_key");
const RSA_PEM_FINGERPRINT: &str = "fc:0c:20:60:b2:73:2c:6e:19:f1:bf:7d:14:bf:fe:5a:5c:fa:cd:77";
const ED25519_KEY: &str = include_str!("fixtures/ed25519_openssh_key");
const ED25519_FINGERPRINT: &str = "d4:07:6a:52:cd:e4:b1:a1:70:24:1d:31:7d:95:8a:bd:bb:6a:cc:cf";

const RSA_PKCS8_KEY: &str = include_str!("fixtures/rsa_pkcs8_key");
const RSA_PKCS8_FINGERPRINT: &str = "16:41:8f:1c:a7:fe:ae:7d:0f:b6:26:11:a6:bf:de:2e:c3:be:e9:be";
const EC_P256_KEY: &str = include_str!("fixtures/ec_p256_key");
const EC_P256_PKCS8_KEY: &str = include_str!("fixtures/ec_p256_pkcs8_key");
const EC_P256_FINGERPRINT: &str = "2a:d7:05:6f:0f:00:39:f6:7a:77:6e:8c:53:0b:e7:12:4f:2c:23:f1";

const BASE: &str = "https://circleci.com/api";
const SLUG: &str = "github/org/repo";

fn client_with(transport: &Arc<StubTransport>) -> Client {
    Client::with_transport(
        ProjectReference::new(BASE, "some-token", SLUG),
        transport.clone(),
    )
}

fn env_vars_url() -> String {
    format!("{BASE}/v2/project/{SLUG}/envvar")
}

fn ssh_keys_url() -> String {
    format!("{BASE}/v1.1/project/{SLUG}/ssh-key?circle-token=some-token")
}

fn settings_url() -> String {
    format!("{BASE}/v1.1/project/{SLUG}/settings?circle-token=some-token")
}

fn checkout_keys_url() -> String {
    format!("{BASE}/v1.1/project/{SLUG}/checkout-key")
}

#[test]
fn test_should_integration_fingerprint_pem_rsa_key() {
    let fingerprint = sha1_fingerprint(RSA_PEM_KEY).expect("Failed to fingerprint");
    assert_eq!(fingerprint, RSA_PEM_FINGERPRINT);
}

#[test]
fn test_should_integration_fingerprint_openssh_key() {
    let fingerprint = sha1_fingerprint(ED25519_KEY).expect("Failed to fingerprint");
    assert_eq!(fingerprint, ED25519_FINGERPRINT);
}

#[test]
fn test_should_integration_fingerprint_pkcs8_rsa_key() {
    let fingerprint = sha1_fingerprint(RSA_PKCS8_KEY).expect("Failed to fingerprint");
    assert_eq!(fingerprint, RSA_PKCS8_FINGERPRINT);
}

#[test]
fn test_should_integration_fingerprint_ec_keys() {
    let sec1 = sha1_fingerprint(EC_P256_KEY).expect("Failed to fingerprint SEC1 key");
    let pkcs8 = sha1_fingerprint(EC_P256_PKCS8_KEY).expect("Failed to fingerprint PKCS#8 key");
    assert_eq!(sec1, EC_P256_FINGERPRINT);
    assert_eq!(pkcs8, EC_P256_FINGERPRINT);
}

#[test]
fn test_should_integration_fingerprint_is_deterministic() {
    let first = sha1_fingerprint(RSA_PEM_KEY).expect("Failed to fingerprint");
    let second = sha1_fingerprint(RSA_PEM_KEY).expect("Failed to fingerprint");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_should_integration_delete_all_env_vars_in_listing_order() {
    let transport = Arc::new(StubTransport::new());
    transport.stub(
        HttpMethod::Get,
        env_vars_url(),
        200,
        r#"{"items":[{"name":"ENV_VAR_1","value":"xxxx1"},{"name":"ENV_VAR_2","value":"xxxx2"}]}"#,
    );

    client_with(&transport)
        .delete_all_env_vars()
        .await
        .expect("Failed to delete env vars");

    assert_eq!(
        transport.calls(),
        vec![
            (HttpMethod::Get, env_vars_url()),
            (HttpMethod::Delete, format!("{}/ENV_VAR_1", env_vars_url())),
            (HttpMethod::Delete, format!("{}/ENV_VAR_2", env_vars_url())),
        ]
    );
}

#[tokio::test]
async fn test_should_integration_delete_all_env_vars_stops_at_first_failure() {
    let transport = Arc::new(StubTransport::new());
    transport
        .stub(
            HttpMethod::Get,
            env_vars_url(),
            200,
            r#"{"items":[{"name":"A"},{"name":"B"},{"name":"C"}]}"#,
        )
        .stub(HttpMethod::Delete, format!("{}/B", env_vars_url()), 400, "");

    let error = client_with(&transport)
        .delete_all_env_vars()
        .await
        .expect_err("Expected failure");

    assert_eq!(
        error.to_string(),
        format!("Unsuccessful request: https://circleci.com/api/v2/project/{SLUG}/envvar/B 400 Bad Request")
    );
    assert_eq!(transport.calls().len(), 3);
}

#[tokio::test]
async fn test_should_integration_list_env_vars_failure() {
    let transport = Arc::new(StubTransport::new());
    transport.stub(HttpMethod::Get, env_vars_url(), 401, "");

    let error = client_with(&transport)
        .list_env_vars()
        .await
        .expect_err("Expected failure");

    assert!(matches!(
        error,
        CoreError::UnsuccessfulRequest { status: 401, ref reason, .. } if reason == "Unauthorized"
    ));
}

#[tokio::test]
async fn test_should_integration_create_ssh_key_without_hostname() {
    let transport = Arc::new(StubTransport::new());
    client_with(&transport)
        .create_ssh_key(RSA_PEM_KEY, None)
        .await
        .expect("Failed to create ssh key");

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, HttpMethod::Post);
    assert_eq!(requests[0].url, ssh_keys_url());

    let body: serde_json::Value =
        serde_json::from_str(requests[0].body.as_deref().unwrap_or_default()).expect("json");
    assert_eq!(
        body,
        serde_json::json!({
            "fingerprint": RSA_PEM_FINGERPRINT,
            "private_key": RSA_PEM_KEY,
        })
    );
}

#[tokio::test]
async fn test_should_integration_create_ssh_key_with_hostname() {
    let transport = Arc::new(StubTransport::new());
    client_with(&transport)
        .create_ssh_key(ED25519_KEY, Some("example.com"))
        .await
        .expect("Failed to create ssh key");

    let body: serde_json::Value = serde_json::from_str(
        transport.requests()[0].body.as_deref().unwrap_or_default(),
    )
    .expect("json");
    assert_eq!(
        body,
        serde_json::json!({
            "fingerprint": ED25519_FINGERPRINT,
            "private_key": ED25519_KEY,
            "hostname": "example.com",
        })
    );
}

#[tokio::test]
async fn test_should_integration_delete_all_ssh_keys_passes_hostnames() {
    let transport = Arc::new(StubTransport::new());
    transport.stub(
        HttpMethod::Get,
        settings_url(),
        200,
        r#"{"ssh_keys":[
            {"hostname":"example.com","fingerprint":"aa:bb","private_key":"secret"},
            {"fingerprint":"cc:dd"}
        ]}"#,
    );

    client_with(&transport)
        .delete_all_ssh_keys()
        .await
        .expect("Failed to delete ssh keys");

    let requests = transport.requests();
    assert_eq!(requests.len(), 3);
    assert_eq!(requests[1].method, HttpMethod::Delete);
    assert_eq!(requests[1].url, ssh_keys_url());
    assert_eq!(
        requests[1].body.as_deref(),
        Some(r#"{"fingerprint":"aa:bb","hostname":"example.com"}"#)
    );
    assert_eq!(requests[2].body.as_deref(), Some(r#"{"fingerprint":"cc:dd"}"#));
}

#[tokio::test]
async fn test_should_integration_list_ssh_keys_returns_full_records() {
    let transport = Arc::new(StubTransport::new());
    transport.stub(
        HttpMethod::Get,
        settings_url(),
        200,
        r#"{"ssh_keys":[{"hostname":"example.com","fingerprint":"aa:bb","private_key":"secret"}]}"#,
    );

    let keys = client_with(&transport)
        .list_ssh_keys()
        .await
        .expect("Failed to list ssh keys");

    assert_eq!(keys.len(), 1);
    assert_eq!(keys[0].fingerprint, "aa:bb");
    assert_eq!(keys[0].hostname.as_deref(), Some("example.com"));
    assert_eq!(keys[0].private_key.as_deref(), Some("secret"));
}

#[tokio::test]
async fn test_should_integration_delete_all_checkout_keys() {
    let transport = Arc::new(StubTransport::new());
    transport.stub(
        HttpMethod::Get,
        checkout_keys_url(),
        200,
        r#"[
            {"public_key":"ssh-rsa AAAA1","type":"deploy-key","fingerprint":"11:22","login":null,"preferred":true,"time":"2015-09-21T17:29:21.042Z"},
            {"public_key":"ssh-rsa AAAA2","type":"github-user-key","fingerprint":"33:44","login":"someone","preferred":false,"time":"2016-01-02T03:04:05Z"}
        ]"#,
    );

    client_with(&transport)
        .delete_all_checkout_keys()
        .await
        .expect("Failed to delete checkout keys");

    assert_eq!(
        transport.calls(),
        vec![
            (HttpMethod::Get, checkout_keys_url()),
            (HttpMethod::Delete, format!("{}/11:22", checkout_keys_url())),
            (HttpMethod::Delete, format!("{}/33:44", checkout_keys_url())),
        ]
    );
}

#[tokio::test]
async fn test_should_integration_delete_all_checkout_keys_minimal_records() {
    let transport = Arc::new(StubTransport::new());
    transport.stub(
        HttpMethod::Get,
        checkout_keys_url(),
        200,
        r#"[{"type":"deploy-key","fingerprint":"aa:bb","preferred":true},{"fingerprint":"cc:dd"}]"#,
    );

    client_with(&transport)
        .delete_all_checkout_keys()
        .await
        .expect("Failed to delete checkout keys");

    assert_eq!(
        transport.calls(),
        vec![
            (HttpMethod::Get, checkout_keys_url()),
            (HttpMethod::Delete, format!("{}/aa:bb", checkout_keys_url())),
            (HttpMethod::Delete, format!("{}/cc:dd", checkout_keys_url())),
        ]
    );
}

#[tokio::test]
async fn test_should_integration_uncommon_status_has_no_trailing_space() {
    let transport = Arc::new(StubTransport::new());
    transport.stub(HttpMethod::Get, checkout_keys_url(), 599, "");

    let error = client_with(&transport)
        .list_checkout_keys()
        .await
        .expect_err("Expected failure");

    assert_eq!(
        error.to_string(),
        format!("Unsuccessful request: https://circleci.com/api/v1.1/project/{SLUG}/checkout-key 599")
    );
}

#[tokio::test]
async fn test_should_integration_delete_checkout_key_failure() {
    let transport = Arc::new(StubTransport::new());
    transport.stub(
        HttpMethod::Delete,
        format!("{}/11:22", checkout_keys_url()),
        404,
        "",
    );

    let error = client_with(&transport)
        .delete_checkout_key("11:22")
        .await
        .expect_err("Expected failure");

    assert_eq!(
        error.to_string(),
        format!("Unsuccessful request: https://circleci.com/api/v1.1/project/{SLUG}/checkout-key/11:22 404 Not Found")
    );
}

#[tokio::test]
async fn test_should_integration_overridden_base_url() {
    let transport = Arc::new(StubTransport::new());
    let client = Client::with_transport(
        ProjectReference::new("http://localhost:9000/api", "t", SLUG),
        transport.clone(),
    );

    client.follow_project().await.expect("Failed to follow");
    client.create_env_var("A", "1").await.expect("Failed to create");

    for (_, url) in transport.calls() {
        assert!(url.starts_with("http://localhost:9000/api/"), "{url}");
    }
}
