use std::{path::PathBuf, time::Duration};

use newreleases::{
    api::{
        ApiError, AuthKeysGetter, Client, ClientOptions, IntegrationsService, ProjectsService,
        ProvidersService, ReleasesService, TagsService, WebhookKind,
    },
    config::{Config, DEFAULT_TIMEOUT},
    types::{ProjectListOptions, ProjectListOrder, ProjectOptions, ProjectRef},
};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{basic_auth, body_json, header, method, path, query_param},
};

const AUTH_KEY: &str = "test-auth-key";

// Helper function to create a client pointing at the mock server
fn client(server: &MockServer) -> Client {
    Client::new(
        Some(AUTH_KEY.to_string()),
        ClientOptions {
            base_url: Some(server.uri()),
            timeout: Duration::from_secs(5),
        },
    )
    .unwrap()
}

#[tokio::test]
async fn test_get_auth_keys_uses_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/keys"))
        .and(basic_auth("user@example.com", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "keys": [
                {"name": "laptop", "secret": "s1", "authorized_networks": ["10.0.0.0/8"]},
                {"name": "ci", "secret": "s2"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let anonymous = Client::new(
        None,
        ClientOptions {
            base_url: Some(server.uri()),
            timeout: Duration::from_secs(5),
        },
    )
    .unwrap();
    let keys = anonymous
        .get_auth_keys("user@example.com", "secret")
        .await
        .unwrap();

    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0].name, "laptop");
    assert_eq!(keys[0].authorized_networks, vec!["10.0.0.0/8".to_string()]);
    // Missing networks default to an empty list
    assert!(keys[1].authorized_networks.is_empty());
}

#[tokio::test]
async fn test_unauthorized_is_distinct_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/auth/keys"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "unauthorized"})))
        .mount(&server)
        .await;

    let result = client(&server).get_auth_keys("user@example.com", "wrong").await;

    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_not_found_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/github/missing/project"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let project = ProjectRef::Name {
        provider: "github".to_string(),
        name: "missing/project".to_string(),
    };
    let result = client(&server).get_project(&project).await;

    assert!(matches!(result, Err(ApiError::NotFound)));
}

#[tokio::test]
async fn test_rate_limit_reads_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tags"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
        .mount(&server)
        .await;

    let result = client(&server).list_tags().await;

    match result {
        Err(ApiError::RateLimited { retry_after }) => {
            assert_eq!(retry_after, Some(Duration::from_secs(7)));
        }
        other => panic!("expected rate limit error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_other_status_uses_message_from_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/providers"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let result = client(&server).list_providers().await;

    match result {
        Err(ApiError::Status { code, message }) => {
            assert_eq!(code, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_list_projects_sends_key_and_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects"))
        .and(header("X-Key", AUTH_KEY))
        .and(query_param("page", "2"))
        .and(query_param("provider", "github"))
        .and(query_param("order", "name"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "projects": [
                {
                    "id": "p1",
                    "name": "golang/go",
                    "provider": "github",
                    "email_notification": "daily",
                    "slack_channels": ["s1"],
                    "exclude_version_regexp": [{"value": "^v0", "inverse": false}]
                }
            ],
            "total_pages": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ProjectListOptions {
        page: 2,
        provider: Some("github".to_string()),
        order: Some(ProjectListOrder::Name),
    };
    let (projects, last_page) = client(&server).list_projects(&options).await.unwrap();

    assert_eq!(last_page, 3);
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].slack_ids, vec!["s1".to_string()]);
    assert_eq!(projects[0].excluded_regexps(), vec!["^v0".to_string()]);
}

#[tokio::test]
async fn test_update_project_sends_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/p1"))
        .and(body_json(json!({"slack_channels": [], "note": "watch"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "name": "golang/go",
            "provider": "github",
            "note": "watch"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ProjectOptions {
        slack_ids: Some(Vec::new()),
        note: Some("watch".to_string()),
        ..Default::default()
    };
    let project = client(&server)
        .update_project(&ProjectRef::Id("p1".to_string()), &options)
        .await
        .unwrap();

    assert_eq!(project.note, "watch");
}

#[tokio::test]
async fn test_release_note_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/p1/releases/v1.2.0/note"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "Release 1.2.0",
            "message": "<p>Fixes</p>",
            "url": "https://example.com/v1.2.0"
        })))
        .mount(&server)
        .await;

    let note = client(&server)
        .get_release_note(&ProjectRef::Id("p1".to_string()), "v1.2.0")
        .await
        .unwrap();

    assert_eq!(note.title, "Release 1.2.0");
}

#[tokio::test]
async fn test_webhook_kinds_use_their_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/microsoft-teams-webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "webhooks": [{"id": "w1", "name": "Team"}]
        })))
        .mount(&server)
        .await;

    let webhooks = client(&server)
        .list_webhooks(WebhookKind::MicrosoftTeams)
        .await
        .unwrap();

    assert_eq!(webhooks.len(), 1);
    assert_eq!(webhooks[0].name, "Team");
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tags"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"tags": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = Client::new(
        Some(AUTH_KEY.to_string()),
        ClientOptions {
            base_url: Some(server.uri()),
            timeout: Duration::from_millis(100),
        },
    )
    .unwrap();

    let result = client.list_tags().await;

    assert!(matches!(result, Err(ApiError::Timeout)));
}

#[test]
fn test_base_url_gets_trailing_slash() {
    let client = Client::new(
        None,
        ClientOptions {
            base_url: Some("http://localhost:8080/api".to_string()),
            timeout: DEFAULT_TIMEOUT,
        },
    )
    .unwrap();

    assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
}

#[test]
fn test_invalid_endpoint_is_rejected() {
    let result = Client::new(
        None,
        ClientOptions {
            base_url: Some("not a url".to_string()),
            timeout: DEFAULT_TIMEOUT,
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidEndpoint(_))));
}

#[test]
fn test_client_from_config_requires_auth_key() {
    let config = Config {
        path: PathBuf::from("config.yaml"),
        auth_key: None,
        timeout: DEFAULT_TIMEOUT,
        api_endpoint: None,
    };

    let err = Client::from_config(&config).unwrap_err();

    assert_eq!(err.to_string(), "auth key not configured");
}
