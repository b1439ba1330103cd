use craas_client::v1::{self, RegistryStatus, StartGcOpts, Ttl};
use craas_client::{CraasError, RequestContext};
use reqwest::StatusCode;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const REGISTRY_ID: &str = "888af692-c646-4b76-a234-81ca9b5bcafe";

fn client_for(server: &MockServer) -> v1::Client {
    v1::Client::new("token", format!("{}/api/v1", server.uri())).unwrap()
}

fn json(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("Content-Type", "application/json")
        .set_body_string(body)
}

#[tokio::test]
async fn garbage_size_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/registries/{}/garbage-collection/size",
            REGISTRY_ID
        )))
        .and(header("X-Auth-Token", "token"))
        .respond_with(json(
            200,
            r#"{"sizeNonReferenced":56723502,"sizeUntagged":30915818,"sizeSummary":87639320}"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (size, outcome) = client
        .gc()
        .garbage_size(&RequestContext::background(), REGISTRY_ID)
        .await
        .unwrap();

    assert_eq!(outcome.status(), StatusCode::OK);
    assert_eq!(size.size_non_referenced, 56723502);
    assert_eq!(size.size_untagged, 30915818);
    assert_eq!(size.size_summary, 87639320);
}

#[tokio::test]
async fn gc_start_without_options_sends_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/api/v1/registries/{}/garbage-collection",
            REGISTRY_ID
        )))
        .and(|req: &Request| {
            req.url.query().is_none() && !req.headers.contains_key("content-type")
        })
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client
        .gc()
        .start(&RequestContext::background(), REGISTRY_ID, None)
        .await
        .unwrap();

    assert_eq!(outcome.status(), StatusCode::CREATED);
    assert!(outcome.err().is_none());
}

#[tokio::test]
async fn gc_start_can_delete_untagged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/api/v1/registries/{}/garbage-collection",
            REGISTRY_ID
        )))
        .and(query_param("delete-untagged", "true"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = StartGcOpts {
        delete_untagged: true,
    };
    client
        .gc()
        .start(&RequestContext::background(), REGISTRY_ID, Some(opts))
        .await
        .unwrap();
}

#[tokio::test]
async fn create_registry_posts_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/registries"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({"name": "test-registry"})))
        .respond_with(json(
            201,
            r#"{
                "id": "888af692-c646-4b76-a234-81ca9b5bcafe",
                "name": "test-registry",
                "createdAt": "2022-10-25T10:25:22.556Z",
                "status": "CREATING",
                "size": 0,
                "sizeLimit": 21474836480,
                "used": 0
            }"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (registry, outcome) = client
        .registries()
        .create(&RequestContext::background(), "test-registry")
        .await
        .unwrap();

    assert_eq!(outcome.status(), StatusCode::CREATED);
    assert_eq!(registry.id, REGISTRY_ID);
    assert_eq!(registry.status, RegistryStatus::Creating);
}

#[tokio::test]
async fn missing_registry_is_not_found_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/registries/{}", REGISTRY_ID)))
        .respond_with(json(
            404,
            r#"{"error":{"id":"a6d4a4a6-0b2c-4d2a-9c3b-5a5a5a5a5a5a","message":"not found"}}"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .registries()
        .get(&RequestContext::background(), REGISTRY_ID)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    let outcome = err.outcome().unwrap();
    assert_eq!(outcome.status(), StatusCode::NOT_FOUND);
    assert_eq!(outcome.not_found().unwrap().error.message, "not found");
}

#[tokio::test]
async fn gateway_error_keeps_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/registries/{}", REGISTRY_ID)))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .registries()
        .delete(&RequestContext::background(), REGISTRY_ID)
        .await
        .unwrap_err();

    assert!(!err.is_not_found());
    assert_eq!(err.to_string(), "got the 502 status code from the server");
}

#[tokio::test]
async fn empty_registry_id_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .registries()
        .get(&RequestContext::background(), "")
        .await;

    assert!(matches!(result, Err(CraasError::EmptyParameter(_))));
}

#[tokio::test]
async fn repository_tags_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/registries/{}/repositories/nginx/tags",
            REGISTRY_ID
        )))
        .respond_with(json(200, r#"["latest","1.25"]"#))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (tags, _) = client
        .repositories()
        .list_tags(&RequestContext::background(), REGISTRY_ID, "nginx")
        .await
        .unwrap();

    assert_eq!(tags, vec!["latest".to_string(), "1.25".to_string()]);
}

#[tokio::test]
async fn repository_images_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/registries/{}/repositories/nginx/images",
            REGISTRY_ID
        )))
        .respond_with(json(
            200,
            r#"[{
                "digest": "sha256:0b8c6b8f0bbf5d6bd4ac2ce8d6b23b1b6c1b4c0c6b7f3c8e1f5b6a9a5c7e8d9f",
                "createdAt": "2022-10-25T10:25:22Z",
                "tags": ["latest"],
                "size": 1024
            }]"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (images, _) = client
        .repositories()
        .list_images(&RequestContext::background(), REGISTRY_ID, "nginx")
        .await
        .unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].tags, vec!["latest".to_string()]);
    assert!(images[0].layers.is_empty());
}

#[tokio::test]
async fn image_manifest_is_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!(
            "/api/v1/registries/{}/repositories/nginx/latest",
            REGISTRY_ID
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client
        .repositories()
        .delete_image_manifest(&RequestContext::background(), REGISTRY_ID, "nginx", "latest")
        .await
        .unwrap();

    assert_eq!(outcome.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn token_is_created_with_ttl() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/token"))
        .and(query_param("ttl", "1y"))
        .respond_with(json(
            201,
            r#"{"token":"CRgAAAAA","expireAt":1698180533,"expireIn":31536000}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let opts = v1::CreateTokenOpts { ttl: Ttl::OneYear };
    let (token, _) = client
        .tokens()
        .create(&RequestContext::background(), Some(opts))
        .await
        .unwrap();

    assert_eq!(token.token, "CRgAAAAA");
    assert_eq!(token.expires_in, 31536000);
}

#[tokio::test]
async fn token_defaults_to_twelve_hours() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/token"))
        .and(query_param("ttl", "12h"))
        .respond_with(json(
            201,
            r#"{"token":"CRgAAAAA","expireAt":1666644533,"expireIn":43200}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .tokens()
        .create(&RequestContext::background(), None)
        .await
        .unwrap();
}

#[tokio::test]
async fn token_refresh_fills_in_token_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/token/CRgAAAAA/refresh"))
        .respond_with(json(201, r#"{"expireAt":1666644533,"expireIn":43200}"#))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (token, _) = client
        .tokens()
        .refresh(&RequestContext::background(), "CRgAAAAA")
        .await
        .unwrap();

    assert_eq!(token.token, "CRgAAAAA");
    assert_eq!(token.expires_at, 1666644533);
}

const REGISTRY_BODY: &str = r#"{
    "id": "888af692-c646-4b76-a234-81ca9b5bcafe",
    "name": "test-registry",
    "createdAt": "2022-10-25T10:25:22.556Z",
    "status": "ACTIVE",
    "size": 500000000,
    "sizeLimit": 21474836480,
    "used": 2.33
}"#;

const REPOSITORY_BODY: &str =
    r#"{"name": "nginx", "updatedAt": "2022-10-25T10:25:22Z", "size": 10485760}"#;

#[tokio::test]
async fn registries_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/registries"))
        .respond_with(json(200, &format!("[{}]", REGISTRY_BODY)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (registries, outcome) = client
        .registries()
        .list(&RequestContext::background())
        .await
        .unwrap();

    assert_eq!(outcome.status(), StatusCode::OK);
    assert_eq!(registries.len(), 1);
    assert_eq!(registries[0].name, "test-registry");
    assert_eq!(registries[0].status, RegistryStatus::Active);
}

#[tokio::test]
async fn registry_is_fetched_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/registries/{}", REGISTRY_ID)))
        .respond_with(json(200, REGISTRY_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (registry, _) = client
        .registries()
        .get(&RequestContext::background(), REGISTRY_ID)
        .await
        .unwrap();

    assert_eq!(registry.id, REGISTRY_ID);
    assert_eq!(registry.size_limit, 21474836480);
}

#[tokio::test]
async fn registry_is_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("/api/v1/registries/{}", REGISTRY_ID)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client
        .registries()
        .delete(&RequestContext::background(), REGISTRY_ID)
        .await
        .unwrap();

    assert_eq!(outcome.status(), StatusCode::NO_CONTENT);
    assert!(outcome.err().is_none());
}

#[tokio::test]
async fn repositories_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/registries/{}/repositories", REGISTRY_ID)))
        .respond_with(json(200, &format!("[{}]", REPOSITORY_BODY)))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (repositories, _) = client
        .repositories()
        .list_repositories(&RequestContext::background(), REGISTRY_ID)
        .await
        .unwrap();

    assert_eq!(repositories.len(), 1);
    assert_eq!(repositories[0].name, "nginx");
    assert_eq!(repositories[0].size, 10485760);
}

#[tokio::test]
async fn repository_is_fetched_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/registries/{}/repositories/nginx",
            REGISTRY_ID
        )))
        .respond_with(json(200, REPOSITORY_BODY))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (repository, _) = client
        .repositories()
        .get_repository(&RequestContext::background(), REGISTRY_ID, "nginx")
        .await
        .unwrap();

    assert_eq!(repository.name, "nginx");
}

#[tokio::test]
async fn repository_is_deleted() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!(
            "/api/v1/registries/{}/repositories/nginx",
            REGISTRY_ID
        )))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client
        .repositories()
        .delete_repository(&RequestContext::background(), REGISTRY_ID, "nginx")
        .await
        .unwrap();

    assert_eq!(outcome.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn image_layers_are_listed_by_digest() {
    let digest = "sha256:0b8c6b8f0bbf5d6bd4ac2ce8d6b23b1b6c1b4c0c6b7f3c8e1f5b6a9a5c7e8d9f";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/api/v1/registries/{}/repositories/nginx/{}",
            REGISTRY_ID, digest
        )))
        .respond_with(json(
            200,
            r#"[{"digest": "sha256:aaaa", "size": 2048}, {"digest": "sha256:bbbb", "size": 512}]"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (layers, _) = client
        .repositories()
        .list_image_layers(&RequestContext::background(), REGISTRY_ID, "nginx", digest)
        .await
        .unwrap();

    assert_eq!(layers.len(), 2);
    assert_eq!(layers[0].digest, "sha256:aaaa");
    assert_eq!(layers[1].size, 512);
}

#[tokio::test]
async fn token_get_fills_in_token_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/token/CRgAAAAA"))
        .respond_with(json(200, r#"{"expireAt":1666644533,"expireIn":43200}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let (token, _) = client
        .tokens()
        .get(&RequestContext::background(), "CRgAAAAA")
        .await
        .unwrap();

    assert_eq!(token.token, "CRgAAAAA");
    assert_eq!(token.expires_in, 43200);
}

#[tokio::test]
async fn token_is_revoked() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/token/CRgAAAAA"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let outcome = client
        .tokens()
        .revoke(&RequestContext::background(), "CRgAAAAA")
        .await
        .unwrap();

    assert_eq!(outcome.status(), StatusCode::NO_CONTENT);
}
