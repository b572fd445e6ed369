//! End-to-end message router tests.
//!
//! Each test wires real clients against mock provider hosts and drives
//! the router through the same tagged messages a UI context would send.

use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dropdock_bridge::{Request, Router, RouterHandle};
use dropdock_core::{TokenProvider, UploadFileRef};
use tests::{test_services, FakeLauncher};

struct Harness {
    router: RouterHandle,
    services: std::sync::Arc<dropdock_bridge::BridgeServices>,
    _dir: tempfile::TempDir,
}

async fn harness(dropbox: &MockServer, vc: &MockServer) -> Harness {
    let (services, dir) = test_services(&dropbox.uri(), &vc.uri(), FakeLauncher::cancelled());
    let router = Router::spawn(services.clone());
    Harness {
        router,
        services,
        _dir: dir,
    }
}

fn upload_request(files: &[(&str, &str)], startup_id: &str) -> Request {
    Request::UploadToVc {
        files: files
            .iter()
            .map(|(path, name)| UploadFileRef {
                path: path.to_string(),
                name: name.to_string(),
            })
            .collect(),
        startup_id: startup_id.to_string(),
        document_type: "pitch_deck".to_string(),
    }
}

fn mock_download(server_path: &str, body: &[u8]) -> Mock {
    Mock::given(method("POST"))
        .and(path("/files/download"))
        .and(header(
            "Dropbox-API-Arg",
            format!(r#"{{"path":"{}"}}"#, server_path).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
}

// =============================================================================
// check_auth
// =============================================================================

#[tokio::test]
async fn check_auth_reports_false_without_token() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    let h = harness(&dropbox, &vc).await;

    let response = h.router.send(Request::CheckAuth).await;

    assert!(response.success);
    assert_eq!(response.get("is_authenticated"), Some(&json!(false)));
}

#[tokio::test]
async fn check_auth_probes_live_token() {
    let dropbox = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/get_current_account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"account_id": "dbid:1"})))
        .mount(&dropbox)
        .await;
    let vc = MockServer::start().await;
    let h = harness(&dropbox, &vc).await;

    h.services
        .tokens
        .set(TokenProvider::Dropbox, "abc")
        .await
        .unwrap();

    let response = h.router.send(Request::CheckAuth).await;
    assert_eq!(response.get("is_authenticated"), Some(&json!(true)));
}

// =============================================================================
// authenticate_vc
// =============================================================================

#[tokio::test]
async fn authenticate_vc_persists_extracted_token() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "vc-tok"})))
        .mount(&vc)
        .await;
    let h = harness(&dropbox, &vc).await;

    let response = h
        .router
        .send(Request::AuthenticateVc {
            email: "analyst@fund.vc".to_string(),
            password: "hunter2".to_string(),
        })
        .await;

    assert!(response.success);
    assert_eq!(response.get("token"), Some(&json!("vc-tok")));
    assert_eq!(
        h.services
            .tokens
            .get(TokenProvider::VcPlatform)
            .await
            .unwrap(),
        Some("vc-tok".to_string())
    );
}

#[tokio::test]
async fn authenticate_vc_falls_back_to_placeholder_token() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"session": "opaque"})))
        .mount(&vc)
        .await;
    let h = harness(&dropbox, &vc).await;

    let response = h
        .router
        .send(Request::AuthenticateVc {
            email: "a@b.c".to_string(),
            password: "pw".to_string(),
        })
        .await;

    assert!(response.success);
    assert_eq!(response.get("token"), Some(&json!("demo_token_for_testing")));
    assert_eq!(
        h.services
            .tokens
            .get(TokenProvider::VcPlatform)
            .await
            .unwrap(),
        Some("demo_token_for_testing".to_string())
    );
}

#[tokio::test]
async fn authenticate_vc_surfaces_rejected_credentials() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid credentials"})),
        )
        .mount(&vc)
        .await;
    let h = harness(&dropbox, &vc).await;

    let response = h
        .router
        .send(Request::AuthenticateVc {
            email: "a@b.c".to_string(),
            password: "wrong".to_string(),
        })
        .await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Invalid credentials"));
}

// =============================================================================
// get_startups
// =============================================================================

#[tokio::test]
async fn get_startups_without_token_is_a_failure() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    let h = harness(&dropbox, &vc).await;

    let response = h.router.send(Request::GetStartups).await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("No access token available"));
}

#[tokio::test]
async fn get_startups_returns_live_list() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/startups"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "s1", "name": "Acme Robotics"}]
        })))
        .mount(&vc)
        .await;
    let h = harness(&dropbox, &vc).await;
    h.services
        .tokens
        .set(TokenProvider::VcPlatform, "vc-tok")
        .await
        .unwrap();

    let response = h.router.send(Request::GetStartups).await;

    assert!(response.success);
    assert_eq!(response.get("degraded"), Some(&json!(false)));
    assert_eq!(
        response.get("startups"),
        Some(&json!([{"id": "s1", "name": "Acme Robotics"}]))
    );
}

#[tokio::test]
async fn get_startups_degrades_to_tagged_sample_on_failure() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/startups"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&vc)
        .await;
    let h = harness(&dropbox, &vc).await;
    h.services
        .tokens
        .set(TokenProvider::VcPlatform, "vc-tok")
        .await
        .unwrap();

    let response = h.router.send(Request::GetStartups).await;

    // Degraded, never silent: the sample list is tagged with the reason
    assert!(response.success);
    assert_eq!(response.get("degraded"), Some(&json!(true)));
    let startups = response.get("startups").unwrap().as_array().unwrap();
    assert_eq!(startups.len(), 3);
    assert_eq!(startups[0]["id"], "startup-1");
    assert!(response
        .get("degraded_reason")
        .and_then(|r| r.as_str())
        .unwrap()
        .contains("Server error: 500"));
}

// =============================================================================
// download_file
// =============================================================================

#[tokio::test]
async fn download_file_materializes_bytes_locally() {
    let dropbox = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/get_current_account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"account_id": "dbid:1"})))
        .mount(&dropbox)
        .await;
    mock_download("/deals/deck.pdf", b"pdf bytes")
        .mount(&dropbox)
        .await;
    let vc = MockServer::start().await;
    let h = harness(&dropbox, &vc).await;
    h.services
        .tokens
        .set(TokenProvider::Dropbox, "abc")
        .await
        .unwrap();

    let response = h
        .router
        .send(Request::DownloadFile {
            path: "/deals/deck.pdf".to_string(),
            filename: "deck.pdf".to_string(),
        })
        .await;

    assert!(response.success, "error: {:?}", response.error);
    assert!(response.get("download_id").is_some());

    let saved_path = response.get("path").unwrap().as_str().unwrap();
    assert_eq!(std::fs::read(saved_path).unwrap(), b"pdf bytes");
}

#[tokio::test]
async fn download_file_requires_dropbox_session() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    let h = harness(&dropbox, &vc).await;

    let response = h
        .router
        .send(Request::DownloadFile {
            path: "/deck.pdf".to_string(),
            filename: "deck.pdf".to_string(),
        })
        .await;

    assert!(!response.success);
    assert_eq!(
        response.error.as_deref(),
        Some("Not authenticated with Dropbox")
    );
}

// =============================================================================
// upload_to_vc
// =============================================================================

async fn seed_both_tokens(h: &Harness) {
    h.services
        .tokens
        .set(TokenProvider::Dropbox, "abc")
        .await
        .unwrap();
    h.services
        .tokens
        .set(TokenProvider::VcPlatform, "vc-tok")
        .await
        .unwrap();
}

#[tokio::test]
async fn upload_batch_transfers_each_file_sequentially() {
    let dropbox = MockServer::start().await;
    mock_download("/a.pdf", b"a").mount(&dropbox).await;
    mock_download("/b.pdf", b"b").mount(&dropbox).await;
    let vc = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/upload"))
        .and(header("Authorization", "Bearer vc-tok"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "doc"})))
        .expect(2)
        .mount(&vc)
        .await;
    let h = harness(&dropbox, &vc).await;
    seed_both_tokens(&h).await;

    let response = h
        .router
        .send(upload_request(
            &[("/a.pdf", "a.pdf"), ("/b.pdf", "b.pdf")],
            "64f1c0ffee",
        ))
        .await;

    assert!(response.success, "error: {:?}", response.error);
    assert_eq!(response.get("uploaded"), Some(&json!(2)));
    assert_eq!(
        response.get("message"),
        Some(&json!("2 files uploaded successfully"))
    );
}

#[tokio::test]
async fn upload_batch_aborts_at_first_failing_file() {
    let dropbox = MockServer::start().await;
    mock_download("/a.pdf", b"a").expect(1).mount(&dropbox).await;
    // File 2's download fails
    Mock::given(method("POST"))
        .and(path("/files/download"))
        .and(header("Dropbox-API-Arg", r#"{"path":"/b.pdf"}"#))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"error_summary": "path/not_found/"})),
        )
        .expect(1)
        .mount(&dropbox)
        .await;
    // File 3 must never be requested
    Mock::given(method("POST"))
        .and(path("/files/download"))
        .and(header("Dropbox-API-Arg", r#"{"path":"/c.pdf"}"#))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&dropbox)
        .await;

    let vc = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/upload"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "doc"})))
        .expect(1)
        .mount(&vc)
        .await;

    let h = harness(&dropbox, &vc).await;
    seed_both_tokens(&h).await;

    let response = h
        .router
        .send(upload_request(
            &[("/a.pdf", "a.pdf"), ("/b.pdf", "b.pdf"), ("/c.pdf", "c.pdf")],
            "64f1c0ffee",
        ))
        .await;

    assert!(!response.success);
    let error = response.error.unwrap();
    assert!(
        error.starts_with("Error in file b.pdf:"),
        "unexpected error: {}",
        error
    );
}

#[tokio::test]
async fn upload_to_demo_startup_skips_the_backend() {
    let dropbox = MockServer::start().await;
    mock_download("/a.pdf", b"a").mount(&dropbox).await;
    let vc = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/documents/upload"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&vc)
        .await;
    let h = harness(&dropbox, &vc).await;
    seed_both_tokens(&h).await;

    let response = h
        .router
        .send(upload_request(&[("/a.pdf", "a.pdf")], "startup-2"))
        .await;

    assert!(response.success);
    assert_eq!(response.get("uploaded"), Some(&json!(1)));
}

#[tokio::test]
async fn upload_without_vc_token_is_a_failure() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    let h = harness(&dropbox, &vc).await;

    let response = h
        .router
        .send(upload_request(&[("/a.pdf", "a.pdf")], "64f1c0ffee"))
        .await;

    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("No access token available"));
}

// =============================================================================
// Full bridge startup
// =============================================================================

#[tokio::test]
async fn bridge_start_wires_a_working_router() {
    use dropdock_bridge::{Bridge, BridgeConfig, DownloadsConfig, DropboxConfig, VcConfig};

    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&vc)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let config = BridgeConfig {
        dropbox: DropboxConfig {
            api_base_url: dropbox.uri(),
            content_base_url: dropbox.uri(),
            ..DropboxConfig::default()
        },
        vc: VcConfig { base_url: vc.uri() },
        downloads: DownloadsConfig {
            downloads_dir: dir.path().join("downloads"),
            scratch_dir: dir.path().join("scratch"),
            cleanup_delay: Duration::from_millis(50),
        },
        database_path: dir.path().join("dropdock.db"),
        upload_simulation_delay: Duration::from_millis(10),
    };

    let handle = Bridge::start(config, FakeLauncher::cancelled()).unwrap();

    let response = handle.router.send(Request::CheckAuth).await;
    assert!(response.success);
    assert_eq!(response.get("is_authenticated"), Some(&json!(false)));
}

// =============================================================================
// Concurrency
// =============================================================================

#[tokio::test]
async fn messages_are_handled_concurrently() {
    let dropbox = MockServer::start().await;
    let vc = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/startups"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "s1", "name": "One"}]))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&vc)
        .await;
    let h = harness(&dropbox, &vc).await;
    h.services
        .tokens
        .set(TokenProvider::VcPlatform, "vc-tok")
        .await
        .unwrap();

    let started = Instant::now();
    let (first, second) = tokio::join!(
        h.router.send(Request::GetStartups),
        h.router.send(Request::GetStartups),
    );
    let elapsed = started.elapsed();

    assert!(first.success);
    assert!(second.success);
    // Two 500ms-delayed calls complete together, not back to back
    assert!(
        elapsed < Duration::from_millis(900),
        "messages were serialized: {:?}",
        elapsed
    );
}
