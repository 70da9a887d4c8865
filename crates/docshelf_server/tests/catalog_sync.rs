//! End-to-end synchronization tests: a client-side catalog driving the real
//! HTTP surface over a local socket.

mod support;

use axum_test::{TestServer, TestServerConfig, Transport};
use bytes::Bytes;
use docshelf_core::{Catalog, HttpRemoteStore, NewFile, RemoteStore, Store};
use std::sync::Arc;
use support::test_config_for_db_path;
use tempfile::TempDir;

fn spawn_http_server(temp: &TempDir) -> TestServer {
    let config = test_config_for_db_path(&temp.path().join("server.db"));
    let store = docshelf_server::FileStore::open(config.db_path.as_str()).expect("open store");
    let state = docshelf_server::AppState::new(config, store);
    let app = docshelf_server::create_app(state);

    let server_config = TestServerConfig {
        transport: Some(Transport::HttpRandomPort),
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(app, server_config).expect("http server")
}

fn client_catalog(temp: &TempDir, server: &TestServer) -> Catalog {
    let base_url = server.server_address().expect("server address").to_string();
    let remote = Arc::new(HttpRemoteStore::new(base_url));
    let store = Store::open(temp.path().join("client.db").to_str().unwrap()).expect("open store");
    Catalog::new(store, Some(remote), 10_000_000)
}

#[tokio::test(flavor = "multi_thread")]
async fn add_uploads_to_the_server_before_committing() {
    let temp = TempDir::new().unwrap();
    let server = spawn_http_server(&temp);
    let catalog = client_catalog(&temp, &server);

    let outcome = catalog
        .add(vec![NewFile::new(
            "notes.txt",
            "text/plain",
            Bytes::from_static(b"synced bytes"),
        )])
        .await
        .unwrap();

    assert_eq!(outcome.added.len(), 1);
    assert!(outcome.failed.is_empty());

    // The record carries the server-assigned id and the server lists it.
    let docs: Vec<serde_json::Value> = server.get("/api/docs").await.json();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["id"], outcome.added[0].id.as_str());
    assert_eq!(docs[0]["name"], "notes.txt");
}

#[tokio::test(flavor = "multi_thread")]
async fn remote_only_content_resolves_through_the_http_tier() {
    let temp = TempDir::new().unwrap();
    let server = spawn_http_server(&temp);

    // First session uploads, second session starts with metadata only.
    {
        let session_temp = TempDir::new().unwrap();
        let catalog = client_catalog(&session_temp, &server);
        catalog
            .add(vec![NewFile::new(
                "report.pdf",
                "application/pdf",
                Bytes::from_static(b"%PDF-fake"),
            )])
            .await
            .unwrap();
    }

    let session_temp = TempDir::new().unwrap();
    let catalog = client_catalog(&session_temp, &server);
    let docs = catalog.refresh().await.unwrap();
    assert_eq!(docs.len(), 1);

    let content = catalog.resolve_content(&docs[0].id).await.unwrap();
    assert!(!content.is_placeholder());
    assert_eq!(content.bytes().as_ref(), b"%PDF-fake");
}

#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_on_the_server_too() {
    let temp = TempDir::new().unwrap();
    let server = spawn_http_server(&temp);
    let catalog = client_catalog(&temp, &server);

    let outcome = catalog
        .add(vec![NewFile::new(
            "tmp.txt",
            "text/plain",
            Bytes::from_static(b"x"),
        )])
        .await
        .unwrap();
    let id = outcome.added[0].id.clone();

    let removed = catalog.remove(&id).await;
    assert!(removed.removed);
    assert!(removed.warnings.is_empty());

    let docs: Vec<serde_json::Value> = server.get("/api/docs").await.json();
    assert!(docs.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn http_remote_store_reports_not_found_for_unknown_ids() {
    let temp = TempDir::new().unwrap();
    let server = spawn_http_server(&temp);
    let base_url = server.server_address().expect("server address").to_string();
    let remote = HttpRemoteStore::new(base_url);

    let err = remote.download_document("no-such-id", false).await.unwrap_err();
    assert!(matches!(err, docshelf_core::RemoteError::NotFound));
}
