//! Shared integration-test server bootstrap helpers.

#![allow(dead_code)]

use axum_test::TestServer;
use docshelf_server::{create_app, AppState, Config, FileStore};
use std::path::Path;
use tempfile::TempDir;

pub fn test_config_for_db_path(db_path: &Path) -> Config {
    Config {
        port: 0,
        db_path: db_path.to_str().expect("db path").to_string(),
        max_file_size: 10_000_000,
        remote_url: None,
    }
}

pub fn test_server_for_config(config: Config) -> TestServer {
    let store = FileStore::open(config.db_path.as_str()).expect("open store");
    let state = AppState::new(config, store);
    let app = create_app(state);
    TestServer::new(app).expect("server")
}

pub fn setup_test_server() -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("test.db");
    let config = test_config_for_db_path(&db_path);
    let server = test_server_for_config(config);
    (server, temp_dir)
}
