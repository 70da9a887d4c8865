//! Configuration loading from environment variables.

use std::env;
use std::path::PathBuf;

/// Default API port for the docshelf server.
pub const DEFAULT_PORT: u16 = 3001;

/// Default maximum file size accepted for upload (client and server side).
pub const DEFAULT_MAX_FILE_SIZE: usize = 500 * 1024 * 1024;

/// Runtime configuration shared by the catalog, server, and CLI.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    pub max_file_size: usize,
    /// Base URL of the remote blob store. `None` means the catalog runs in
    /// local-only mode (ephemeral + local binary tiers).
    pub remote_url: Option<String>,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    // Prefer explicit HOME if set (Unix, some Windows shells)
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows USERPROFILE (standard)
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    // Fallback to current directory if available
    std::env::current_dir().ok()
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.trim_end_matches('/').to_string())
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("DB_PATH").map(expand_tilde).unwrap_or_else(|_| {
                let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                let cache_dir = home.join(".cache").join("docshelf");
                cache_dir.join("db").to_string_lossy().to_string()
            }),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            max_file_size: env::var("MAX_FILE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_FILE_SIZE),
            remote_url: env::var("REMOTE_URL").ok().and_then(non_empty),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::non_empty;

    #[test]
    fn non_empty_rejects_blank_urls() {
        assert_eq!(non_empty("".to_string()), None);
        assert_eq!(non_empty("   ".to_string()), None);
    }

    #[test]
    fn non_empty_strips_trailing_slash() {
        assert_eq!(
            non_empty("http://localhost:3001/".to_string()),
            Some("http://localhost:3001".to_string())
        );
    }
}
