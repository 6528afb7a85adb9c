use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://linked-posts.routemisr.com";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

pub const BASE_URL_VAR: &str = "SOCIAL_NET_API_URL";
pub const HOST_VAR: &str = "API_HOST";
pub const SESSION_FILE_VAR: &str = "SOCIAL_NET_SESSION_FILE";
pub const TIMEOUT_VAR: &str = "SOCIAL_NET_TIMEOUT_SECS";
pub const PAGE_SIZE_VAR: &str = "SOCIAL_NET_PAGE_SIZE";

#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// Overrides the `Host` header, for APIs reached through a gateway.
    pub host: Option<String>,
    pub session_file: PathBuf,
    /// Unset means the HTTP client default.
    pub timeout: Option<Duration>,
    pub page_size: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            host: None,
            session_file: default_session_file(std::env::var("HOME").ok()),
            timeout: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = value(BASE_URL_VAR)
            .map(|url| normalize_base_url(&url))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let session_file = value(SESSION_FILE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| default_session_file(lookup("HOME")));

        let timeout = value(TIMEOUT_VAR).and_then(|secs| match secs.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
            _ => {
                log::warn!("config - ignoring invalid {TIMEOUT_VAR}: {secs}");
                None
            }
        });

        let page_size = value(PAGE_SIZE_VAR)
            .and_then(|size| size.trim().parse::<u32>().ok())
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        ClientConfig {
            base_url,
            host: value(HOST_VAR),
            session_file,
            timeout,
            page_size,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = normalize_base_url(base_url);
        self
    }

    pub fn with_session_file(mut self, session_file: impl Into<PathBuf>) -> Self {
        self.session_file = session_file.into();
        self
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn default_session_file(home: Option<String>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".social-net").join("session.json"),
        _ => PathBuf::from(".social-net-session.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = config(&[]);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.host, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.session_file, PathBuf::from(".social-net-session.json"));
    }

    #[test]
    fn reads_environment() {
        let config = config(&[
            (BASE_URL_VAR, "http://localhost:3000/"),
            (HOST_VAR, "api.example.com"),
            (TIMEOUT_VAR, "15"),
            (PAGE_SIZE_VAR, "25"),
            ("HOME", "/home/ann"),
        ]);
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.host.as_deref(), Some("api.example.com"));
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.page_size, 25);
        assert_eq!(
            config.session_file,
            PathBuf::from("/home/ann/.social-net/session.json")
        );
    }

    #[test]
    fn ignores_invalid_numbers() {
        let config = config(&[(TIMEOUT_VAR, "soon"), (PAGE_SIZE_VAR, "0")]);
        assert_eq!(config.timeout, None);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }
}
