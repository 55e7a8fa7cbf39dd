use std::env;
use std::time::Duration;

/// Environment variable holding the conversion service base URL.
pub const GOTENBERG_URL_VAR: &str = "GOTENBERG_URL";

/// Used when `GOTENBERG_URL` is unset or empty.
pub const DEFAULT_GOTENBERG_URL: &str = "https://demo.gotenberg.dev";

/// Per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach the HTML→PDF conversion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl ConverterConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read `GOTENBERG_URL`, falling back to the public demo instance.
    pub fn from_env() -> Self {
        let url = env::var(GOTENBERG_URL_VAR)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GOTENBERG_URL.to_string());
        Self::new(url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the Chromium HTML conversion route.
    pub fn endpoint(&self) -> String {
        format!("{}/forms/chromium/convert/html", self.base_url)
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_GOTENBERG_URL)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = ConverterConfig::new("http://localhost:3000//");
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(
            config.endpoint(),
            "http://localhost:3000/forms/chromium/convert/html"
        );
    }

    #[test]
    fn default_points_at_demo_instance() {
        let config = ConverterConfig::default();
        assert_eq!(config.base_url, DEFAULT_GOTENBERG_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn timeout_override() {
        let config = ConverterConfig::default().with_timeout(Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(2));
    }
}
