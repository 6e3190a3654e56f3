/// Backend used when `AQUATRACK_API_URL` is not set at build time
pub const DEFAULT_API_URL: &str = "https://stackninjas-backend.onrender.com";

/// Build-time settings of the frontend
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    /// How long a toast stays on screen
    pub toast_timeout_ms: u32,
    /// Local storage key holding the persisted session
    pub session_key: &'static str,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::with_api_url(option_env!("AQUATRACK_API_URL"))
    }

    fn with_api_url(api_url: Option<&str>) -> Self {
        let api_base_url = api_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_string();

        Self {
            api_base_url,
            toast_timeout_ms: 4000,
            session_key: "aquatrack.session",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_api_url() {
        assert_eq!(AppConfig::with_api_url(None).api_base_url, DEFAULT_API_URL);
        assert_eq!(AppConfig::with_api_url(Some("  ")).api_base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let config = AppConfig::with_api_url(Some("http://localhost:3000/"));
        assert_eq!(config.api_base_url, "http://localhost:3000");
    }
}
