use clap::Parser;
use std::fmt;
use std::time::Duration;

/// balldontlie standings proxy
#[derive(Parser, Debug, Clone)]
#[command(name = "standings-proxy", version, about)]
pub struct Config {
    /// HTTP listen address
    #[arg(long, env = "LISTEN_ADDR", default_value = "127.0.0.1:5001")]
    pub listen_addr: String,

    /// balldontlie API key
    #[arg(long, env = "BALLDONTLIE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// balldontlie API base URL
    #[arg(
        long,
        env = "BALLDONTLIE_API_URL",
        default_value = "https://api.balldontlie.io"
    )]
    pub api_url: String,

    /// Timeout applied to every outbound request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        let url = url::Url::parse(&self.api_url)
            .map_err(|e| anyhow::anyhow!("api_url '{}' is not a valid URL: {}", self.api_url, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            anyhow::bail!("api_url must use http or https");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be positive");
        }
        Ok(())
    }

    /// The configured credential, if any. An empty value counts as absent.
    pub fn credential(&self) -> Option<ApiKey> {
        self.api_key.as_deref().and_then(ApiKey::new)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

/// Static provider credential. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ApiKey(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// First `n` characters, or the whole key if it is shorter.
    pub fn prefix(&self, n: usize) -> String {
        self.0.chars().take(n).collect()
    }

    /// Last `n` characters, or the whole key if it is shorter.
    pub fn suffix(&self, n: usize) -> String {
        let skip = self.len().saturating_sub(n);
        self.0.chars().skip(skip).collect()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(<{} chars>)", self.len())
    }
}
