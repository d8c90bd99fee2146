use crate::config::constants::defaults;
use std::time::Duration;

/// Configuration for HTTP client optimization
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum number of idle connections per host
    pub pool_max_idle_per_host: usize,
    /// How long to keep idle connections alive
    pub pool_idle_timeout: Duration,
    /// TCP keepalive duration
    pub tcp_keepalive: Duration,
    /// Whole-request timeout, body included. Generation with web search is
    /// slow, so this is generous.
    pub request_timeout: Duration,
    /// Connection timeout
    pub connect_timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 2,
            pool_idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Duration::from_secs(60),
            request_timeout: Duration::from_secs(defaults::REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}
