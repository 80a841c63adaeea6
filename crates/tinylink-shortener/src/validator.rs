use async_trait::async_trait;
use std::time::Duration;
use tokio::net::lookup_host;
use tokio::time::timeout;
use tracing::debug;
use url::Url;

/// Default bound on a single DNS lookup.
pub const DEFAULT_DNS_TIMEOUT: Duration = Duration::from_secs(5);

/// Checks whether a candidate string may be stored as a shortened URL.
#[async_trait]
pub trait UrlValidator: Send + Sync + 'static {
    /// Returns `true` when the candidate is acceptable. Implementations
    /// may suspend (e.g. on DNS lookups) but must not hold shared locks
    /// across that suspension.
    async fn validate(&self, candidate: &str) -> bool;
}

/// The default validation policy: the candidate must parse as an
/// absolute `http` or `https` URL and its host must resolve via DNS.
///
/// Malformed input and unresolvable hosts are deliberately
/// indistinguishable to callers; both simply fail validation.
#[derive(Debug, Clone)]
pub struct DnsValidator {
    dns_timeout: Duration,
}

impl DnsValidator {
    pub fn new() -> Self {
        Self {
            dns_timeout: DEFAULT_DNS_TIMEOUT,
        }
    }

    /// Overrides the bound on the DNS lookup. A lookup that exceeds the
    /// bound counts as a validation failure.
    pub fn with_timeout(dns_timeout: Duration) -> Self {
        Self { dns_timeout }
    }

    fn parse(candidate: &str) -> Option<Url> {
        let parsed = Url::parse(candidate).ok()?;
        // The parser lowercases schemes, so "HTTP://" passes too.
        matches!(parsed.scheme(), "http" | "https").then_some(parsed)
    }

    async fn host_resolves(&self, host: &str) -> bool {
        // Port 0 is a placeholder; only name resolution matters here.
        match timeout(self.dns_timeout, lookup_host((host, 0))).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            Ok(Err(err)) => {
                debug!(host, error = %err, "host failed to resolve");
                false
            }
            Err(_) => {
                debug!(host, timeout = ?self.dns_timeout, "dns lookup timed out");
                false
            }
        }
    }
}

impl Default for DnsValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlValidator for DnsValidator {
    async fn validate(&self, candidate: &str) -> bool {
        let Some(parsed) = Self::parse(candidate) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        self.host_resolves(host).await
    }
}
