//! Service configuration.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::Result;

/// Default regex-style stream list.
pub const DEFAULT_STREAM_LIST_URL: &str =
    "https://raw.githubusercontent.com/1-stream/1stream-public-utils/refs/heads/main/stream.list";

/// Default categorized stream list.
pub const DEFAULT_STREAM_TEXT_LIST_URL: &str =
    "https://raw.githubusercontent.com/1-stream/1stream-public-utils/refs/heads/main/stream.text.list";

/// Top-level configuration passed into every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// URL of the `~regex;` stream list
    pub stream_list_url: String,
    /// URL of the categorized stream list
    pub stream_text_list_url: String,
    /// Upstream fetch timeout in seconds
    pub timeout_secs: u64,
    pub dns: DnsConfig,
    pub socks: SocksConfig,
    pub whitelist: WhitelistConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            stream_list_url: DEFAULT_STREAM_LIST_URL.to_string(),
            stream_text_list_url: DEFAULT_STREAM_TEXT_LIST_URL.to_string(),
            timeout_secs: 10,
            dns: DnsConfig::default(),
            socks: SocksConfig::default(),
            whitelist: WhitelistConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Parse configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Fetch timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// How SmartDNS mappings refer to the rewrite target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmartDnsMode {
    /// `nameserver /domain/proxy_ipv4`, with the group declared in the preamble
    #[default]
    Group,
    /// `nameserver /domain/<address>`
    Literal,
}

/// Resolver settings for the DNS-server preambles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsConfig {
    /// Default IPv4 upstream for everything not rewritten
    pub upstream_v4: String,
    /// Default IPv6 upstream, emitted only when an IPv6 target is present
    pub upstream_v6: String,
    pub cache_size: u32,
    pub smartdns_mode: SmartDnsMode,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            upstream_v4: "1.1.1.1".to_string(),
            upstream_v6: "2606:4700:4700::1111".to_string(),
            cache_size: 10000,
            smartdns_mode: SmartDnsMode::Group,
        }
    }
}

/// SOCKS5 front proxy written into SNI-proxy configs on request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocksConfig {
    pub addr: String,
    pub username: String,
    pub password: String,
}

impl Default for SocksConfig {
    fn default() -> Self {
        Self {
            addr: "[2a14:67c0:118::1]:35000".to_string(),
            username: "alice".to_string(),
            password: "alice..MVM".to_string(),
        }
    }
}

/// Category allowlists for the curated whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhitelistConfig {
    /// Majors whose every domain is included
    pub majors: Vec<String>,
    /// Name of the major that is filtered per minor
    pub platform_major: String,
    /// Minors of `platform_major` that are included
    pub platform_minors: Vec<String>,
}

impl Default for WhitelistConfig {
    fn default() -> Self {
        Self {
            majors: ["Taiwan Media", "Japan Media", "Hong Kong Media", "AI Platform"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            platform_major: "Global Platform".to_string(),
            platform_minors: [
                "DAZN",
                "Hotstar",
                "Disney+",
                "Netflix",
                "Amazon Prime Video:",
                "TVBAnywhere+",
                "Viu.com",
                "Tiktok",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.stream_text_list_url.ends_with("stream.text.list"));
        assert_eq!(config.dns.smartdns_mode, SmartDnsMode::Group);
        assert_eq!(config.whitelist.platform_major, "Global Platform");
        assert!(config
            .whitelist
            .platform_minors
            .contains(&"Amazon Prime Video:".to_string()));
    }

    #[test]
    fn test_partial_yaml() {
        let yaml = r#"
timeout_secs: 15
dns:
  smartdns_mode: literal
whitelist:
  majors: ["Korea Media"]
"#;
        let config = ServiceConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.dns.smartdns_mode, SmartDnsMode::Literal);
        assert_eq!(config.dns.cache_size, 10000);
        assert_eq!(config.whitelist.majors, vec!["Korea Media"]);
        assert_eq!(config.whitelist.platform_major, "Global Platform");
        assert_eq!(config.stream_list_url, DEFAULT_STREAM_LIST_URL);
    }

    #[test]
    fn test_empty_yaml() {
        assert_eq!(
            ServiceConfig::from_yaml_str("").unwrap(),
            ServiceConfig::default()
        );
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(ServiceConfig::from_yaml_str("timeout_secs: [1, 2]").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "stream_text_list_url: http://localhost/list.txt").unwrap();

        let config = ServiceConfig::load(file.path()).unwrap();
        assert_eq!(config.stream_text_list_url, "http://localhost/list.txt");
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ServiceConfig::load("/nonexistent/streamrule.yaml").is_err());
    }
}
