//! SNI proxy YAML configuration.
//!
//! The proxy requires `listen_addr` and `socks_addr` to be double-quoted, which
//! plain serde serialization cannot force. The document is therefore emitted
//! key by key, with each value wrapped in a [`Scalar`] that says how it must
//! be written.

use serde::{Deserialize, Serialize};

use crate::config::SocksConfig;
use crate::Result;

/// Port the proxy listens on.
pub const LISTEN_ADDR: &str = ":443";

/// Comment block listing the optional directives, used in annotated output.
const OPTIONAL_DIRECTIVES: &[&str] = &[
    "# Optional: enable a SOCKS5 front proxy",
    "#enable_socks5: true",
    "# Optional: SOCKS5 proxy address",
    "#socks_addr: 127.0.0.1:40000",
    "# Optional: allow every host (the rules list below is ignored)",
    "# allow_all_hosts: true",
];

/// SNI proxy configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SniProxyConfig {
    pub listen_addr: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_socks5: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_addr: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socks_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_all_hosts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
}

impl Default for SniProxyConfig {
    fn default() -> Self {
        Self {
            listen_addr: LISTEN_ADDR.to_string(),
            enable_socks5: None,
            socks_addr: None,
            socks_username: None,
            socks_password: None,
            allow_all_hosts: None,
            rules: None,
        }
    }
}

/// How a scalar value must be written.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Scalar<'a> {
    /// Written as-is unless YAML itself needs quotes
    Plain(&'a str),
    /// Always double-quoted
    Quoted(&'a str),
    Bool(bool),
}

impl Scalar<'_> {
    fn render(&self) -> Result<String> {
        Ok(match self {
            Scalar::Plain(s) => serde_yaml::to_string(s)?.trim_end().to_string(),
            // A JSON string literal is a valid YAML double-quoted scalar.
            Scalar::Quoted(s) => serde_json::to_string(s)?,
            Scalar::Bool(b) => b.to_string(),
        })
    }
}

impl SniProxyConfig {
    /// Configuration limited to the given hosts.
    pub fn with_rules(rules: Vec<String>) -> Self {
        Self {
            rules: Some(rules),
            ..Self::default()
        }
    }

    /// Configuration accepting every host.
    pub fn allow_all() -> Self {
        Self {
            allow_all_hosts: Some(true),
            ..Self::default()
        }
    }

    /// Route connections through a SOCKS5 front proxy.
    pub fn socks(mut self, socks: &SocksConfig) -> Self {
        self.enable_socks5 = Some(true);
        self.socks_addr = Some(socks.addr.clone());
        self.socks_username = Some(socks.username.clone());
        self.socks_password = Some(socks.password.clone());
        self
    }

    /// Emit the YAML document.
    ///
    /// With `annotate`, comment lines describe each key and the optional
    /// directives are listed commented-out after `listen_addr`.
    pub fn to_yaml(&self, annotate: bool) -> Result<String> {
        let mut out = Vec::new();

        if annotate {
            out.push("# Listen address (must stay quoted)".to_string());
        }
        push_entry(&mut out, "listen_addr", Scalar::Quoted(&self.listen_addr))?;
        if annotate {
            out.extend(OPTIONAL_DIRECTIVES.iter().map(|s| s.to_string()));
        }

        if let Some(enabled) = self.enable_socks5 {
            push_entry(&mut out, "enable_socks5", Scalar::Bool(enabled))?;
        }
        if let Some(addr) = &self.socks_addr {
            push_entry(&mut out, "socks_addr", Scalar::Quoted(addr))?;
        }
        if let Some(username) = &self.socks_username {
            push_entry(&mut out, "socks_username", Scalar::Plain(username))?;
        }
        if let Some(password) = &self.socks_password {
            push_entry(&mut out, "socks_password", Scalar::Plain(password))?;
        }
        if let Some(allow) = self.allow_all_hosts {
            push_entry(&mut out, "allow_all_hosts", Scalar::Bool(allow))?;
        }

        if let Some(rules) = &self.rules {
            if annotate {
                out.push("# Optional: only allow the listed hosts".to_string());
            }
            if rules.is_empty() {
                out.push("rules: []".to_string());
            } else {
                out.push("rules:".to_string());
                for rule in rules {
                    out.push(format!("- {}", Scalar::Plain(rule).render()?));
                }
            }
        }

        let mut yaml = out.join("\n");
        yaml.push('\n');
        Ok(yaml)
    }
}

fn push_entry(out: &mut Vec<String>, key: &str, value: Scalar<'_>) -> Result<()> {
    out.push(format!("{}: {}", key, value.render()?));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_config() {
        let config = SniProxyConfig::with_rules(vec!["a.com".to_string(), "b.com".to_string()]);
        assert_eq!(
            config.to_yaml(false).unwrap(),
            "listen_addr: \":443\"\nrules:\n- a.com\n- b.com\n"
        );
    }

    #[test]
    fn test_allow_all_config() {
        let yaml = SniProxyConfig::allow_all().to_yaml(false).unwrap();
        assert_eq!(yaml, "listen_addr: \":443\"\nallow_all_hosts: true\n");
        assert!(!yaml.contains("rules"));
    }

    #[test]
    fn test_socks_config() {
        let yaml = SniProxyConfig::allow_all()
            .socks(&SocksConfig::default())
            .to_yaml(false)
            .unwrap();

        assert!(yaml.contains("enable_socks5: true\n"));
        assert!(yaml.contains("socks_addr: \"[2a14:67c0:118::1]:35000\"\n"));
        assert!(yaml.contains("socks_username: alice\n"));
        assert!(yaml.contains("socks_password: alice..MVM\n"));
    }

    #[test]
    fn test_output_parses_back() {
        let config = SniProxyConfig::with_rules(vec![
            "netflix.com".to_string(),
            "*.nflxvideo.net".to_string(),
        ])
        .socks(&SocksConfig::default());

        let yaml = config.to_yaml(true).unwrap();
        let parsed: SniProxyConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_rules() {
        let yaml = SniProxyConfig::with_rules(Vec::new()).to_yaml(false).unwrap();
        assert!(yaml.ends_with("rules: []\n"));
    }

    #[test]
    fn test_annotated_layout() {
        let yaml = SniProxyConfig::with_rules(vec!["a.com".to_string()])
            .to_yaml(true)
            .unwrap();
        let lines: Vec<&str> = yaml.lines().collect();

        assert_eq!(lines[0], "# Listen address (must stay quoted)");
        assert_eq!(lines[1], "listen_addr: \":443\"");
        assert_eq!(lines[2], "# Optional: enable a SOCKS5 front proxy");
        assert!(lines.contains(&"# Optional: only allow the listed hosts"));
        assert_eq!(lines.last(), Some(&"- a.com"));
    }
}
