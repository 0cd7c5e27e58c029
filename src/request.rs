//! Boundary request shapes and their validation.
//!
//! Requests arrive as loosely typed JSON. Each request type deserializes the
//! raw shape and `validate()` turns it into checked parameters, failing with a
//! validation-class error before any network or parsing work happens.

use ahash::AHashSet;
use serde::Deserialize;
use serde_json::Value;

use crate::target::RewriteTarget;
use crate::{Error, Result};

/// Normalize a `selected_domains` value.
///
/// A JSON array must hold only strings. With `allow_single`, a bare string is
/// accepted as a one-domain list. Entries are trimmed, blanks dropped and
/// duplicates removed keeping the first occurrence.
pub fn parse_domains(value: &Value, allow_single: bool) -> Result<Vec<String>> {
    let items: Vec<&str> = match value {
        Value::String(s) if allow_single => vec![s.as_str()],
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().ok_or_else(|| {
                    Error::validation("'selected_domains' must contain only strings")
                })
            })
            .collect::<Result<_>>()?,
        _ => return Err(Error::validation("'selected_domains' must be a list")),
    };

    let mut seen = AHashSet::new();
    Ok(items
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .filter(|d| seen.insert(d.to_string()))
        .map(str::to_string)
        .collect())
}

fn parse_optional_domains(value: Option<&Value>, allow_single: bool) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(v) => parse_domains(v, allow_single),
    }
}

/// Parse a raw JSON request body.
pub fn from_json<T: for<'de> Deserialize<'de>>(body: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| Error::validation(format!("request body must be a JSON object: {}", e)))
}

/// Rewrite and DNS-mapping request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewriteRequest {
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
    /// A single domain string or a list of domains
    #[serde(default)]
    pub selected_domains: Option<Value>,
}

/// Validated rewrite parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteParams {
    pub target: RewriteTarget,
    pub domains: Vec<String>,
}

impl RewriteRequest {
    pub fn new(ipv4: Option<&str>, ipv6: Option<&str>, domains: &[&str]) -> Self {
        Self {
            ipv4: ipv4.map(str::to_string),
            ipv6: ipv6.map(str::to_string),
            selected_domains: Some(Value::from(domains.to_vec())),
        }
    }

    /// Check addresses and the domain list. `allow_single` also accepts a
    /// bare domain string.
    pub fn validate(&self, allow_single: bool) -> Result<RewriteParams> {
        let target = RewriteTarget::new(self.ipv4.as_deref(), self.ipv6.as_deref())?;
        let domains = parse_optional_domains(self.selected_domains.as_ref(), allow_single)?;
        Ok(RewriteParams { target, domains })
    }
}

/// Stream-list rewrite request; only the addresses matter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamListRequest {
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
}

impl StreamListRequest {
    pub fn validate(&self) -> Result<RewriteTarget> {
        RewriteTarget::new(self.ipv4.as_deref(), self.ipv6.as_deref())
    }
}

/// SNI proxy configuration request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SniRequest {
    #[serde(default)]
    pub selected_domains: Option<Value>,
    /// Add the SOCKS5 front proxy directives
    #[serde(default, alias = "enable_alice_socks")]
    pub enable_socks: bool,
    #[serde(default, alias = "allow_all")]
    pub allow_all_hosts: bool,
    /// Emit explanatory comments
    #[serde(default)]
    pub annotate: bool,
}

/// Where the SNI proxy rules come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SniHosts {
    /// Accept every host; no rules list
    AllowAll,
    /// Only the given hosts
    Selected(Vec<String>),
    /// Every domain of the upstream list
    Upstream,
}

/// Validated SNI proxy parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SniParams {
    pub hosts: SniHosts,
    pub enable_socks: bool,
    pub annotate: bool,
}

impl SniRequest {
    pub fn validate(&self) -> Result<SniParams> {
        let hosts = if self.allow_all_hosts {
            SniHosts::AllowAll
        } else {
            match self.selected_domains.as_ref() {
                None | Some(Value::Null) => SniHosts::Upstream,
                Some(value) => {
                    let domains = parse_domains(value, false)?;
                    if domains.is_empty() {
                        return Err(Error::validation(
                            "'selected_domains' must be a non-empty list",
                        ));
                    }
                    SniHosts::Selected(domains)
                }
            }
        };

        Ok(SniParams {
            hosts,
            enable_socks: self.enable_socks,
            annotate: self.annotate,
        })
    }
}

/// Domain-list join request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DomainListRequest {
    #[serde(default)]
    pub selected_domains: Option<Value>,
}

impl DomainListRequest {
    pub fn validate(&self) -> Result<Vec<String>> {
        let domains = parse_optional_domains(self.selected_domains.as_ref(), false)?;
        if domains.is_empty() {
            return Err(Error::validation(
                "'selected_domains' must be a non-empty list",
            ));
        }
        Ok(domains)
    }
}
