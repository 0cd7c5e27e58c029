//! Output dialect definitions.

use std::fmt;

/// Dialect represents the configuration syntax a generator emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// AdGuard Home `$dnsrewrite` rules
    AdGuard,
    /// dnsmasq `server=/domain/addr` mappings
    Dnsmasq,
    /// SmartDNS `nameserver /domain/...` mappings
    SmartDns,
    /// SNI proxy YAML configuration
    SniProxy,
    /// Comma-joined `domain:` tokens for router rulesets
    DomainList,
}

impl Dialect {
    /// All dialects, in display order.
    pub const ALL: [Dialect; 5] = [
        Dialect::AdGuard,
        Dialect::Dnsmasq,
        Dialect::SmartDns,
        Dialect::SniProxy,
        Dialect::DomainList,
    ];

    /// Parse a dialect from a string (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "adguard" | "adguardhome" | "adguard-home" => Some(Dialect::AdGuard),
            "dnsmasq" => Some(Dialect::Dnsmasq),
            "smartdns" | "smart-dns" => Some(Dialect::SmartDns),
            "sniproxy" | "sni-proxy" | "sni" => Some(Dialect::SniProxy),
            "domain-list" | "domainlist" | "xray" => Some(Dialect::DomainList),
            _ => None,
        }
    }

    /// Get the canonical string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::AdGuard => "adguard",
            Dialect::Dnsmasq => "dnsmasq",
            Dialect::SmartDns => "smartdns",
            Dialect::SniProxy => "sniproxy",
            Dialect::DomainList => "domain-list",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dialect::parse(s).ok_or_else(|| format!("unknown dialect: {}", s))
    }
}
