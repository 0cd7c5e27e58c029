//! Per-domain DNS rewrite dialects.
//!
//! AdGuard Home, dnsmasq and SmartDNS all map a domain to one line per
//! address family, so they share a single rendering path. dnsmasq and
//! SmartDNS output is prefixed with a resolver preamble that depends on which
//! families the target carries.

use crate::config::{DnsConfig, SmartDnsMode};
use crate::target::RewriteTarget;
use crate::{Dialect, Error, Result};

/// SmartDNS server group names used in group mode.
const SMARTDNS_GROUP_V4: &str = "proxy_ipv4";
const SMARTDNS_GROUP_V6: &str = "proxy_ipv6";

/// The DNS dialects that map domains to rewrite addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DnsDialect {
    AdGuard,
    Dnsmasq,
    SmartDns(SmartDnsMode),
}

impl DnsDialect {
    /// Pick the DNS dialect for a general dialect.
    pub fn from_dialect(dialect: Dialect, smartdns_mode: SmartDnsMode) -> Result<Self> {
        match dialect {
            Dialect::AdGuard => Ok(DnsDialect::AdGuard),
            Dialect::Dnsmasq => Ok(DnsDialect::Dnsmasq),
            Dialect::SmartDns => Ok(DnsDialect::SmartDns(smartdns_mode)),
            other => Err(Error::validation(format!(
                "{} is not a DNS rewrite dialect",
                other
            ))),
        }
    }

    pub fn dialect(&self) -> Dialect {
        match self {
            DnsDialect::AdGuard => Dialect::AdGuard,
            DnsDialect::Dnsmasq => Dialect::Dnsmasq,
            DnsDialect::SmartDns(_) => Dialect::SmartDns,
        }
    }

    /// Render the rules for one domain. Blank domains yield nothing.
    pub fn domain_rules(&self, domain: &str, target: &RewriteTarget) -> Vec<String> {
        let mut rules = Vec::with_capacity(2);
        if domain.is_empty() {
            return rules;
        }

        if let Some(ipv4) = target.ipv4() {
            rules.push(self.rule_line(domain, "A", ipv4, SMARTDNS_GROUP_V4));
        }
        if let Some(ipv6) = target.ipv6() {
            rules.push(self.rule_line(domain, "AAAA", ipv6, SMARTDNS_GROUP_V6));
        }
        rules
    }

    fn rule_line(&self, domain: &str, record: &str, addr: &str, group: &str) -> String {
        match self {
            DnsDialect::AdGuard => format!("||{}^$dnsrewrite=NOERROR;{};{}", domain, record, addr),
            DnsDialect::Dnsmasq => format!("server=/{}/{}", domain, addr),
            DnsDialect::SmartDns(SmartDnsMode::Group) => format!("nameserver /{}/{}", domain, group),
            DnsDialect::SmartDns(SmartDnsMode::Literal) => {
                format!("nameserver /{}/{}", domain, addr)
            }
        }
    }

    /// Resolver directives placed before the rules.
    pub fn preamble(&self, target: &RewriteTarget, config: &DnsConfig) -> Vec<String> {
        let mut lines = Vec::new();
        match self {
            DnsDialect::AdGuard => {}
            DnsDialect::Dnsmasq => {
                lines.push("no-resolv".to_string());
                lines.push(format!("cache-size={}", config.cache_size));
                lines.push(format!("server={}", config.upstream_v4));
                if target.has_ipv6() {
                    lines.push(format!("server={}", config.upstream_v6));
                }
            }
            DnsDialect::SmartDns(mode) => {
                lines.push("bind :53".to_string());
                lines.push(format!("cache-size {}", config.cache_size));
                lines.push(format!("server {}", config.upstream_v4));
                if target.has_ipv6() {
                    lines.push(format!("server {}", config.upstream_v6));
                }
                if *mode == SmartDnsMode::Group {
                    if let Some(ipv4) = target.ipv4() {
                        lines.push(format!(
                            "server {} -group {} -exclude-default-group",
                            ipv4, SMARTDNS_GROUP_V4
                        ));
                    }
                    if let Some(ipv6) = target.ipv6() {
                        lines.push(format!(
                            "server {} -group {} -exclude-default-group",
                            ipv6, SMARTDNS_GROUP_V6
                        ));
                    }
                }
            }
        }
        lines
    }

    /// Render a full batch: preamble, a blank separator, then the rules.
    pub fn render<S: AsRef<str>>(
        &self,
        domains: &[S],
        target: &RewriteTarget,
        config: &DnsConfig,
    ) -> String {
        let rules: Vec<String> = domains
            .iter()
            .flat_map(|d| self.domain_rules(d.as_ref(), target))
            .collect();

        let mut lines = self.preamble(target, config);
        if !lines.is_empty() && !rules.is_empty() {
            lines.push(String::new());
        }
        lines.extend(rules);
        lines.join("\n")
    }
}
