//! Configuration generators for the downstream tools.
//!
//! Every generator is a pure function over already-validated input:
//!
//! - [`DnsDialect`]: AdGuard Home, dnsmasq and SmartDNS rewrite mappings
//! - [`SniProxyConfig`]: SNI proxy YAML
//! - [`join_domain_list`]: comma-joined `domain:` tokens for router rulesets

mod dns;
mod domain_list;
mod sniproxy;

pub use dns::DnsDialect;
pub use domain_list::join_domain_list;
pub use sniproxy::{SniProxyConfig, LISTEN_ADDR};
