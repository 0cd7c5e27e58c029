//! streamrule - Curated streaming-domain lists to DNS, SNI-proxy and router rules.
//!
//! This crate fetches a human-curated, categorized list of streaming service
//! domains and renders it into configuration snippets for downstream tools.
//!
//! # Features
//!
//! - **Category parsing**: Turns the comment-annotated list into a
//!   major → minor → domains tree, silently dropping malformed lines
//! - **DNS rewrites**: AdGuard Home `$dnsrewrite`, dnsmasq `server=` and
//!   SmartDNS `nameserver` mappings for IPv4 and/or IPv6 targets
//! - **SNI proxy**: YAML configuration with an optional SOCKS5 front proxy
//! - **Router rulesets**: Comma-joined `domain:` lists
//! - **Curated whitelist**: Domains of a fixed set of categories
//!
//! # Quick Start
//!
//! ```
//! use streamrule::converter::CategoryParser;
//! use streamrule::generator::DnsDialect;
//! use streamrule::{DnsConfig, RewriteTarget};
//!
//! let doc = CategoryParser::parse_str("#---> Group A\n#> Sub A1\nexample.com\n");
//! assert_eq!(doc.majors[0].minors[0].domains, vec!["example.com"]);
//!
//! let target = RewriteTarget::v4("1.2.3.4").unwrap();
//! let rules = DnsDialect::AdGuard.render(&["a.com"], &target, &DnsConfig::default());
//! assert_eq!(rules, "||a.com^$dnsrewrite=NOERROR;A;1.2.3.4");
//! ```
//!
//! # Service
//!
//! [`StreamRuleService`] exposes the boundary operations an HTTP layer calls.
//! It takes its [`ServiceConfig`] explicitly and re-fetches the upstream list
//! on every call:
//!
//! ```ignore
//! use streamrule::{ServiceConfig, StreamRuleService};
//!
//! let service = StreamRuleService::from_config(ServiceConfig::default())?;
//! let whitelist = service.get_curated_whitelist()?;
//! ```
//!
//! # Errors
//!
//! Every failure is classified by [`Error::kind`] as validation (bad caller
//! input), upstream (the list could not be fetched) or internal. Parsing
//! itself never fails.

mod category;
mod dialect;
mod error;
mod target;

pub mod config;
pub mod converter;
pub mod generator;
pub mod request;
pub mod service;
pub mod upstream;
pub mod whitelist;

// Re-export core types
pub use category::{CategoryDocument, MajorCategory, MinorCategory};
pub use dialect::Dialect;
pub use error::{Error, ErrorKind, Result};
pub use target::{validate_ipv4, validate_ipv6, RewriteTarget};

// Re-export configuration
pub use config::{DnsConfig, ServiceConfig, SmartDnsMode, SocksConfig, WhitelistConfig};

// Re-export the service facade
pub use service::StreamRuleService;
pub use upstream::{DocumentSource, HttpSource, StaticSource};
