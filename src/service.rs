//! Boundary operations.
//!
//! `StreamRuleService` is what an HTTP layer or the CLI talks to. Each call
//! validates its request, fetches the upstream document it needs (every
//! time; nothing is cached), then parses and renders in memory.

use crate::category::CategoryDocument;
use crate::config::ServiceConfig;
use crate::converter::{extract_plain_domains, rewrite_stream_list, CategoryParser};
use crate::generator::{join_domain_list, DnsDialect, SniProxyConfig};
use crate::request::{
    DomainListRequest, RewriteRequest, SniHosts, SniRequest, StreamListRequest,
};
use crate::upstream::{DocumentSource, HttpSource};
use crate::whitelist::curated_whitelist;
use crate::{Dialect, Result};

/// Stream rule generation service.
///
/// # Example
///
/// ```ignore
/// use streamrule::{ServiceConfig, StreamRuleService};
/// use streamrule::request::RewriteRequest;
///
/// let service = StreamRuleService::from_config(ServiceConfig::default())?;
/// let categories = service.get_categories()?;
///
/// let request = RewriteRequest::new(Some("1.2.3.4"), None, &["netflix.com"]);
/// let rules = service.generate_rewrite_rules(&request)?;
/// ```
pub struct StreamRuleService<S = HttpSource> {
    config: ServiceConfig,
    source: S,
}

impl StreamRuleService<HttpSource> {
    /// Create a service fetching over HTTP with the configured timeout.
    pub fn from_config(config: ServiceConfig) -> Result<Self> {
        let source = HttpSource::new(config.timeout())?;
        Ok(Self::new(config, source))
    }
}

impl<S: DocumentSource> StreamRuleService<S> {
    pub fn new(config: ServiceConfig, source: S) -> Self {
        Self { config, source }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn fetch_categories(&self) -> Result<CategoryDocument> {
        let text = self.source.fetch(&self.config.stream_text_list_url)?;
        Ok(CategoryParser::parse_str(&text))
    }

    /// Fetch and parse the categorized list.
    pub fn get_categories(&self) -> Result<CategoryDocument> {
        let doc = self.fetch_categories()?;
        log::info!(
            "Parsed {} categories with {} domains",
            doc.len(),
            doc.domain_count()
        );
        Ok(doc)
    }

    /// Domains of the allowlisted categories, sorted and deduplicated.
    pub fn get_curated_whitelist(&self) -> Result<Vec<String>> {
        let doc = self.fetch_categories()?;
        let domains = curated_whitelist(&doc, &self.config.whitelist);
        log::info!("Curated whitelist holds {} domains", domains.len());
        Ok(domains)
    }

    /// AdGuard Home rewrite rules for a domain or list of domains.
    pub fn generate_rewrite_rules(&self, request: &RewriteRequest) -> Result<String> {
        let params = request.validate(true)?;
        Ok(DnsDialect::AdGuard.render(&params.domains, &params.target, &self.config.dns))
    }

    /// dnsmasq or SmartDNS mapping for the selected domains.
    ///
    /// AdGuard is accepted too and renders like
    /// [`generate_rewrite_rules`](Self::generate_rewrite_rules).
    pub fn generate_dns_config(&self, dialect: Dialect, request: &RewriteRequest) -> Result<String> {
        let dialect = DnsDialect::from_dialect(dialect, self.config.dns.smartdns_mode)?;
        let params = request.validate(false)?;
        Ok(dialect.render(&params.domains, &params.target, &self.config.dns))
    }

    /// Rewrite the regex-style stream list for AdGuard Home.
    pub fn generate_stream_list(&self, request: &StreamListRequest) -> Result<String> {
        let target = request.validate()?;
        let text = self.source.fetch(&self.config.stream_list_url)?;
        let rewrite = rewrite_stream_list(&text, &target);
        log::info!("Rewrote {} stream-list entries for {}", rewrite.rewritten, target);
        Ok(rewrite.into_text())
    }

    /// SNI proxy YAML configuration.
    pub fn generate_sni_config(&self, request: &SniRequest) -> Result<String> {
        let params = request.validate()?;

        let config = match params.hosts {
            SniHosts::AllowAll => SniProxyConfig::allow_all(),
            SniHosts::Selected(domains) => {
                log::info!("Using {} selected domains", domains.len());
                SniProxyConfig::with_rules(domains)
            }
            SniHosts::Upstream => {
                let text = self.source.fetch(&self.config.stream_text_list_url)?;
                let domains = extract_plain_domains(&text);
                log::info!("Extracted {} domains from upstream list", domains.len());
                SniProxyConfig::with_rules(domains)
            }
        };

        let config = if params.enable_socks {
            config.socks(&self.config.socks)
        } else {
            config
        };

        config.to_yaml(params.annotate)
    }

    /// Comma-joined `domain:` tokens.
    pub fn generate_domain_list(&self, request: &DomainListRequest) -> Result<String> {
        let domains = request.validate()?;
        Ok(join_domain_list(&domains))
    }
}
