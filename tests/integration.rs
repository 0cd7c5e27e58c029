//! Integration tests for the boundary operations.

use serde_json::json;
use streamrule::request::{DomainListRequest, RewriteRequest, SniRequest, StreamListRequest};
use streamrule::{
    Dialect, ErrorKind, ServiceConfig, SmartDnsMode, StaticSource, StreamRuleService,
};

const TEXT_LIST: &str = r#"
# 1Stream public list
#---> Taiwan Media
#> KKTV
kktv.me
kktv.com.tw
#> LiTV
litv.tv
#---> Global Plaform
#> Netflix
netflix.com
netflix.net
#> Spotify
spotify.com
#> Amazon Prime Video:
primevideo.com
#> Coming soon
#---> Placeholder Region
#> Nothing yet
"#;

const STREAM_LIST: &str = "# Netflix\n~^(.*\\.)?netflix\\.com$;\nDOMAIN-SUFFIX,example.com\n";

fn service_with(config: ServiceConfig) -> StreamRuleService<StaticSource> {
    let source = StaticSource::new()
        .with_document(config.stream_text_list_url.clone(), TEXT_LIST)
        .with_document(config.stream_list_url.clone(), STREAM_LIST);
    StreamRuleService::new(config, source)
}

fn service() -> StreamRuleService<StaticSource> {
    service_with(ServiceConfig::default())
}

#[test]
fn test_categories_are_pruned_and_corrected() {
    let doc = service().get_categories().unwrap();

    let names: Vec<&str> = doc.majors.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Taiwan Media", "Global Platform"]);

    let platform = doc.major("Global Platform").unwrap();
    assert!(platform.minor("Coming soon").is_none());
    assert_eq!(platform.minors.len(), 3);

    for major in &doc.majors {
        assert!(!major.minors.is_empty());
        for minor in &major.minors {
            assert!(!minor.domains.is_empty());
        }
    }
}

#[test]
fn test_categories_json_shape() {
    let doc = service().get_categories().unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json[0]["name"], "Taiwan Media");
    assert_eq!(json[0]["minors"][0]["name"], "KKTV");
    assert_eq!(json[0]["minors"][0]["domains"], json!(["kktv.me", "kktv.com.tw"]));
}

#[test]
fn test_curated_whitelist() {
    let domains = service().get_curated_whitelist().unwrap();
    assert_eq!(
        domains,
        vec![
            "kktv.com.tw",
            "kktv.me",
            "litv.tv",
            "netflix.com",
            "netflix.net",
            "primevideo.com",
        ]
    );
}

#[test]
fn test_rewrite_rules() {
    let request = RewriteRequest::new(Some("1.2.3.4"), Some("2001:db8::2"), &["a.com", "b.com"]);
    let rules = service().generate_rewrite_rules(&request).unwrap();

    assert_eq!(
        rules.lines().collect::<Vec<_>>(),
        vec![
            "||a.com^$dnsrewrite=NOERROR;A;1.2.3.4",
            "||a.com^$dnsrewrite=NOERROR;AAAA;2001:db8::2",
            "||b.com^$dnsrewrite=NOERROR;A;1.2.3.4",
            "||b.com^$dnsrewrite=NOERROR;AAAA;2001:db8::2",
        ]
    );
}

#[test]
fn test_rewrite_rules_validation() {
    let service = service();

    let missing = RewriteRequest::new(None, None, &["a.com"]);
    assert_eq!(
        service.generate_rewrite_rules(&missing).unwrap_err().kind(),
        ErrorKind::Validation
    );

    let bad_v6 = RewriteRequest::new(None, Some("2001:db8::zz"), &["a.com"]);
    assert_eq!(
        service.generate_rewrite_rules(&bad_v6).unwrap_err().kind(),
        ErrorKind::Validation
    );

    let not_a_list = RewriteRequest {
        ipv4: Some("1.2.3.4".to_string()),
        ipv6: None,
        selected_domains: Some(json!({"domain": "a.com"})),
    };
    assert_eq!(
        service.generate_rewrite_rules(&not_a_list).unwrap_err().kind(),
        ErrorKind::Validation
    );
}

#[test]
fn test_dns_config_dnsmasq() {
    let request = RewriteRequest::new(Some("10.0.0.1"), None, &["netflix.com"]);
    let out = service()
        .generate_dns_config(Dialect::Dnsmasq, &request)
        .unwrap();

    assert!(out.starts_with("no-resolv\n"));
    assert!(out.ends_with("\n\nserver=/netflix.com/10.0.0.1"));
}

#[test]
fn test_dns_config_smartdns_modes() {
    let request = RewriteRequest::new(Some("10.0.0.1"), None, &["netflix.com"]);

    let grouped = service()
        .generate_dns_config(Dialect::SmartDns, &request)
        .unwrap();
    assert!(grouped.contains("server 10.0.0.1 -group proxy_ipv4 -exclude-default-group"));
    assert!(grouped.ends_with("nameserver /netflix.com/proxy_ipv4"));

    let mut config = ServiceConfig::default();
    config.dns.smartdns_mode = SmartDnsMode::Literal;
    let literal = service_with(config)
        .generate_dns_config(Dialect::SmartDns, &request)
        .unwrap();
    assert!(literal.ends_with("nameserver /netflix.com/10.0.0.1"));
}

#[test]
fn test_dns_config_rejects_single_string() {
    let request = RewriteRequest {
        ipv4: Some("10.0.0.1".to_string()),
        ipv6: None,
        selected_domains: Some(json!("netflix.com")),
    };
    let err = service()
        .generate_dns_config(Dialect::Dnsmasq, &request)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_stream_list() {
    let request = StreamListRequest {
        ipv4: Some("1.2.3.4".to_string()),
        ipv6: None,
    };
    let out = service().generate_stream_list(&request).unwrap();

    assert_eq!(
        out,
        "# Netflix\n/^(.*\\.)?netflix\\.com$/$dnsrewrite=NOERROR;A;1.2.3.4\nDOMAIN-SUFFIX,example.com"
    );
}

#[test]
fn test_sni_config_from_upstream() {
    let out = service().generate_sni_config(&SniRequest::default()).unwrap();

    assert!(out.starts_with("listen_addr: \":443\"\nrules:\n"));
    assert!(out.contains("- kktv.me\n"));
    assert!(out.contains("- primevideo.com\n"));
    assert!(!out.contains("Taiwan Media"));
}

#[test]
fn test_sni_config_allow_all_ignores_domains() {
    let request = SniRequest {
        selected_domains: Some(json!(["a.com", "b.com"])),
        allow_all_hosts: true,
        ..SniRequest::default()
    };
    let out = service().generate_sni_config(&request).unwrap();

    assert!(out.contains("allow_all_hosts: true"));
    assert!(!out.contains("rules"));
    assert!(!out.contains("a.com"));
}

#[test]
fn test_sni_config_selected_with_socks() {
    let request = SniRequest {
        selected_domains: Some(json!(["a.com"])),
        enable_socks: true,
        ..SniRequest::default()
    };
    let out = service().generate_sni_config(&request).unwrap();

    assert_eq!(
        out,
        "listen_addr: \":443\"\n\
         enable_socks5: true\n\
         socks_addr: \"[2a14:67c0:118::1]:35000\"\n\
         socks_username: alice\n\
         socks_password: alice..MVM\n\
         rules:\n\
         - a.com\n"
    );
}

#[test]
fn test_sni_config_rejects_empty_selection() {
    let request = SniRequest {
        selected_domains: Some(json!([])),
        ..SniRequest::default()
    };
    let err = service().generate_sni_config(&request).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_domain_list() {
    let request = DomainListRequest {
        selected_domains: Some(json!(["a.com", "b.com"])),
    };
    assert_eq!(
        service().generate_domain_list(&request).unwrap(),
        "domain:a.com,domain:b.com"
    );

    let empty = DomainListRequest {
        selected_domains: Some(json!([])),
    };
    assert_eq!(
        service().generate_domain_list(&empty).unwrap_err().kind(),
        ErrorKind::Validation
    );
}

#[test]
fn test_upstream_unavailable() {
    let service = StreamRuleService::new(ServiceConfig::default(), StaticSource::new());

    assert_eq!(service.get_categories().unwrap_err().kind(), ErrorKind::Upstream);
    assert_eq!(
        service.get_curated_whitelist().unwrap_err().kind(),
        ErrorKind::Upstream
    );
    assert_eq!(
        service
            .generate_sni_config(&SniRequest::default())
            .unwrap_err()
            .kind(),
        ErrorKind::Upstream
    );
}
