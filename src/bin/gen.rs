//! streamrule-gen: CLI tool for generating DNS, SNI-proxy and router rules
//! from the curated streaming-domain list.

use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use streamrule::request::{DomainListRequest, RewriteRequest, SniRequest, StreamListRequest};
use streamrule::{Dialect, RewriteTarget, ServiceConfig, StreamRuleService};

#[derive(Parser)]
#[command(name = "streamrule-gen")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Generate DNS, SNI-proxy and router rules from the curated stream list", long_about = None)]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the parsed category tree as JSON
    Categories,

    /// Print the curated whitelist, one domain per line
    Whitelist,

    /// AdGuard Home rewrite rules (defaults to the curated whitelist)
    Rewrite {
        #[arg(long)]
        ipv4: Option<String>,

        #[arg(long)]
        ipv6: Option<String>,

        /// Domain to rewrite (repeatable)
        #[arg(short, long = "domain")]
        domains: Vec<String>,
    },

    /// Rewrite the regex-style stream list for AdGuard Home
    StreamList {
        #[arg(long)]
        ipv4: Option<String>,

        #[arg(long)]
        ipv6: Option<String>,
    },

    /// dnsmasq or SmartDNS mapping (defaults to the curated whitelist)
    Dns {
        /// Output dialect: dnsmasq, smartdns or adguard
        #[arg(long, default_value = "dnsmasq")]
        dialect: Dialect,

        #[arg(long)]
        ipv4: Option<String>,

        #[arg(long)]
        ipv6: Option<String>,

        /// Domain to map (repeatable)
        #[arg(short, long = "domain")]
        domains: Vec<String>,
    },

    /// SNI proxy YAML (defaults to every upstream domain)
    Sni {
        /// Allowed host (repeatable)
        #[arg(short, long = "domain")]
        domains: Vec<String>,

        /// Add the SOCKS5 front proxy directives
        #[arg(long)]
        socks: bool,

        /// Allow every host instead of a rules list
        #[arg(long)]
        allow_all: bool,

        /// Explain each key with comments
        #[arg(long)]
        annotate: bool,
    },

    /// Comma-joined domain: list (defaults to the curated whitelist)
    DomainList {
        /// Domain to include (repeatable)
        #[arg(short, long = "domain")]
        domains: Vec<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => {
            log::debug!("Reading config file: {:?}", path);
            ServiceConfig::load(path)?
        }
        None => ServiceConfig::default(),
    };
    let service = StreamRuleService::from_config(config)?;

    let output = match cli.command {
        Commands::Categories => serde_json::to_string_pretty(&service.get_categories()?)?,
        Commands::Whitelist => service.get_curated_whitelist()?.join("\n"),
        Commands::Rewrite {
            ipv4,
            ipv6,
            domains,
        } => {
            // Check the addresses before fetching a fallback domain list.
            RewriteTarget::new(ipv4.as_deref(), ipv6.as_deref())?;
            let request = RewriteRequest {
                ipv4,
                ipv6,
                selected_domains: Some(domains_or_whitelist(&service, domains)?),
            };
            service.generate_rewrite_rules(&request)?
        }
        Commands::StreamList { ipv4, ipv6 } => {
            service.generate_stream_list(&StreamListRequest { ipv4, ipv6 })?
        }
        Commands::Dns {
            dialect,
            ipv4,
            ipv6,
            domains,
        } => {
            // Check the addresses before fetching a fallback domain list.
            RewriteTarget::new(ipv4.as_deref(), ipv6.as_deref())?;
            let request = RewriteRequest {
                ipv4,
                ipv6,
                selected_domains: Some(domains_or_whitelist(&service, domains)?),
            };
            service.generate_dns_config(dialect, &request)?
        }
        Commands::Sni {
            domains,
            socks,
            allow_all,
            annotate,
        } => {
            let request = SniRequest {
                selected_domains: (!domains.is_empty()).then(|| Value::from(domains)),
                enable_socks: socks,
                allow_all_hosts: allow_all,
                annotate,
            };
            service.generate_sni_config(&request)?
        }
        Commands::DomainList { domains } => {
            let request = DomainListRequest {
                selected_domains: Some(domains_or_whitelist(&service, domains)?),
            };
            service.generate_domain_list(&request)?
        }
    };

    println!("{}", output.trim_end());
    Ok(())
}

/// Use the given domains, or fall back to the curated whitelist.
fn domains_or_whitelist(
    service: &StreamRuleService,
    domains: Vec<String>,
) -> Result<Value, Box<dyn std::error::Error>> {
    if !domains.is_empty() {
        return Ok(Value::from(domains));
    }
    let whitelist = service.get_curated_whitelist()?;
    Ok(Value::from(whitelist))
}
