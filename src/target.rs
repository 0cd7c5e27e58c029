//! Rewrite target addresses.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::net::Ipv6Addr;

use crate::{Error, Result};

/// Four dot-separated groups of one to three digits. No range check, so
/// `999.999.999.999` is accepted.
static IPV4_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}$").unwrap());

/// Check an IPv4 address against the dotted-quad pattern.
pub fn validate_ipv4(s: &str) -> Result<String> {
    let s = s.trim();
    if IPV4_PATTERN.is_match(s) {
        Ok(s.to_string())
    } else {
        Err(Error::validation(format!("malformed IPv4 address: {}", s)))
    }
}

/// Check that a string parses as an IPv6 address.
///
/// The trimmed input is returned as written, so `2001:DB8:0::1` is not
/// rewritten to its canonical form.
pub fn validate_ipv6(s: &str) -> Result<String> {
    let s = s.trim();
    match s.parse::<Ipv6Addr>() {
        Ok(_) => Ok(s.to_string()),
        Err(_) => Err(Error::validation(format!("malformed IPv6 address: {}", s))),
    }
}

/// The addresses a set of domains should resolve to.
///
/// Always carries at least one address family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteTarget {
    ipv4: Option<String>,
    ipv6: Option<String>,
}

impl RewriteTarget {
    /// Validate caller-supplied addresses.
    ///
    /// Blank strings count as absent. At least one address is required.
    pub fn new(ipv4: Option<&str>, ipv6: Option<&str>) -> Result<Self> {
        let ipv4 = ipv4.map(str::trim).filter(|s| !s.is_empty());
        let ipv6 = ipv6.map(str::trim).filter(|s| !s.is_empty());

        if ipv4.is_none() && ipv6.is_none() {
            return Err(Error::validation(
                "at least one of ipv4 or ipv6 must be provided",
            ));
        }

        Ok(Self {
            ipv4: ipv4.map(validate_ipv4).transpose()?,
            ipv6: ipv6.map(validate_ipv6).transpose()?,
        })
    }

    /// Target with only an IPv4 address.
    pub fn v4(ipv4: &str) -> Result<Self> {
        Self::new(Some(ipv4), None)
    }

    /// Target with only an IPv6 address.
    pub fn v6(ipv6: &str) -> Result<Self> {
        Self::new(None, Some(ipv6))
    }

    pub fn ipv4(&self) -> Option<&str> {
        self.ipv4.as_deref()
    }

    pub fn ipv6(&self) -> Option<&str> {
        self.ipv6.as_deref()
    }

    pub fn has_ipv4(&self) -> bool {
        self.ipv4.is_some()
    }

    pub fn has_ipv6(&self) -> bool {
        self.ipv6.is_some()
    }
}

impl fmt::Display for RewriteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.ipv4, &self.ipv6) {
            (Some(v4), Some(v6)) => write!(f, "{} / {}", v4, v6),
            (Some(v4), None) => write!(f, "{}", v4),
            (None, Some(v6)) => write!(f, "{}", v6),
            (None, None) => Ok(()),
        }
    }
}
