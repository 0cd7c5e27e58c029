//! Curated whitelist selection over a parsed category tree.

use std::collections::BTreeSet;

use crate::category::CategoryDocument;
use crate::config::WhitelistConfig;

/// Collect the whitelisted domains, sorted and deduplicated.
///
/// Every domain of an allowlisted major is taken. Within the platform major
/// only the allowlisted minors are taken. Name matching is exact.
pub fn curated_whitelist(doc: &CategoryDocument, config: &WhitelistConfig) -> Vec<String> {
    let mut domains = BTreeSet::new();

    for major in &doc.majors {
        if config.majors.iter().any(|name| *name == major.name) {
            domains.extend(major.domains().map(str::to_string));
        } else if major.name == config.platform_major {
            for minor in &major.minors {
                if config.platform_minors.iter().any(|name| *name == minor.name) {
                    domains.extend(minor.domains.iter().cloned());
                }
            }
        }
    }

    domains.into_iter().collect()
}
