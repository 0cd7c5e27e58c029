//! Router ruleset domain list.

/// Join domains into comma-separated `domain:X` tokens.
///
/// An empty list yields an empty string.
pub fn join_domain_list<S: AsRef<str>>(domains: &[S]) -> String {
    domains
        .iter()
        .map(|d| format!("domain:{}", d.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}
