//! Line-level transforms over uncategorized upstream lists.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::target::RewriteTarget;

/// `~<regex>;` entries in the regex-style stream list.
static REGEX_ENTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^~(.*);$").unwrap());

/// Extract every non-empty, non-comment line as a domain.
///
/// This is the filter used when no categorization is needed, so it keeps
/// whatever the list carries without checking the line looks like a domain.
pub fn extract_plain_domains(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Output of a stream-list rewrite pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamListRewrite {
    pub lines: Vec<String>,
    /// Number of `~regex;` entries that were turned into rewrite rules
    pub rewritten: usize,
}

impl StreamListRewrite {
    pub fn into_text(self) -> String {
        self.lines.join("\n")
    }
}

/// Rewrite a regex-style stream list into AdGuard Home regex rewrite rules.
///
/// Matching lines become one `/regex/$dnsrewrite=...` rule per address
/// family present in `target`; every other line passes through untouched.
pub fn rewrite_stream_list(text: &str, target: &RewriteTarget) -> StreamListRewrite {
    let mut out = StreamListRewrite::default();

    for line in text.lines() {
        match REGEX_ENTRY.captures(line).and_then(|caps| caps.get(1)) {
            Some(pattern) => {
                let pattern = pattern.as_str();
                if let Some(ipv4) = target.ipv4() {
                    out.lines
                        .push(format!("/{}/$dnsrewrite=NOERROR;A;{}", pattern, ipv4));
                }
                if let Some(ipv6) = target.ipv6() {
                    out.lines
                        .push(format!("/{}/$dnsrewrite=NOERROR;AAAA;{}", pattern, ipv6));
                }
                out.rewritten += 1;
            }
            None => out.lines.push(line.to_string()),
        }
    }

    if out.rewritten == 0 {
        log::warn!("Addresses were supplied but no stream-list entry produced a rewrite rule");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_plain_domains() {
        let text = "# header\n\nnetflix.com\n  nflxvideo.net  \n#> comment\nlocalhost\n";
        assert_eq!(
            extract_plain_domains(text),
            vec!["netflix.com", "nflxvideo.net", "localhost"]
        );
        assert!(extract_plain_domains("").is_empty());
    }

    #[test]
    fn test_rewrite_stream_list_v4_and_v6() {
        let target = RewriteTarget::new(Some("1.2.3.4"), Some("2001:db8::1")).unwrap();
        let text = "# Netflix\n~^(.*\\.)?netflix\\.com$;\n\nplain";

        let result = rewrite_stream_list(text, &target);

        assert_eq!(result.rewritten, 1);
        assert_eq!(
            result.lines,
            vec![
                "# Netflix",
                "/^(.*\\.)?netflix\\.com$/$dnsrewrite=NOERROR;A;1.2.3.4",
                "/^(.*\\.)?netflix\\.com$/$dnsrewrite=NOERROR;AAAA;2001:db8::1",
                "",
                "plain",
            ]
        );
    }

    #[test]
    fn test_rewrite_stream_list_v6_only() {
        let target = RewriteTarget::new(None, Some("2001:db8::1")).unwrap();
        let result = rewrite_stream_list("~abc;", &target);
        assert_eq!(
            result.into_text(),
            "/abc/$dnsrewrite=NOERROR;AAAA;2001:db8::1"
        );
    }

    #[test]
    fn test_rewrite_keeps_ipv6_spelling() {
        let target = RewriteTarget::v6(" 2001:DB8:0::1 ").unwrap();
        let result = rewrite_stream_list("~abc;", &target);
        assert_eq!(
            result.into_text(),
            "/abc/$dnsrewrite=NOERROR;AAAA;2001:DB8:0::1"
        );
    }

    #[test]
    fn test_rewrite_requires_trailing_semicolon() {
        let target = RewriteTarget::new(Some("1.2.3.4"), None).unwrap();
        let result = rewrite_stream_list("~abc\n ~abc;", &target);
        assert_eq!(result.rewritten, 0);
        assert_eq!(result.lines, vec!["~abc", " ~abc;"]);
    }
}
