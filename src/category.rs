//! Category tree produced by the text-list parser.

use serde::{Deserialize, Serialize};

/// A sub-grouping inside a major category, e.g. a single streaming service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinorCategory {
    pub name: String,
    pub domains: Vec<String>,
}

impl MinorCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domains: Vec::new(),
        }
    }
}

/// A top-level grouping such as a region or platform family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MajorCategory {
    pub name: String,
    pub minors: Vec<MinorCategory>,
}

impl MajorCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            minors: Vec::new(),
        }
    }

    /// Find a minor category by exact name.
    pub fn minor(&self, name: &str) -> Option<&MinorCategory> {
        self.minors.iter().find(|m| m.name == name)
    }

    /// Iterate every domain of every minor, in document order.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.minors
            .iter()
            .flat_map(|m| m.domains.iter().map(String::as_str))
    }
}

/// Ordered list of major categories.
///
/// Serializes as a bare JSON array, which is the shape the category
/// browser consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryDocument {
    pub majors: Vec<MajorCategory>,
}

impl CategoryDocument {
    pub fn new(majors: Vec<MajorCategory>) -> Self {
        Self { majors }
    }

    pub fn is_empty(&self) -> bool {
        self.majors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.majors.len()
    }

    /// Find a major category by exact name.
    pub fn major(&self, name: &str) -> Option<&MajorCategory> {
        self.majors.iter().find(|m| m.name == name)
    }

    /// Iterate every domain in the tree, in document order.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.majors.iter().flat_map(|m| m.domains())
    }

    /// Total number of domain entries (duplicates included).
    pub fn domain_count(&self) -> usize {
        self.majors
            .iter()
            .flat_map(|m| m.minors.iter())
            .map(|m| m.domains.len())
            .sum()
    }

    /// Drop minors without domains, then majors without minors.
    pub(crate) fn prune(&mut self) {
        for major in &mut self.majors {
            major.minors.retain(|m| !m.domains.is_empty());
        }
        self.majors.retain(|m| !m.minors.is_empty());
    }

    /// Render the tree back into the header format it was parsed from.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for major in &self.majors {
            out.push_str("#---> ");
            out.push_str(&major.name);
            out.push('\n');
            for minor in &major.minors {
                out.push_str("#> ");
                out.push_str(&minor.name);
                out.push('\n');
                for domain in &minor.domains {
                    out.push_str(domain);
                    out.push('\n');
                }
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CategoryDocument {
        let mut major = MajorCategory::new("Group A");
        let mut minor = MinorCategory::new("Sub A1");
        minor.domains.push("example.com".to_string());
        minor.domains.push("cdn.example.com".to_string());
        major.minors.push(minor);
        major.minors.push(MinorCategory::new("Sub A2"));
        CategoryDocument::new(vec![major, MajorCategory::new("Empty")])
    }

    #[test]
    fn test_prune() {
        let mut doc = sample();
        doc.prune();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.majors[0].minors.len(), 1);
        assert_eq!(doc.majors[0].minors[0].name, "Sub A1");
    }

    #[test]
    fn test_domains_in_order() {
        let doc = sample();
        let domains: Vec<&str> = doc.domains().collect();
        assert_eq!(domains, vec!["example.com", "cdn.example.com"]);
        assert_eq!(doc.domain_count(), 2);
    }

    #[test]
    fn test_json_shape() {
        let mut doc = sample();
        doc.prune();
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Group A");
        assert_eq!(json[0]["minors"][0]["domains"][1], "cdn.example.com");
    }

    #[test]
    fn test_to_text() {
        let mut doc = sample();
        doc.prune();
        assert_eq!(
            doc.to_text(),
            "#---> Group A\n#> Sub A1\nexample.com\ncdn.example.com\n\n"
        );
    }

    #[test]
    fn test_lookup() {
        let doc = sample();
        let major = doc.major("Group A").unwrap();
        assert!(major.minor("Sub A2").is_some());
        assert!(doc.major("Missing").is_none());
    }
}
