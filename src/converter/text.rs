//! Categorized text-list parser.
//!
//! The upstream list is a flat document where comment headers open
//! categories:
//!
//! ```text
//! #---> Japan Media
//! #> Abema
//! abema.tv
//! ameba.jp
//! #> DMM
//! dmm.com
//! ```
//!
//! `#-->` style headers (one or more dashes) open a major category, `#>`
//! headers open a minor category inside it, and plain lines containing a dot
//! are domains of the current minor. Everything else is dropped silently.

use once_cell::sync::Lazy;
use regex::Regex;
use std::io::{BufRead, BufReader, Read};

use crate::category::{CategoryDocument, MajorCategory, MinorCategory};

static MAJOR_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s*-+\s*>\s*(.+)").expect("valid major header pattern"));
static MINOR_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#\s*>\s*(.+)").expect("valid minor header pattern"));

/// Known typos in upstream major-category names.
const MAJOR_NAME_CORRECTIONS: &[(&str, &str)] = &[("Global Plaform", "Global Platform")];

/// Classification of a single trimmed line.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Major(&'a str),
    Minor(&'a str),
    Domain(&'a str),
    Ignored,
}

fn classify(line: &str) -> Line<'_> {
    if let Some(caps) = MAJOR_HEADER.captures(line) {
        if let Some(name) = caps.get(1) {
            return Line::Major(name.as_str().trim());
        }
    }
    if let Some(caps) = MINOR_HEADER.captures(line) {
        if let Some(name) = caps.get(1) {
            return Line::Minor(name.as_str().trim());
        }
    }
    if is_domain_line(line) {
        return Line::Domain(line);
    }
    Line::Ignored
}

/// A domain line is a non-comment containing a dot and no space character.
fn is_domain_line(line: &str) -> bool {
    !line.is_empty() && !line.starts_with('#') && line.contains('.') && !line.contains(' ')
}

fn correct_major_name(name: &str) -> &str {
    MAJOR_NAME_CORRECTIONS
        .iter()
        .find(|(typo, _)| *typo == name)
        .map(|(_, fixed)| *fixed)
        .unwrap_or(name)
}

/// Categorized text-list parser.
pub struct CategoryParser;

impl CategoryParser {
    /// Parse a document from a reader.
    ///
    /// Lines that are not valid UTF-8 are dropped like any other malformed
    /// line. Reading stops at the first I/O error; whatever was read up to
    /// that point is kept.
    pub fn parse<R: Read>(reader: R) -> CategoryDocument {
        let mut state = ParseState::default();
        let mut buf_reader = BufReader::new(reader);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            match buf_reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Stopped reading category list: {}", e);
                    break;
                }
            }
            match std::str::from_utf8(&buf) {
                Ok(line) => state.feed(line),
                Err(e) => {
                    log::debug!("Skipping undecodable line: {}", e);
                    state.dropped += 1;
                }
            }
        }

        state.finish()
    }

    /// Parse a document held in memory.
    pub fn parse_str(text: &str) -> CategoryDocument {
        let mut state = ParseState::default();
        for line in text.lines() {
            state.feed(line);
        }
        state.finish()
    }
}

#[derive(Default)]
struct ParseState {
    majors: Vec<MajorCategory>,
    /// Set while the last major has an open minor to receive domains.
    has_minor: bool,
    dropped: usize,
}

impl ParseState {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        match classify(line) {
            Line::Major(name) => {
                self.majors.push(MajorCategory::new(correct_major_name(name)));
                self.has_minor = false;
            }
            Line::Minor(name) if !self.majors.is_empty() => {
                if let Some(major) = self.majors.last_mut() {
                    major.minors.push(MinorCategory::new(name));
                    self.has_minor = true;
                }
            }
            Line::Domain(domain) if self.has_minor => {
                if let Some(minor) = self
                    .majors
                    .last_mut()
                    .and_then(|major| major.minors.last_mut())
                {
                    minor.domains.push(domain.to_string());
                }
            }
            Line::Domain(_) | Line::Minor(_) => self.dropped += 1,
            Line::Ignored => {}
        }
    }

    fn finish(self) -> CategoryDocument {
        let mut doc = CategoryDocument::new(self.majors);
        doc.prune();
        log::debug!(
            "Parsed {} major categories, {} domains ({} orphan lines dropped)",
            doc.len(),
            doc.domain_count(),
            self.dropped
        );
        doc
    }
}
