use std::collections::btree_map::Entry;

use crate::document::{Document, DEFAULT_SECTION};
use crate::error::{IniError, IniResult};
use crate::flags::ParseFlags;
use crate::trim::{trim, trim_end, trim_start, DEFAULT_TRIM_CHARS, SECTION_TRIM_CHARS};

/// Feeds `lines` into `document`, stopping at the first duplicate.
pub fn parse_lines<I, S>(document: &mut Document, lines: I, flags: ParseFlags) -> IniResult<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = Parser::new(document, flags);
    for line in lines {
        parser.feed(line.as_ref())?;
    }
    Ok(())
}

/// Line-by-line parse state over a borrowed document.
pub struct Parser<'d> {
    document: &'d mut Document,
    flags: ParseFlags,
    section: String,
    line: usize,
}

impl<'d> Parser<'d> {
    /// Starts a parse that writes into the default section until a header
    /// is seen.
    pub fn new(document: &'d mut Document, flags: ParseFlags) -> Self {
        document.section_mut(DEFAULT_SECTION);
        Self {
            document,
            flags,
            section: DEFAULT_SECTION.to_string(),
            line: 0,
        }
    }

    /// Number of lines consumed so far.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Section that key/value lines currently land in.
    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn feed(&mut self, raw: &str) -> IniResult<()> {
        self.line += 1;

        let content = trim(strip_comments(raw, self.flags), DEFAULT_TRIM_CHARS);
        if content.is_empty() {
            return Ok(());
        }

        if content.starts_with('[') {
            self.enter_section(trim(content, SECTION_TRIM_CHARS))
        } else if let Some((key, value)) = content.split_once('=') {
            self.insert_pair(
                trim_end(key, DEFAULT_TRIM_CHARS),
                trim_start(value, DEFAULT_TRIM_CHARS),
            )
        } else {
            Ok(())
        }
    }

    fn enter_section(&mut self, name: &str) -> IniResult<()> {
        if name.is_empty() {
            self.document.section_mut(DEFAULT_SECTION);
            self.section = DEFAULT_SECTION.to_string();
            return Ok(());
        }

        if self.document.contains_section(name) {
            tracing::warn!(line = self.line, "duplicate section '{}'", name);
            return Err(IniError::DuplicateSection {
                name: name.to_string(),
                line: self.line,
            });
        }

        self.document.section_mut(name);
        self.section = name.to_string();
        Ok(())
    }

    fn insert_pair(&mut self, key: &str, value: &str) -> IniResult<()> {
        match self.document.section_mut(&self.section).entry(key.to_string()) {
            Entry::Occupied(_) => {
                tracing::warn!(
                    line = self.line,
                    "duplicate key '{}' in section '{}'",
                    key,
                    self.section
                );
                Err(IniError::DuplicateKey {
                    section: self.section.clone(),
                    key: key.to_string(),
                    line: self.line,
                })
            }
            Entry::Vacant(entry) => {
                entry.insert(value.to_string());
                Ok(())
            }
        }
    }
}

/// Cuts the line at the first enabled comment marker.
fn strip_comments(line: &str, flags: ParseFlags) -> &str {
    let mut line = line;
    if flags.strips_slash_comments() {
        if let Some(idx) = line.find("//") {
            line = &line[..idx];
        }
    }
    if flags.strips_hash_comments() {
        if let Some(idx) = line.find('#') {
            line = &line[..idx];
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(lines: &[&str], flags: ParseFlags) -> IniResult<Document> {
        let mut document = Document::new();
        parse_lines(&mut document, lines, flags)?;
        Ok(document)
    }

    #[test]
    fn comment_markers_only_apply_when_enabled() {
        let line = "url=http://host # primary";
        assert_eq!(strip_comments(line, ParseFlags::empty()), line);
        assert_eq!(strip_comments(line, ParseFlags::COMMENTS_SLASH), "url=http:");
        assert_eq!(
            strip_comments(line, ParseFlags::COMMENTS_HASH),
            "url=http://host "
        );
        assert_eq!(strip_comments(line, ParseFlags::COMMENTS_ALL), "url=http:");
    }

    #[test]
    fn earliest_marker_wins() {
        let flags = ParseFlags::COMMENTS_SLASH | ParseFlags::COMMENTS_HASH;
        assert_eq!(strip_comments("a=1 # x // y", flags), "a=1 ");
        assert_eq!(strip_comments("a=1 // x # y", flags), "a=1 ");
    }

    #[test]
    fn pairs_before_any_header_go_to_default_section() {
        let document = parse(&["top=1", "[s]", "inner=2"], ParseFlags::empty()).unwrap();
        assert_eq!(document.value(DEFAULT_SECTION, "top"), Some("1"));
        assert_eq!(document.value("s", "inner"), Some("2"));
        assert_eq!(document.value("s", "top"), None);
    }

    #[test]
    fn key_and_value_are_trimmed_towards_the_delimiter() {
        let document = parse(&["  key one  =  value  two  "], ParseFlags::empty()).unwrap();
        assert_eq!(document.value(DEFAULT_SECTION, "key one"), Some("value  two"));
    }

    #[test]
    fn value_keeps_later_equals_signs() {
        let document = parse(&["expr = a=b=c"], ParseFlags::empty()).unwrap();
        assert_eq!(document.value(DEFAULT_SECTION, "expr"), Some("a=b=c"));
    }

    #[test]
    fn lines_without_delimiter_are_ignored() {
        let document = parse(&["[s]", "just some words", "k=v"], ParseFlags::empty()).unwrap();
        assert_eq!(document.section("s").unwrap().len(), 1);
    }

    #[test]
    fn empty_header_returns_to_default_section() {
        let document = parse(&["[s]", "a=1", "[ ]", "b=2"], ParseFlags::empty()).unwrap();
        assert_eq!(document.value(DEFAULT_SECTION, "b"), Some("2"));
        assert_eq!(document.value("s", "b"), None);
    }

    #[test]
    fn header_name_keeps_inner_spaces() {
        let document = parse(&["[  my  section ]", "k=v"], ParseFlags::empty()).unwrap();
        assert_eq!(document.value("my  section", "k"), Some("v"));
    }

    #[test]
    fn duplicate_key_reports_line_and_section() {
        let err = parse(&["[s]", "", "k=1", "k = 2"], ParseFlags::empty()).unwrap_err();
        match err {
            IniError::DuplicateKey { section, key, line } => {
                assert_eq!(section, "s");
                assert_eq!(key, "k");
                assert_eq!(line, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn same_key_in_different_sections_is_allowed() {
        let document = parse(&["k=0", "[a]", "k=1", "[b]", "k=2"], ParseFlags::empty()).unwrap();
        assert_eq!(document.get("a", "k", ""), "1");
        assert_eq!(document.get("b", "k", ""), "2");
        assert_eq!(document.get(DEFAULT_SECTION, "k", ""), "0");
    }

    #[test]
    fn parser_counts_every_consumed_line() {
        let mut document = Document::new();
        let mut parser = Parser::new(&mut document, ParseFlags::empty());
        parser.feed("").unwrap();
        parser.feed("[s]").unwrap();
        parser.feed("   ").unwrap();
        assert_eq!(parser.line(), 3);
        assert_eq!(parser.section(), "s");
    }
}
