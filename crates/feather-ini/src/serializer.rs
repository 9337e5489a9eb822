use std::io::{self, Write};

use crate::document::{Document, Section};
use crate::flags::SaveFlags;

/// Renders `document` as output lines according to `flags`.
pub fn render_lines(document: &Document, flags: SaveFlags) -> Vec<String> {
    let mut lines = Vec::new();

    for (name, keys) in document.sections() {
        if flags.contains(SaveFlags::PRUNE) && keys.is_empty() {
            continue;
        }

        if !name.is_empty() {
            lines.push(format_header(name, flags));
        }

        render_pairs(&mut lines, name, keys, flags);

        if flags.contains(SaveFlags::PADDING_SECTIONS) {
            lines.push(String::new());
        }
    }

    lines
}

pub fn write_document<W: Write>(
    document: &Document,
    writer: &mut W,
    flags: SaveFlags,
) -> io::Result<()> {
    for line in render_lines(document, flags) {
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

fn format_header(name: &str, flags: SaveFlags) -> String {
    if flags.contains(SaveFlags::SPACE_SECTIONS) {
        format!("[ {name} ]")
    } else {
        format!("[{name}]")
    }
}

fn render_pairs(lines: &mut Vec<String>, section: &str, keys: &Section, flags: SaveFlags) {
    let indent = if flags.contains(SaveFlags::TAB_KEYS) && !section.is_empty() {
        "\t"
    } else {
        ""
    };
    let separator = if flags.contains(SaveFlags::SPACE_KEYS) {
        " = "
    } else {
        "="
    };
    let terminator = if flags.contains(SaveFlags::SEMICOLON_KEYS) {
        ";"
    } else {
        ""
    };

    for (key, value) in keys {
        if flags.contains(SaveFlags::PRUNE) && value.is_empty() {
            continue;
        }
        lines.push(format!("{indent}{key}{separator}{value}{terminator}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DEFAULT_SECTION;

    fn sample() -> Document {
        let mut document = Document::new();
        document.set(DEFAULT_SECTION, "global", "yes");
        document.set("net", "host", "localhost");
        document.set("net", "retries", "");
        document.select("empty");
        document
    }

    #[test]
    fn plain_output_keeps_everything() {
        let lines = render_lines(&sample(), SaveFlags::empty());
        assert_eq!(
            lines,
            vec!["global=yes", "[empty]", "[net]", "host=localhost", "retries="]
        );
    }

    #[test]
    fn prune_drops_empty_sections_and_values() {
        let lines = render_lines(&sample(), SaveFlags::PRUNE);
        assert_eq!(lines, vec!["global=yes", "[net]", "host=localhost"]);
    }

    #[test]
    fn tab_indent_skips_default_section() {
        let flags = SaveFlags::TAB_KEYS | SaveFlags::SEMICOLON_KEYS | SaveFlags::PRUNE;
        let lines = render_lines(&sample(), flags);
        assert_eq!(lines, vec!["global=yes;", "[net]", "\thost=localhost;"]);
    }

    #[test]
    fn padding_follows_every_emitted_section() {
        let flags = SaveFlags::PADDING_SECTIONS | SaveFlags::SPACE_SECTIONS;
        let lines = render_lines(&sample(), flags);
        assert_eq!(
            lines,
            vec![
                "global=yes",
                "",
                "[ empty ]",
                "",
                "[ net ]",
                "host=localhost",
                "retries=",
                "",
            ]
        );
    }

    #[test]
    fn empty_default_section_emits_nothing_without_padding() {
        let document = Document::new();
        assert!(render_lines(&document, SaveFlags::SPACE_KEYS).is_empty());
        assert_eq!(render_lines(&document, SaveFlags::PADDING_SECTIONS), vec![""]);
    }

    #[test]
    fn writer_receives_terminated_lines() {
        let mut out = Vec::new();
        write_document(&sample(), &mut out, SaveFlags::PRUNE | SaveFlags::SPACE_KEYS).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "global = yes\n[net]\nhost = localhost\n"
        );
    }
}
