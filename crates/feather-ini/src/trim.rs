/// Characters stripped from both ends of every line before it is interpreted.
pub const DEFAULT_TRIM_CHARS: &[char] = &['\t', '\u{0B}', '\u{0C}', ';', ' '];

/// Characters stripped from a header line to obtain the section name.
pub const SECTION_TRIM_CHARS: &[char] = &['[', ']', ' '];

pub fn trim<'a>(value: &'a str, chars: &[char]) -> &'a str {
    value.trim_matches(chars)
}

pub fn trim_start<'a>(value: &'a str, chars: &[char]) -> &'a str {
    value.trim_start_matches(chars)
}

pub fn trim_end<'a>(value: &'a str, chars: &[char]) -> &'a str {
    value.trim_end_matches(chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_default_boundary_characters() {
        assert_eq!(trim("\t ;key=value; \u{0C}", DEFAULT_TRIM_CHARS), "key=value");
        assert_eq!(trim("  inner  space  ", DEFAULT_TRIM_CHARS), "inner  space");
    }

    #[test]
    fn empty_and_fully_trimmed_inputs_yield_empty() {
        assert_eq!(trim("", DEFAULT_TRIM_CHARS), "");
        assert_eq!(trim(" ;\t;\u{0B} ", DEFAULT_TRIM_CHARS), "");
    }

    #[test]
    fn directional_trims_leave_the_other_side() {
        assert_eq!(trim_end("  key  ", DEFAULT_TRIM_CHARS), "  key");
        assert_eq!(trim_start("  value  ", DEFAULT_TRIM_CHARS), "value  ");
    }

    #[test]
    fn section_chars_extract_the_name() {
        assert_eq!(trim("[ my section ]", SECTION_TRIM_CHARS), "my section");
        assert_eq!(trim("[[nested]]", SECTION_TRIM_CHARS), "nested");
        assert_eq!(trim("[]", SECTION_TRIM_CHARS), "");
    }
}
