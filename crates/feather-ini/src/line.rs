use std::io::{self, BufRead};

const BOM: char = '\u{FEFF}';

/// Reads every line from `reader`, without line terminators.
///
/// A byte-order mark at the start of the input is dropped.
pub fn read_lines<R: BufRead>(reader: &mut R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = reader.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }

        let mut line = buffer.as_str();
        if let Some(stripped) = line.strip_suffix('\n') {
            line = stripped.strip_suffix('\r').unwrap_or(stripped);
        }

        if lines.is_empty() {
            line = line.strip_prefix(BOM).unwrap_or(line);
        }

        lines.push(line.to_string());
    }

    Ok(lines)
}
