//! Splits a raw SKILL.md document into its frontmatter block and body.

use super::error::DocumentError;

/// Line that opens and closes the frontmatter block.
pub const DELIMITER: &[u8] = b"---";

/// Split raw document bytes on the first two `---` lines.
///
/// Anything before the first delimiter is discarded. Returns the bytes between
/// the delimiters and the remaining text trimmed of surrounding whitespace.
pub fn split_frontmatter(data: &[u8]) -> Result<(&[u8], String), DocumentError> {
    let mut delimiters = delimiter_lines(data);
    let (_, block_start) = delimiters
        .next()
        .ok_or(DocumentError::MissingFrontmatter)?;
    let (block_end, body_start) = delimiters
        .next()
        .ok_or(DocumentError::MissingFrontmatter)?;

    let frontmatter = &data[block_start..block_end];
    let body = String::from_utf8_lossy(&data[body_start..])
        .trim()
        .to_string();

    Ok((frontmatter, body))
}

/// Yields `(line_start, next_line_start)` for every delimiter line.
fn delimiter_lines(data: &[u8]) -> impl Iterator<Item = (usize, usize)> + '_ {
    let mut offset = 0;
    data.split_inclusive(|b| *b == b'\n').filter_map(move |line| {
        let start = offset;
        offset += line.len();
        let content = line.strip_suffix(b"\n").unwrap_or(line);
        let content = content.strip_suffix(b"\r").unwrap_or(content);
        (content == DELIMITER).then_some((start, offset))
    })
}
