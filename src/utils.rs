/// Calculates the byte offset of a 1-based line and column as reported by `serde_json`,
/// whose columns count bytes. The offset is clamped to the end of its line (or of the
/// source) and moved back onto a UTF-8 character boundary. A column of 0, which
/// `serde_json` reports when it fails right after a newline, maps to the start of that line.
pub fn line_column_to_offset(source: &[u8], line: usize, column: usize) -> usize {
    let mut line_start = 0;
    if line > 1 {
        let mut newlines = source
            .iter()
            .enumerate()
            .filter(|(_, &b)| b == b'\n')
            .map(|(i, _)| i + 1);
        match newlines.nth(line - 2) {
            Some(start) => line_start = start,
            None => return source.len(),
        }
    }

    let line_end = source[line_start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(source.len(), |i| line_start + i + 1);
    let mut offset = (line_start + column.saturating_sub(1)).min(line_end);
    while offset > line_start && offset < source.len() && source[offset] & 0xC0 == 0x80 {
        offset -= 1;
    }
    offset
}

/// Maps a byte offset into raw input onto the string miette renders, which is the
/// input decoded with `String::from_utf8_lossy`. Invalid bytes become U+FFFD there,
/// so offsets after them shift.
pub fn lossy_offset(source: &[u8], offset: usize) -> usize {
    let offset = offset.min(source.len());
    match std::str::from_utf8(&source[..offset]) {
        Ok(prefix) => prefix.len(),
        Err(_) => String::from_utf8_lossy(&source[..offset]).len(),
    }
}
