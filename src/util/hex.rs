//! Hex dump formatting utilities.
//!
//! Helpers for formatting byte offsets and producing hex dumps of table
//! bytes. The sidebar can decode through the table's single-byte code page
//! so Cyrillic text stays readable next to the hex columns.

use encoding_rs::Encoding;

const BYTES_PER_LINE: usize = 16;

/// Format a byte offset as "decimal (0xhex)".
pub fn format_offset(offset: u64) -> String {
    format!("{} (0x{:x})", offset, offset)
}

/// Format a u16 header value as hex with 0x prefix.
pub fn format_hex16(value: u16) -> String {
    format!("0x{:04x}", value)
}

/// Produce a hex dump of `data` with an ASCII sidebar.
///
/// Output format (16 bytes per line):
/// ```text
/// 00000000  xx xx xx xx xx xx xx xx  xx xx xx xx xx xx xx xx  |................|
/// ```
pub fn hex_dump(data: &[u8], base_offset: u64) -> String {
    dump_lines(data, base_offset, |byte| {
        if byte.is_ascii_graphic() || byte == b' ' {
            byte as char
        } else {
            '.'
        }
    })
}

/// Produce a hex dump whose sidebar decodes bytes through `encoding`.
///
/// Each byte is decoded on its own, so this is only meaningful for
/// single-byte code pages. Control characters and unmappable bytes show
/// as `.`.
pub fn hex_dump_with_encoding(data: &[u8], base_offset: u64, encoding: &'static Encoding) -> String {
    dump_lines(data, base_offset, |byte| {
        let buf = [byte];
        let (text, had_errors) = encoding.decode_without_bom_handling(&buf);
        match text.chars().next() {
            Some(c) if !had_errors && !c.is_control() => c,
            _ => '.',
        }
    })
}

fn dump_lines(data: &[u8], base_offset: u64, sidebar: impl Fn(u8) -> char) -> String {
    let mut lines = Vec::with_capacity(data.len().div_ceil(BYTES_PER_LINE));

    for (i, chunk) in data.chunks(BYTES_PER_LINE).enumerate() {
        let offset = base_offset + (i * BYTES_PER_LINE) as u64;
        let mut line = format!("{:08x}  ", offset);

        for j in 0..BYTES_PER_LINE {
            if j == BYTES_PER_LINE / 2 {
                line.push(' ');
            }
            match chunk.get(j) {
                Some(byte) => line.push_str(&format!("{:02x} ", byte)),
                None => line.push_str("   "),
            }
        }

        line.push_str(" |");
        line.extend(chunk.iter().map(|&b| sidebar(b)));
        for _ in chunk.len()..BYTES_PER_LINE {
            line.push(' ');
        }
        line.push('|');

        lines.push(line);
    }

    lines.join("\n")
}
