use std::fmt::Write;

use crate::utils::ByteCursor;

/// Canonical hex display (`hexdump -C` style).
///
/// Each line holds the offset in hexadecimal, sixteen space-separated two-column bytes, and the
/// same sixteen bytes as printable ASCII enclosed in `|` characters. `offset` is added to the
/// printed addresses.
pub fn hexdump(data: &[u8], offset: usize) -> String {
    let mut out = String::with_capacity(data.len() * 4 + 16);

    for (line_no, line) in data.chunks(16).enumerate() {
        format_line(&mut out, line, offset + line_no * 16);
    }

    out
}

fn format_line(out: &mut String, line: &[u8], address: usize) {
    let _ = write!(out, "{:08x}:", address);

    for b in line {
        let _ = write!(out, " {:02x}", b);
    }

    // align the ASCII column on short lines
    for _ in line.len()..16 {
        out.push_str("   ");
    }

    out.push_str("  |");
    for &c in line {
        // replace all control chars with dots
        if c.is_ascii_graphic() || c == b' ' {
            out.push(c as char);
        } else {
            out.push('.');
        }
    }
    out.push_str("|\n");
}

/// Dumps `lines_to_dump` lines of 16 bytes around the cursor position.
///
/// Used to add context to debug logs when a template fails to decode.
pub fn dump_cursor(cursor: &ByteCursor<'_>, lines_to_dump: usize) -> String {
    let pos = cursor.pos().min(cursor.buf().len());
    let start = pos.saturating_sub(lines_to_dump / 2 * 16) & !0xF;
    let end = (start + lines_to_dump * 16).min(cursor.buf().len());

    let mut s = format!("\n\n---------------------------------\nCurrent value {:08x}\n", pos);
    s.push_str(&hexdump(&cursor.buf()[start..end], start));
    s.push_str("---------------------------------\n");
    s
}
