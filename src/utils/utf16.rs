#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Utf16LeDecodeError {
    InvalidData,
}

/// Decode UTF-16 code units until the first NUL (0x0000), if present.
///
/// Unpaired surrogates are replaced with U+FFFD unless `strict` is set.
pub(crate) fn decode_utf16_units_z(
    units: &[u16],
    strict: bool,
) -> Result<String, Utf16LeDecodeError> {
    let end = units.iter().position(|&c| c == 0).unwrap_or(units.len());
    let slice = &units[..end];

    // Fast path: pure ASCII converts directly without surrogate handling.
    if slice.iter().all(|&c| c <= 0x7F) {
        return Ok(slice.iter().map(|&c| c as u8 as char).collect());
    }

    if strict {
        String::from_utf16(slice).map_err(|_| Utf16LeDecodeError::InvalidData)
    } else {
        Ok(String::from_utf16_lossy(slice))
    }
}

/// Number of UTF-16 code units `s` occupies, not counting a terminator.
pub(crate) fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
