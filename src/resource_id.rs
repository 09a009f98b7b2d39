use crate::err::DeserializationResult;
use crate::utils::{ByteCursor, ByteWriter};

use log::trace;
use serde::Serialize;
use std::fmt;
use std::io::{self, Write};

/// Marker word announcing that an ordinal follows.
const ORDINAL_MARKER: u16 = 0xFFFF;

/// A menu, window class or control reference, either by number or by name.
///
/// On the wire:
/// - `None` is a single `0x0000` word.
/// - `Ordinal(v)` is `0xFFFF` followed by `v`.
/// - `Name(s)` is the null-terminated UTF-16 text of `s`, starting in place of the marker word.
///
/// An empty name has the same encoding as `None`, so `ResourceId::from("")` yields `None`.
/// Names starting with U+FFFF or containing NUL would decode as something else and cannot be
/// encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(untagged)]
pub enum ResourceId {
    #[default]
    None,
    Ordinal(u16),
    Name(String),
}

impl ResourceId {
    pub fn is_none(&self) -> bool {
        matches!(self, ResourceId::None)
    }

    pub fn ordinal(&self) -> Option<u16> {
        match self {
            ResourceId::Ordinal(v) => Some(*v),
            _ => None,
        }
    }

    /// Decodes an identifier, leaving the cursor just past it.
    ///
    /// Any failure (truncated ordinal, unterminated name) is reported as `MalformedIdentifier`
    /// at the offset where the identifier starts, and the cursor is left where it was.
    pub fn read(cursor: &mut ByteCursor<'_>, what: &'static str) -> DeserializationResult<Self> {
        let start = cursor.position();
        let mut c = *cursor;

        let id = Self::read_inner(&mut c, what)
            .map_err(|e| e.into_malformed_identifier(what, start))?;

        trace!("Offset `0x{:08x}` {} = {:?}", start, what, id);

        *cursor = c;
        Ok(id)
    }

    fn read_inner(cursor: &mut ByteCursor<'_>, what: &'static str) -> DeserializationResult<Self> {
        let start = cursor.pos();

        match cursor.u16_named(what)? {
            0x0000 => Ok(ResourceId::None),
            ORDINAL_MARKER => Ok(ResourceId::Ordinal(cursor.u16_named(what)?)),
            _ => {
                // The word we just read is the first code unit of the name.
                cursor.set_pos(start, what)?;
                Ok(ResourceId::Name(cursor.utf16z(what)?))
            }
        }
    }

    /// Encodes the identifier. No padding is written.
    pub fn write<W: Write>(&self, w: &mut ByteWriter<W>) -> io::Result<()> {
        match self {
            ResourceId::None => w.write_u16(0),
            ResourceId::Ordinal(v) => {
                w.write_u16(ORDINAL_MARKER)?;
                w.write_u16(*v)
            }
            ResourceId::Name(name) => {
                if name.starts_with('\u{FFFF}') || name.contains('\0') {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("resource name {:?} has no unambiguous encoding", name),
                    ));
                }
                w.write_utf16z(name)
            }
        }
    }
}

impl From<u16> for ResourceId {
    fn from(v: u16) -> Self {
        ResourceId::Ordinal(v)
    }
}

impl From<&str> for ResourceId {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            ResourceId::None
        } else {
            ResourceId::Name(s.to_owned())
        }
    }
}

impl From<String> for ResourceId {
    fn from(s: String) -> Self {
        if s.is_empty() {
            ResourceId::None
        } else {
            ResourceId::Name(s)
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::None => Ok(()),
            ResourceId::Ordinal(v) => write!(f, "{}", v),
            ResourceId::Name(name) => write!(f, "{}", name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::DeserializationError;
    use pretty_assertions::assert_eq;

    fn encode(id: &ResourceId) -> Vec<u8> {
        let mut w = ByteWriter::buffered();
        id.write(&mut w).unwrap();
        w.into_inner()
    }

    fn decode(bytes: &[u8]) -> DeserializationResult<(ResourceId, usize)> {
        let mut cursor = ByteCursor::new(bytes);
        let id = ResourceId::read(&mut cursor, "menu")?;
        Ok((id, cursor.pos()))
    }

    #[test]
    fn test_none_is_a_single_zero_word() {
        assert_eq!(encode(&ResourceId::None), vec![0x00, 0x00]);
        assert_eq!(
            decode(&[0x00, 0x00, 0xAA]).unwrap(),
            (ResourceId::None, 2)
        );
    }

    #[test]
    fn test_ordinal_encoding() {
        assert_eq!(
            encode(&ResourceId::Ordinal(0x0080)),
            vec![0xFF, 0xFF, 0x80, 0x00]
        );
        assert_eq!(
            decode(&[0xFF, 0xFF, 0x2A, 0x00]).unwrap(),
            (ResourceId::Ordinal(42), 4)
        );
    }

    #[test]
    fn test_round_trips_boundary_ordinals_and_names() {
        for id in [
            ResourceId::None,
            ResourceId::Ordinal(0),
            ResourceId::Ordinal(1),
            ResourceId::Ordinal(0xFFFF),
            ResourceId::from("IDD_ABOUTBOX"),
            ResourceId::from("Ünïcødé"),
            ResourceId::from("😀"),
        ] {
            let bytes = encode(&id);
            let (decoded, consumed) = decode(&bytes).unwrap();
            assert_eq!(decoded, id);
            assert_eq!(consumed, bytes.len());
        }
    }

    #[test]
    fn test_name_consumes_length_plus_terminator() {
        let bytes = [b'M', 0, b'Y', 0, 0, 0, 0xFF, 0xFF];
        assert_eq!(
            decode(&bytes).unwrap(),
            (ResourceId::Name("MY".to_owned()), 6)
        );
    }

    #[test]
    fn test_empty_name_is_none() {
        assert_eq!(ResourceId::from(""), ResourceId::None);
        assert_eq!(ResourceId::from(String::new()), ResourceId::None);

        let bytes = encode(&ResourceId::Name(String::new()));
        assert_eq!(bytes, vec![0x00, 0x00]);
        assert_eq!(decode(&bytes).unwrap().0, ResourceId::None);
    }

    #[test]
    fn test_truncated_identifiers_are_malformed() {
        for bytes in [
            &[][..],
            &[0xFF][..],
            &[0xFF, 0xFF][..],
            &[0xFF, 0xFF, 0x01][..],
            &[b'A', 0x00][..],
            &[b'A', 0x00, b'B', 0x00, 0x00][..],
        ] {
            let mut cursor = ByteCursor::new(bytes);
            match ResourceId::read(&mut cursor, "class") {
                Err(DeserializationError::MalformedIdentifier { what, offset }) => {
                    assert_eq!(what, "class");
                    assert_eq!(offset, 0);
                }
                other => panic!("expected MalformedIdentifier for {:?}, got {:?}", bytes, other),
            }
            assert_eq!(cursor.pos(), 0, "cursor must not move on failure");
        }
    }

    #[test]
    fn test_unrepresentable_names_are_rejected() {
        for name in ["\u{FFFF}", "\u{FFFF}A", "A\0B", "\0"] {
            let mut w = ByteWriter::buffered();
            let err = ResourceId::Name(name.to_owned()).write(&mut w).unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "{:?}", name);
            assert_eq!(w.position(), 0);
        }

        // U+FFFF past the first code unit is an ordinary name.
        let id = ResourceId::from("A\u{FFFF}");
        let bytes = encode(&id);
        assert_eq!(decode(&bytes).unwrap(), (id, bytes.len()));
    }

    #[test]
    fn test_display() {
        assert_eq!(ResourceId::None.to_string(), "");
        assert_eq!(ResourceId::Ordinal(101).to_string(), "101");
        assert_eq!(ResourceId::from("MAINMENU").to_string(), "MAINMENU");
    }
}
