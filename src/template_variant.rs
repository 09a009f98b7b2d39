//! Fixed headers of the two dialog template layouts.
//!
//! `DLGTEMPLATE` (standard):
//!
//! | Field | Type |
//! |---|---|
//! | style | u32 |
//! | dwExtendedStyle | u32 |
//! | cdit | u16 |
//! | x, y, cx, cy | i16 |
//!
//! `DLGTEMPLATEEX` (extended):
//!
//! | Field | Type |
//! |---|---|
//! | dlgVer | u16 (`1`) |
//! | signature | u16 (`0xFFFF`) |
//! | helpID | u32 |
//! | exStyle | u32 |
//! | style | u32 |
//! | cDlgItems | u16 |
//! | x, y, cx, cy | i16 |
//!
//! The extended layout also carries `weight: u16, italic: u8, charset: u8` between the point
//! size and the typeface of the font block.

use crate::control::{ControlRecord, DialogItem, DialogItemEx};
use crate::err::{DeserializationError, DeserializationResult, SerializationResult};
use crate::utils::{ByteCursor, ByteWriter};

use serde::Serialize;
use std::fmt::Debug;
use std::io::Write;

pub const EXTENDED_TEMPLATE_VERSION: u16 = 1;
pub const EXTENDED_TEMPLATE_SIGNATURE: u16 = 0xFFFF;

/// Geometry, styles and control count shared by every layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedHeader {
    pub x: i16,
    pub y: i16,
    pub cx: i16,
    pub cy: i16,
    pub style: u32,
    pub extended_style: u32,
    pub control_count: u16,
}

/// The layout-specific parts of a dialog template.
///
/// The envelope (`DialogTemplate`) runs the same algorithm for every layout and calls back into
/// the variant for the fixed header, the extra font attributes and the control records.
pub trait TemplateVariant {
    /// Fields only this layout stores.
    type Attributes: Debug + Clone + PartialEq + Default + Serialize;
    type Control: ControlRecord + Debug + Clone + PartialEq + Serialize;

    fn read_fixed_header(
        cursor: &mut ByteCursor<'_>,
    ) -> DeserializationResult<(FixedHeader, Self::Attributes)>;

    fn write_fixed_header<W: Write>(
        header: &FixedHeader,
        attributes: &Self::Attributes,
        w: &mut ByteWriter<W>,
    ) -> SerializationResult<()>;

    /// Reads font fields stored between the point size and the typeface.
    fn read_font_attributes(
        _cursor: &mut ByteCursor<'_>,
        _attributes: &mut Self::Attributes,
    ) -> DeserializationResult<()> {
        Ok(())
    }

    fn write_font_attributes<W: Write>(
        _attributes: &Self::Attributes,
        _w: &mut ByteWriter<W>,
    ) -> SerializationResult<()> {
        Ok(())
    }
}

/// `DLGTEMPLATE` with `DLGITEMTEMPLATE` controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Standard;

impl TemplateVariant for Standard {
    type Attributes = ();
    type Control = DialogItem;

    fn read_fixed_header(cursor: &mut ByteCursor<'_>) -> DeserializationResult<(FixedHeader, ())> {
        let style = cursor.u32_named("style")?;
        let extended_style = cursor.u32_named("extended style")?;
        let control_count = cursor.u16_named("control count")?;
        let x = cursor.i16_named("x")?;
        let y = cursor.i16_named("y")?;
        let cx = cursor.i16_named("cx")?;
        let cy = cursor.i16_named("cy")?;

        Ok((
            FixedHeader {
                x,
                y,
                cx,
                cy,
                style,
                extended_style,
                control_count,
            },
            (),
        ))
    }

    fn write_fixed_header<W: Write>(
        header: &FixedHeader,
        _attributes: &(),
        w: &mut ByteWriter<W>,
    ) -> SerializationResult<()> {
        w.write_u32(header.style)?;
        w.write_u32(header.extended_style)?;
        w.write_u16(header.control_count)?;
        w.write_i16(header.x)?;
        w.write_i16(header.y)?;
        w.write_i16(header.cx)?;
        w.write_i16(header.cy)?;
        Ok(())
    }
}

/// `DLGTEMPLATEEX` with `DLGITEMTEMPLATEEX` controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extended;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ExtendedAttributes {
    pub help_id: u32,
    /// Font weight (`FW_*`), present only with a font block.
    pub weight: u16,
    /// Non-zero for an italic font, present only with a font block.
    pub italic: u8,
    /// Font character set, present only with a font block.
    pub charset: u8,
}

impl TemplateVariant for Extended {
    type Attributes = ExtendedAttributes;
    type Control = DialogItemEx;

    fn read_fixed_header(
        cursor: &mut ByteCursor<'_>,
    ) -> DeserializationResult<(FixedHeader, ExtendedAttributes)> {
        let version = cursor.u16_named("dialog version")?;
        let signature = cursor.u16_named("dialog signature")?;

        if version != EXTENDED_TEMPLATE_VERSION || signature != EXTENDED_TEMPLATE_SIGNATURE {
            return Err(DeserializationError::InvalidExtendedSignature { version, signature });
        }

        let help_id = cursor.u32_named("help id")?;
        let extended_style = cursor.u32_named("extended style")?;
        let style = cursor.u32_named("style")?;
        let control_count = cursor.u16_named("control count")?;
        let x = cursor.i16_named("x")?;
        let y = cursor.i16_named("y")?;
        let cx = cursor.i16_named("cx")?;
        let cy = cursor.i16_named("cy")?;

        Ok((
            FixedHeader {
                x,
                y,
                cx,
                cy,
                style,
                extended_style,
                control_count,
            },
            ExtendedAttributes {
                help_id,
                ..Default::default()
            },
        ))
    }

    fn write_fixed_header<W: Write>(
        header: &FixedHeader,
        attributes: &ExtendedAttributes,
        w: &mut ByteWriter<W>,
    ) -> SerializationResult<()> {
        w.write_u16(EXTENDED_TEMPLATE_VERSION)?;
        w.write_u16(EXTENDED_TEMPLATE_SIGNATURE)?;
        w.write_u32(attributes.help_id)?;
        w.write_u32(header.extended_style)?;
        w.write_u32(header.style)?;
        w.write_u16(header.control_count)?;
        w.write_i16(header.x)?;
        w.write_i16(header.y)?;
        w.write_i16(header.cx)?;
        w.write_i16(header.cy)?;
        Ok(())
    }

    fn read_font_attributes(
        cursor: &mut ByteCursor<'_>,
        attributes: &mut ExtendedAttributes,
    ) -> DeserializationResult<()> {
        attributes.weight = cursor.u16_named("font weight")?;
        attributes.italic = cursor.u8_named("font italic")?;
        attributes.charset = cursor.u8_named("font charset")?;
        Ok(())
    }

    fn write_font_attributes<W: Write>(
        attributes: &ExtendedAttributes,
        w: &mut ByteWriter<W>,
    ) -> SerializationResult<()> {
        w.write_u16(attributes.weight)?;
        w.write_u8(attributes.italic)?;
        w.write_u8(attributes.charset)?;
        Ok(())
    }
}

/// Whether `data` starts with the `DLGTEMPLATEEX` version/signature pair.
pub fn is_extended_template(data: &[u8]) -> bool {
    let mut cursor = ByteCursor::new(data);
    matches!(
        (cursor.u16_named("dialog version"), cursor.u16_named("dialog signature")),
        (Ok(EXTENDED_TEMPLATE_VERSION), Ok(EXTENDED_TEMPLATE_SIGNATURE))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header() -> FixedHeader {
        FixedHeader {
            x: 0,
            y: -10,
            cx: 186,
            cy: 95,
            style: 0x80C8_00C8,
            extended_style: 0x0000_0100,
            control_count: 3,
        }
    }

    #[test]
    fn test_standard_header_layout() {
        let mut w = ByteWriter::buffered();
        Standard::write_fixed_header(&header(), &(), &mut w).unwrap();
        let bytes = w.into_inner();

        assert_eq!(
            bytes,
            vec![
                0xC8, 0x00, 0xC8, 0x80, // style
                0x00, 0x01, 0x00, 0x00, // extended style
                0x03, 0x00, // cdit
                0x00, 0x00, 0xF6, 0xFF, 0xBA, 0x00, 0x5F, 0x00, // x, y, cx, cy
            ]
        );

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(
            Standard::read_fixed_header(&mut cursor).unwrap(),
            (header(), ())
        );
        assert_eq!(cursor.pos(), 18);
    }

    #[test]
    fn test_extended_header_layout() {
        let attributes = ExtendedAttributes {
            help_id: 0x1234,
            ..Default::default()
        };

        let mut w = ByteWriter::buffered();
        Extended::write_fixed_header(&header(), &attributes, &mut w).unwrap();
        let bytes = w.into_inner();

        assert_eq!(bytes.len(), 26);
        assert_eq!(&bytes[..8], &[0x01, 0x00, 0xFF, 0xFF, 0x34, 0x12, 0x00, 0x00]);
        assert!(is_extended_template(&bytes));

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(
            Extended::read_fixed_header(&mut cursor).unwrap(),
            (header(), attributes)
        );
    }

    #[test]
    fn test_extended_header_rejects_bad_signature() {
        let mut bytes = vec![0x01, 0x00, 0xFE, 0xFF];
        bytes.extend_from_slice(&[0; 22]);

        let mut cursor = ByteCursor::new(&bytes);
        assert!(matches!(
            Extended::read_fixed_header(&mut cursor),
            Err(DeserializationError::InvalidExtendedSignature {
                version: 1,
                signature: 0xFFFE
            })
        ));
        assert!(!is_extended_template(&bytes));
        assert!(!is_extended_template(&[0x01]));
    }

    #[test]
    fn test_extended_font_attributes() {
        let attributes = ExtendedAttributes {
            help_id: 0,
            weight: 700,
            italic: 1,
            charset: 0xEE,
        };

        let mut w = ByteWriter::buffered();
        Extended::write_font_attributes(&attributes, &mut w).unwrap();
        let bytes = w.into_inner();
        assert_eq!(bytes, vec![0xBC, 0x02, 0x01, 0xEE]);

        let mut decoded = ExtendedAttributes::default();
        let mut cursor = ByteCursor::new(&bytes);
        Extended::read_font_attributes(&mut cursor, &mut decoded).unwrap();
        assert_eq!(decoded, attributes);
    }
}
