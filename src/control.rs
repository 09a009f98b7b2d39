use crate::err::{DeserializationResult, SerializationError, SerializationResult};
use crate::resource_id::ResourceId;
use crate::utils::{ByteCursor, ByteWriter};

use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::io::Write;

/// One child control record inside a dialog template.
///
/// The template envelope aligns the cursor (or pads the writer) to a 4-byte boundary before
/// handing it over, so implementations only deal with their own fields.
pub trait ControlRecord: Sized + fmt::Display {
    fn read(cursor: &mut ByteCursor<'_>) -> DeserializationResult<Self>;

    fn write<W: Write>(&self, w: &mut ByteWriter<W>) -> SerializationResult<()>;
}

/// Window classes that the dialog manager knows by atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum PredefinedClass {
    Button = 0x0080,
    Edit = 0x0081,
    Static = 0x0082,
    ListBox = 0x0083,
    ScrollBar = 0x0084,
    ComboBox = 0x0085,
}

impl PredefinedClass {
    pub fn from_ordinal(ordinal: u16) -> Option<Self> {
        match ordinal {
            0x0080 => Some(PredefinedClass::Button),
            0x0081 => Some(PredefinedClass::Edit),
            0x0082 => Some(PredefinedClass::Static),
            0x0083 => Some(PredefinedClass::ListBox),
            0x0084 => Some(PredefinedClass::ScrollBar),
            0x0085 => Some(PredefinedClass::ComboBox),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PredefinedClass::Button => "BUTTON",
            PredefinedClass::Edit => "EDIT",
            PredefinedClass::Static => "STATIC",
            PredefinedClass::ListBox => "LISTBOX",
            PredefinedClass::ScrollBar => "SCROLLBAR",
            PredefinedClass::ComboBox => "COMBOBOX",
        }
    }
}

impl From<PredefinedClass> for ResourceId {
    fn from(class: PredefinedClass) -> Self {
        ResourceId::Ordinal(class as u16)
    }
}

fn class_display(class: &ResourceId) -> Cow<'_, str> {
    match class {
        ResourceId::Ordinal(v) => match PredefinedClass::from_ordinal(*v) {
            Some(predefined) => Cow::Borrowed(predefined.name()),
            None => Cow::Owned(format!("{}", v)),
        },
        ResourceId::Name(name) => Cow::Owned(format!("\"{}\"", name)),
        ResourceId::None => Cow::Borrowed("\"\""),
    }
}

fn title_display(title: &ResourceId) -> Cow<'_, str> {
    match title {
        ResourceId::Ordinal(v) => Cow::Owned(format!("{}", v)),
        ResourceId::Name(name) => Cow::Owned(format!("\"{}\"", name)),
        ResourceId::None => Cow::Borrowed("\"\""),
    }
}

/// Reads the `u16` byte count and the creation data that follows it.
fn read_creation_data(cursor: &mut ByteCursor<'_>) -> DeserializationResult<Vec<u8>> {
    let len = cursor.u16_named("creation data size")?;
    Ok(cursor.take_bytes(usize::from(len), "creation data")?.to_vec())
}

fn write_creation_data<W: Write>(data: &[u8], w: &mut ByteWriter<W>) -> SerializationResult<()> {
    let len = u16::try_from(data.len())
        .map_err(|_| SerializationError::CreationDataOverflow { len: data.len() })?;
    w.write_u16(len)?;
    w.write_bytes(data)?;
    Ok(())
}

/// A control of a standard (`DLGTEMPLATE`) dialog, stored as a `DLGITEMTEMPLATE`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DialogItem {
    pub style: u32,
    pub extended_style: u32,
    pub x: i16,
    pub y: i16,
    pub cx: i16,
    pub cy: i16,
    pub id: u16,
    pub window_class: ResourceId,
    pub caption: ResourceId,
    pub creation_data: Vec<u8>,
}

impl ControlRecord for DialogItem {
    fn read(cursor: &mut ByteCursor<'_>) -> DeserializationResult<Self> {
        let style = cursor.u32_named("control style")?;
        let extended_style = cursor.u32_named("control extended style")?;
        let x = cursor.i16_named("control x")?;
        let y = cursor.i16_named("control y")?;
        let cx = cursor.i16_named("control cx")?;
        let cy = cursor.i16_named("control cy")?;
        let id = cursor.u16_named("control id")?;
        let window_class = ResourceId::read(cursor, "control class")?;
        let caption = ResourceId::read(cursor, "control caption")?;
        let creation_data = read_creation_data(cursor)?;

        Ok(DialogItem {
            style,
            extended_style,
            x,
            y,
            cx,
            cy,
            id,
            window_class,
            caption,
            creation_data,
        })
    }

    fn write<W: Write>(&self, w: &mut ByteWriter<W>) -> SerializationResult<()> {
        w.write_u32(self.style)?;
        w.write_u32(self.extended_style)?;
        w.write_i16(self.x)?;
        w.write_i16(self.y)?;
        w.write_i16(self.cx)?;
        w.write_i16(self.cy)?;
        w.write_u16(self.id)?;
        self.window_class.write(w)?;
        self.caption.write(w)?;
        write_creation_data(&self.creation_data, w)
    }
}

impl fmt::Display for DialogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CONTROL {}, {}, {}, 0x{:08X}, {}, {}, {}, {}",
            title_display(&self.caption),
            self.id,
            class_display(&self.window_class),
            self.style,
            self.x,
            self.y,
            self.cx,
            self.cy
        )?;

        if self.extended_style != 0 {
            write!(f, ", 0x{:08X}", self.extended_style)?;
        }

        Ok(())
    }
}

/// A control of an extended (`DLGTEMPLATEEX`) dialog, stored as a `DLGITEMTEMPLATEEX`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DialogItemEx {
    pub help_id: u32,
    pub extended_style: u32,
    pub style: u32,
    pub x: i16,
    pub y: i16,
    pub cx: i16,
    pub cy: i16,
    pub id: u32,
    pub window_class: ResourceId,
    pub caption: ResourceId,
    pub creation_data: Vec<u8>,
}

impl ControlRecord for DialogItemEx {
    fn read(cursor: &mut ByteCursor<'_>) -> DeserializationResult<Self> {
        let help_id = cursor.u32_named("control help id")?;
        let extended_style = cursor.u32_named("control extended style")?;
        let style = cursor.u32_named("control style")?;
        let x = cursor.i16_named("control x")?;
        let y = cursor.i16_named("control y")?;
        let cx = cursor.i16_named("control cx")?;
        let cy = cursor.i16_named("control cy")?;
        let id = cursor.u32_named("control id")?;
        let window_class = ResourceId::read(cursor, "control class")?;
        let caption = ResourceId::read(cursor, "control caption")?;
        let creation_data = read_creation_data(cursor)?;

        Ok(DialogItemEx {
            help_id,
            extended_style,
            style,
            x,
            y,
            cx,
            cy,
            id,
            window_class,
            caption,
            creation_data,
        })
    }

    fn write<W: Write>(&self, w: &mut ByteWriter<W>) -> SerializationResult<()> {
        w.write_u32(self.help_id)?;
        w.write_u32(self.extended_style)?;
        w.write_u32(self.style)?;
        w.write_i16(self.x)?;
        w.write_i16(self.y)?;
        w.write_i16(self.cx)?;
        w.write_i16(self.cy)?;
        w.write_u32(self.id)?;
        self.window_class.write(w)?;
        self.caption.write(w)?;
        write_creation_data(&self.creation_data, w)
    }
}

impl fmt::Display for DialogItemEx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CONTROL {}, {}, {}, 0x{:08X}, {}, {}, {}, {}",
            title_display(&self.caption),
            self.id,
            class_display(&self.window_class),
            self.style,
            self.x,
            self.y,
            self.cx,
            self.cy
        )?;

        // The help id is positional, so the extended style is printed whenever it is present.
        if self.extended_style != 0 || self.help_id != 0 {
            write!(f, ", 0x{:08X}", self.extended_style)?;
        }
        if self.help_id != 0 {
            write!(f, ", {}", self.help_id)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::DeserializationError;
    use pretty_assertions::assert_eq;

    fn ok_button() -> DialogItem {
        DialogItem {
            style: 0x5001_0001,
            extended_style: 0,
            x: 7,
            y: 41,
            cx: 50,
            cy: 14,
            id: 1,
            window_class: PredefinedClass::Button.into(),
            caption: ResourceId::from("OK"),
            creation_data: vec![],
        }
    }

    #[test]
    fn test_dialog_item_layout() {
        let mut w = ByteWriter::buffered();
        ok_button().write(&mut w).unwrap();

        let expected: Vec<u8> = vec![
            0x01, 0x00, 0x01, 0x50, // style
            0x00, 0x00, 0x00, 0x00, // extended style
            0x07, 0x00, 0x29, 0x00, 0x32, 0x00, 0x0E, 0x00, // x, y, cx, cy
            0x01, 0x00, // id
            0xFF, 0xFF, 0x80, 0x00, // class: BUTTON
            b'O', 0x00, b'K', 0x00, 0x00, 0x00, // caption
            0x00, 0x00, // creation data size
        ];
        assert_eq!(w.into_inner(), expected);
    }

    #[test]
    fn test_dialog_item_reads_back() {
        let mut item = ok_button();
        item.creation_data = vec![0xDE, 0xAD, 0xBE];
        item.window_class = ResourceId::from("SysListView32");

        let mut w = ByteWriter::buffered();
        item.write(&mut w).unwrap();
        let bytes = w.into_inner();

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(DialogItem::read(&mut cursor).unwrap(), item);
        assert_eq!(cursor.pos(), bytes.len());
    }

    #[test]
    fn test_dialog_item_ex_reads_back() {
        let item = DialogItemEx {
            help_id: 77,
            extended_style: 0x0000_0200,
            style: 0x5081_0080,
            x: -3,
            y: 9,
            cx: 120,
            cy: 12,
            id: 0x0001_0000,
            window_class: PredefinedClass::Edit.into(),
            caption: ResourceId::None,
            creation_data: vec![1, 2, 3, 4],
        };

        let mut w = ByteWriter::buffered();
        item.write(&mut w).unwrap();
        let bytes = w.into_inner();
        // 24 bytes of fixed fields, class ordinal, empty caption, size word, data.
        assert_eq!(bytes.len(), 24 + 4 + 2 + 2 + 4);

        let mut cursor = ByteCursor::new(&bytes);
        assert_eq!(DialogItemEx::read(&mut cursor).unwrap(), item);
    }

    #[test]
    fn test_truncated_creation_data() {
        let mut w = ByteWriter::buffered();
        ok_button().write(&mut w).unwrap();
        let mut bytes = w.into_inner();
        let len = bytes.len();
        // Claim 8 bytes of creation data that are not there.
        bytes[len - 2] = 8;

        let mut cursor = ByteCursor::new(&bytes);
        assert!(matches!(
            DialogItem::read(&mut cursor),
            Err(DeserializationError::Truncated {
                what: "creation data",
                ..
            })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ok_button().to_string(),
            "CONTROL \"OK\", 1, BUTTON, 0x50010001, 7, 41, 50, 14"
        );

        let icon = DialogItemEx {
            help_id: 5,
            style: 0x5000_0003,
            id: 0xFFFF_FFFF,
            window_class: PredefinedClass::Static.into(),
            caption: ResourceId::Ordinal(128),
            cx: 21,
            cy: 20,
            ..Default::default()
        };
        assert_eq!(
            icon.to_string(),
            "CONTROL 128, 4294967295, STATIC, 0x50000003, 0, 0, 21, 20, 0x00000000, 5"
        );
    }
}
