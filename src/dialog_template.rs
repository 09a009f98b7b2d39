use crate::control_sequence::{read_controls, write_controls};
use crate::err::{
    DeserializationError, DeserializationResult, SerializationError, SerializationResult,
};
use crate::resource_id::ResourceId;
use crate::settings::DecodeSettings;
use crate::style::{
    DialogStyles, ExtendedWindowStyles, WindowStyles, flags_to_string, style_to_string,
};
use crate::template_variant::{Extended, FixedHeader, Standard, TemplateVariant, is_extended_template};
use crate::utils::{ByteCursor, ByteWriter, align_to_dword, utf16_len};

use log::{debug, trace};
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// A dialog box resource template.
///
/// `V` selects the binary layout (`Standard` for `DLGTEMPLATE`, `Extended` for
/// `DLGTEMPLATEEX`); the envelope fields and the encoding algorithm are shared.
///
/// The control count is not stored: it is always `controls.len()`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "")]
pub struct DialogTemplate<V: TemplateVariant> {
    /// X-coordinate, in dialog box units, of the upper-left corner.
    pub x: i16,
    /// Y-coordinate, in dialog box units, of the upper-left corner.
    pub y: i16,
    /// Width, in dialog box units.
    pub cx: i16,
    /// Height, in dialog box units.
    pub cy: i16,
    pub style: u32,
    pub extended_style: u32,
    pub menu_id: ResourceId,
    pub window_class_id: ResourceId,
    pub caption: String,
    /// Only encoded when `style` has a `DS_SETFONT` or `DS_SHELLFONT` bit.
    pub point_size: u16,
    /// Only encoded when `style` has a `DS_SETFONT` or `DS_SHELLFONT` bit.
    pub typeface: String,
    pub attributes: V::Attributes,
    /// Child controls, in z-order (which is also the tab order).
    pub controls: Vec<V::Control>,
}

impl<V: TemplateVariant> Default for DialogTemplate<V> {
    fn default() -> Self {
        DialogTemplate {
            x: 0,
            y: 0,
            cx: 0,
            cy: 0,
            style: 0,
            extended_style: 0,
            menu_id: ResourceId::None,
            window_class_id: ResourceId::None,
            caption: String::new(),
            point_size: 0,
            typeface: String::new(),
            attributes: V::Attributes::default(),
            controls: Vec::new(),
        }
    }
}

impl<V: TemplateVariant> DialogTemplate<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    /// Whether the font block (point size and typeface) is part of the encoding.
    pub fn has_font(&self) -> bool {
        DialogStyles::has_font(self.style)
    }

    pub fn from_bytes(data: &[u8]) -> DeserializationResult<Self> {
        Self::from_bytes_with_settings(data, &DecodeSettings::default())
    }

    pub fn from_bytes_with_settings(
        data: &[u8],
        settings: &DecodeSettings,
    ) -> DeserializationResult<Self> {
        let mut cursor = ByteCursor::with_settings(data, settings);
        let template = Self::read(&mut cursor)?;

        let remaining = cursor.remaining();
        if remaining > 0 {
            if !settings.should_allow_trailing_data() {
                return Err(DeserializationError::TrailingData {
                    offset: cursor.position(),
                    remaining,
                });
            }
            debug!("Ignoring {} bytes after the end of the template", remaining);
        }

        Ok(template)
    }

    /// Decodes one template starting at the cursor, leaving the cursor just past the last
    /// control (or past the font block when there are no controls).
    pub fn read(cursor: &mut ByteCursor<'_>) -> DeserializationResult<Self> {
        let (header, mut attributes) = V::read_fixed_header(cursor)?;
        debug!("Dialog template fixed header - {:?}", header);

        let menu_id = ResourceId::read(cursor, "menu")?;
        let window_class_id = ResourceId::read(cursor, "window class")?;
        let caption = cursor.utf16z("caption")?;

        let (point_size, typeface) = if DialogStyles::has_font(header.style) {
            let point_size = cursor.u16_named("point size")?;
            V::read_font_attributes(cursor, &mut attributes)?;
            let typeface = cursor.utf16z("typeface")?;
            trace!("Font block - {} pt, {:?}", point_size, typeface);
            (point_size, typeface)
        } else {
            (0, String::new())
        };

        let controls = read_controls::<V::Control>(cursor, header.control_count)?;

        Ok(DialogTemplate {
            x: header.x,
            y: header.y,
            cx: header.cx,
            cy: header.cy,
            style: header.style,
            extended_style: header.extended_style,
            menu_id,
            window_class_id,
            caption,
            point_size,
            typeface,
            attributes,
            controls,
        })
    }

    pub fn to_bytes(&self) -> SerializationResult<Vec<u8>> {
        let mut w = ByteWriter::with_capacity(self.estimated_len());
        self.write(&mut w)?;
        Ok(w.into_inner())
    }

    /// Encodes the template. The entity itself is left untouched.
    pub fn write<W: Write>(&self, w: &mut ByteWriter<W>) -> SerializationResult<()> {
        let control_count =
            u16::try_from(self.controls.len()).map_err(|_| SerializationError::ControlCountOverflow {
                count: self.controls.len(),
            })?;

        let header = FixedHeader {
            x: self.x,
            y: self.y,
            cx: self.cx,
            cy: self.cy,
            style: self.style,
            extended_style: self.extended_style,
            control_count,
        };

        V::write_fixed_header(&header, &self.attributes, w)?;

        self.menu_id.write(w)?;
        self.window_class_id.write(w)?;
        w.write_utf16z(&self.caption)?;

        if self.has_font() {
            w.write_u16(self.point_size)?;
            V::write_font_attributes(&self.attributes, w)?;
            w.write_utf16z(&self.typeface)?;
        }

        write_controls(&self.controls, w)
    }

    /// Lower bound on the encoded size, used to size the output buffer.
    fn estimated_len(&self) -> usize {
        let strings = utf16_len(&self.caption) + utf16_len(&self.typeface) + 2;
        align_to_dword(32 + strings * 2) + self.controls.len() * 32
    }
}

impl<V: TemplateVariant> fmt::Display for DialogTemplate<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (x, y) = (i32::from(self.x), i32::from(self.y));
        writeln!(
            f,
            "{}, {}, {}, {}",
            x,
            y,
            x + i32::from(self.cx),
            y + i32::from(self.cy)
        )?;

        let style = style_to_string::<WindowStyles, DialogStyles>(self.style);
        if !style.is_empty() {
            writeln!(f, "STYLE {}", style)?;
        }

        // Extended styles share no meaning with DS_* bits, so only WS_EX_* names apply here.
        let exstyle = flags_to_string::<ExtendedWindowStyles>(self.extended_style);
        if !exstyle.is_empty() {
            writeln!(f, "EXSTYLE {}", exstyle)?;
        }

        writeln!(f, "CAPTION \"{}\"", self.caption)?;
        writeln!(f, "FONT {}, \"{}\"", self.point_size, self.typeface)?;

        if !self.controls.is_empty() {
            writeln!(f, "{{")?;
            for control in &self.controls {
                writeln!(f, " {}", control)?;
            }
            writeln!(f, "}}")?;
        }

        Ok(())
    }
}

/// A template of either layout, as found in an `RT_DIALOG` resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "template", rename_all = "snake_case")]
pub enum AnyDialogTemplate {
    Standard(DialogTemplate<Standard>),
    Extended(DialogTemplate<Extended>),
}

impl AnyDialogTemplate {
    pub fn from_bytes(data: &[u8]) -> DeserializationResult<Self> {
        Self::from_bytes_with_settings(data, &DecodeSettings::default())
    }

    /// Decodes `data`, picking the layout from the `DLGTEMPLATEEX` signature.
    pub fn from_bytes_with_settings(
        data: &[u8],
        settings: &DecodeSettings,
    ) -> DeserializationResult<Self> {
        if is_extended_template(data) {
            debug!("Found an extended dialog template");
            Ok(AnyDialogTemplate::Extended(
                DialogTemplate::from_bytes_with_settings(data, settings)?,
            ))
        } else {
            debug!("Found a standard dialog template");
            Ok(AnyDialogTemplate::Standard(
                DialogTemplate::from_bytes_with_settings(data, settings)?,
            ))
        }
    }

    pub fn to_bytes(&self) -> SerializationResult<Vec<u8>> {
        match self {
            AnyDialogTemplate::Standard(t) => t.to_bytes(),
            AnyDialogTemplate::Extended(t) => t.to_bytes(),
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, AnyDialogTemplate::Extended(_))
    }
}

impl From<DialogTemplate<Standard>> for AnyDialogTemplate {
    fn from(t: DialogTemplate<Standard>) -> Self {
        AnyDialogTemplate::Standard(t)
    }
}

impl From<DialogTemplate<Extended>> for AnyDialogTemplate {
    fn from(t: DialogTemplate<Extended>) -> Self {
        AnyDialogTemplate::Extended(t)
    }
}

impl fmt::Display for AnyDialogTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyDialogTemplate::Standard(t) => fmt::Display::fmt(t, f),
            AnyDialogTemplate::Extended(t) => fmt::Display::fmt(t, f),
        }
    }
}
