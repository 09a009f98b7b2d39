//! Named window, dialog and extended window style bits, and their textual rendering.
//!
//! Several style names share bits (`WS_GROUP`/`WS_MINIMIZEBOX`, `WS_TABSTOP`/`WS_MAXIMIZEBOX`),
//! and some are composites (`WS_CAPTION`, `DS_SHELLFONT`). When rendering, the first declared
//! name that is fully contained in the value wins and its bits are consumed, so every bit is
//! named at most once.

use bitflags::{Flags, bitflags};

bitflags! {
    /// `WS_*` window styles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowStyles: u32 {
        const WS_POPUP = 0x8000_0000;
        const WS_CHILD = 0x4000_0000;
        const WS_MINIMIZE = 0x2000_0000;
        const WS_VISIBLE = 0x1000_0000;
        const WS_DISABLED = 0x0800_0000;
        const WS_CLIPSIBLINGS = 0x0400_0000;
        const WS_CLIPCHILDREN = 0x0200_0000;
        const WS_MAXIMIZE = 0x0100_0000;
        const WS_CAPTION = 0x00C0_0000;
        const WS_BORDER = 0x0080_0000;
        const WS_DLGFRAME = 0x0040_0000;
        const WS_VSCROLL = 0x0020_0000;
        const WS_HSCROLL = 0x0010_0000;
        const WS_SYSMENU = 0x0008_0000;
        const WS_THICKFRAME = 0x0004_0000;
        const WS_GROUP = 0x0002_0000;
        const WS_TABSTOP = 0x0001_0000;
        const WS_MINIMIZEBOX = 0x0002_0000;
        const WS_MAXIMIZEBOX = 0x0001_0000;
    }
}

bitflags! {
    /// `DS_*` dialog box styles, stored in the low word of the template style.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DialogStyles: u32 {
        const DS_ABSALIGN = 0x0001;
        const DS_SYSMODAL = 0x0002;
        const DS_3DLOOK = 0x0004;
        const DS_LOCALEDIT = 0x0020;
        const DS_SHELLFONT = 0x0048;
        const DS_FIXEDSYS = 0x0008;
        const DS_NOFAILCREATE = 0x0010;
        const DS_SETFONT = 0x0040;
        const DS_MODALFRAME = 0x0080;
        const DS_NOIDLEMSG = 0x0100;
        const DS_SETFOREGROUND = 0x0200;
        const DS_CONTROL = 0x0400;
        const DS_CENTER = 0x0800;
        const DS_CENTERMOUSE = 0x1000;
        const DS_CONTEXTHELP = 0x2000;
    }
}

bitflags! {
    /// `WS_EX_*` extended window styles.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExtendedWindowStyles: u32 {
        const WS_EX_DLGMODALFRAME = 0x0000_0001;
        const WS_EX_NOPARENTNOTIFY = 0x0000_0004;
        const WS_EX_TOPMOST = 0x0000_0008;
        const WS_EX_ACCEPTFILES = 0x0000_0010;
        const WS_EX_TRANSPARENT = 0x0000_0020;
        const WS_EX_MDICHILD = 0x0000_0040;
        const WS_EX_TOOLWINDOW = 0x0000_0080;
        const WS_EX_WINDOWEDGE = 0x0000_0100;
        const WS_EX_CLIENTEDGE = 0x0000_0200;
        const WS_EX_CONTEXTHELP = 0x0000_0400;
        const WS_EX_RIGHT = 0x0000_1000;
        const WS_EX_RTLREADING = 0x0000_2000;
        const WS_EX_LEFTSCROLLBAR = 0x0000_4000;
        const WS_EX_CONTROLPARENT = 0x0001_0000;
        const WS_EX_STATICEDGE = 0x0002_0000;
        const WS_EX_APPWINDOW = 0x0004_0000;
        const WS_EX_LAYERED = 0x0008_0000;
        const WS_EX_NOINHERITLAYOUT = 0x0010_0000;
        const WS_EX_LAYOUTRTL = 0x0040_0000;
        const WS_EX_COMPOSITED = 0x0200_0000;
        const WS_EX_NOACTIVATE = 0x0800_0000;
    }
}

impl DialogStyles {
    /// The template carries a font block iff any `DS_SETFONT` or `DS_SHELLFONT` bit is set.
    ///
    /// `DS_SHELLFONT` is `DS_SETFONT | DS_FIXEDSYS`, so `DS_FIXEDSYS` alone also selects it.
    pub fn has_font(style: u32) -> bool {
        DialogStyles::from_bits_retain(style)
            .intersects(DialogStyles::DS_SETFONT | DialogStyles::DS_SHELLFONT)
    }
}

/// Names of the flags of `F` present in `bits`, in declaration order.
///
/// Unknown bits are ignored.
pub fn flag_names<F: Flags<Bits = u32>>(bits: u32) -> Vec<&'static str> {
    F::from_bits_retain(bits)
        .iter_names()
        .map(|(name, _)| name)
        .collect()
}

/// Renders the flags of `F` present in `bits` as `A | B | C`.
pub fn flags_to_string<F: Flags<Bits = u32>>(bits: u32) -> String {
    flag_names::<F>(bits).join(" | ")
}

/// Renders `bits` with the names of a basic style set followed by a specific one.
///
/// This is how a dialog `STYLE` line is built: `style_to_string::<WindowStyles, DialogStyles>`.
pub fn style_to_string<B, S>(bits: u32) -> String
where
    B: Flags<Bits = u32>,
    S: Flags<Bits = u32>,
{
    let mut names = flag_names::<B>(bits);
    names.extend(flag_names::<S>(bits));
    names.join(" | ")
}
