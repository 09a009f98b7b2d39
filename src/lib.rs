#![deny(unused_must_use)]
#![forbid(unsafe_code)]
//! A codec for Windows dialog box resource templates (`RT_DIALOG`).
//!
//! Decodes the raw bytes of a dialog resource into a [`DialogTemplate`] and encodes it back,
//! bit-exact, in either the standard (`DLGTEMPLATE`) or the extended (`DLGTEMPLATEEX`) layout.
//!
//! ```
//! use dlgres::{DialogItem, DialogTemplate, PredefinedClass, ResourceId, Standard};
//!
//! let mut dialog = DialogTemplate::<Standard>::new();
//! dialog.style = 0x80C8_00C8; // WS_POPUP | WS_CAPTION | WS_SYSMENU | DS_SHELLFONT | DS_MODALFRAME
//! dialog.cx = 186;
//! dialog.cy = 95;
//! dialog.caption = "About".to_owned();
//! dialog.point_size = 8;
//! dialog.typeface = "MS Shell Dlg".to_owned();
//! dialog.controls.push(DialogItem {
//!     style: 0x5001_0001,
//!     x: 129,
//!     y: 74,
//!     cx: 50,
//!     cy: 14,
//!     id: 1,
//!     window_class: PredefinedClass::Button.into(),
//!     caption: ResourceId::from("OK"),
//!     ..Default::default()
//! });
//!
//! let bytes = dialog.to_bytes().unwrap();
//! let decoded = DialogTemplate::<Standard>::from_bytes(&bytes).unwrap();
//! assert_eq!(decoded, dialog);
//! println!("{}", decoded);
//! ```

pub use control::{ControlRecord, DialogItem, DialogItemEx, PredefinedClass};
pub use control_sequence::{read_controls, write_controls};
pub use dialog_template::{AnyDialogTemplate, DialogTemplate};
pub use resource_id::ResourceId;
pub use settings::DecodeSettings;
pub use template_variant::{
    Extended, ExtendedAttributes, FixedHeader, Standard, TemplateVariant, is_extended_template,
};
pub use utils::{ByteCursor, ByteWriter};

mod control;
mod control_sequence;
mod dialog_template;
mod resource_id;
mod settings;
mod template_variant;

pub mod err;
pub mod style;
pub mod utils;

// For tests, we only initialize logging once.
#[cfg(test)]
use std::sync::Once;

#[cfg(test)]
static LOGGER_INIT: Once = Once::new();

// Rust runs the tests concurrently, so unless we synchronize logging access
// it will crash when attempting to run `cargo test` with some logging facilities.
#[cfg(test)]
pub fn ensure_env_logger_initialized() {
    use std::io::Write;

    LOGGER_INIT.call_once(|| {
        let mut builder = env_logger::Builder::from_default_env();
        builder
            .format(|buf, record| writeln!(buf, "[{}] - {}", record.level(), record.args()))
            .init();
    });
}
