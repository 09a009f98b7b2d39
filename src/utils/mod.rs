mod byte_cursor;
mod byte_writer;
pub(crate) mod bytes;
mod hexdump;
mod utf16;

pub use self::byte_cursor::ByteCursor;
pub(crate) use self::byte_cursor::align_to_dword;
pub use self::byte_writer::ByteWriter;
pub use self::hexdump::{dump_cursor, hexdump};
pub(crate) use self::utf16::utf16_len;
