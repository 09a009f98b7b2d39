//! The counted, DWORD-aligned run of control records that closes every dialog template.

use crate::control::ControlRecord;
use crate::err::{DeserializationError, DeserializationResult, SerializationResult};
use crate::utils::{ByteCursor, ByteWriter, dump_cursor};

use log::{debug, log_enabled, Level};
use std::io::Write;

/// Smallest possible control record: fixed fields, two one-word identifiers and an empty
/// creation data count.
const MIN_CONTROL_LEN: usize = 24;

/// Reads exactly `count` controls, aligning the cursor to 4 bytes before each one.
///
/// A control that fails to decode (usually because fewer records are present than the header
/// declares) is reported as `ControlCountMismatch` wrapping the underlying failure.
pub fn read_controls<C: ControlRecord>(
    cursor: &mut ByteCursor<'_>,
    count: u16,
) -> DeserializationResult<Vec<C>> {
    let mut controls = Vec::with_capacity(initial_capacity(count, cursor.remaining()));

    for index in 0..count {
        cursor.align_up();
        let offset = cursor.position();

        match C::read(cursor) {
            Ok(control) => {
                debug!("Offset `0x{:08x}` control {} - {}", offset, index, control);
                controls.push(control);
            }
            Err(source) => {
                if log_enabled!(Level::Debug) {
                    debug!(
                        "Failed to read control {} of {}: {}{}",
                        index,
                        count,
                        source,
                        dump_cursor(cursor, 4)
                    );
                }

                return Err(DeserializationError::ControlCountMismatch {
                    index,
                    declared: count,
                    source: Box::new(source),
                });
            }
        }
    }

    Ok(controls)
}

/// Writes every control in order, padding the writer to 4 bytes before each one.
///
/// The matching count must already have been written by the fixed header.
/// The declared count comes from untrusted input, so never reserve more than the remaining
/// bytes could hold.
fn initial_capacity(count: u16, remaining: usize) -> usize {
    usize::from(count).min(remaining / MIN_CONTROL_LEN)
}

pub fn write_controls<C: ControlRecord, W: Write>(
    controls: &[C],
    w: &mut ByteWriter<W>,
) -> SerializationResult<()> {
    for control in controls {
        w.pad_to_dword()?;
        control.write(w)?;
    }

    Ok(())
}
