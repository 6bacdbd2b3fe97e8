//! One-byte length-prefixed framing over a byte stream.

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Largest payload a single frame can carry.
pub const MAX_FRAME_LEN: usize = u8::MAX as usize;

/// Writes `payload` preceded by its length as one byte.
///
/// Payloads longer than [`MAX_FRAME_LEN`] are rejected rather than cut,
/// since a truncated ciphertext is not a whole number of blocks.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8]) -> Result<()> {
    let len = u8::try_from(payload.len()).map_err(|_| Error::FrameTooLarge {
        len: payload.len(),
    })?;
    writer.write_all(&[len])?;
    writer.write_all(payload)?;
    writer.flush()?;
    Ok(())
}

/// Reads one frame. Returns `Ok(None)` at end of stream; a zero-length frame
/// is an empty payload.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut len = [0u8; 1];
    match reader.read_exact(&mut len) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(err) => return Err(err.into()),
    }
    let mut payload = vec![0u8; usize::from(len[0])];
    reader.read_exact(&mut payload)?;
    Ok(Some(payload))
}
