use log::debug;

use crate::converter;
use crate::error::ScfError;
use crate::reader::Reader;

const LZMA_PROPERTIES_SIZE: usize = 5;

/// Unpack a compressed `.sc` file into the SCF tag stream.
///
/// The file stores a 32-bit unpacked size where a raw LZMA stream expects
/// 64 bits, so the standard 13-byte header is rebuilt before decoding.
pub fn decompress_sc(data: &[u8]) -> Result<Vec<u8>, ScfError> {
    let mut reader = Reader::new(data);
    let properties = reader.read_bytes(LZMA_PROPERTIES_SIZE)?;
    let size = reader.read_u32()?;
    let expected = converter::u32_to_usize(size)?;

    let mut stream = Vec::with_capacity(LZMA_PROPERTIES_SIZE + 8 + reader.remaining());
    stream.extend_from_slice(properties);
    stream.extend_from_slice(&u64::from(size).to_le_bytes());
    stream.extend_from_slice(reader.read_bytes(reader.remaining())?);

    let mut output = Vec::new();
    lzma_rs::lzma_decompress(&mut stream.as_slice(), &mut output)?;

    if output.len() != expected {
        return Err(ScfError::DecompressedSizeMismatch {
            expected,
            received: output.len(),
        });
    }

    debug!("decompressed {} bytes into {expected} bytes", data.len());
    Ok(output)
}
