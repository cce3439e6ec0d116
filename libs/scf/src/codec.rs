use core::fmt;

use crate::error::ScfError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba4444,
    Rgba5551,
    Rgb565,
    Rgba8888,
    LuminanceAlpha88,
}

impl PixelFormat {
    /// Normalizes the raw format byte of a texture tag. Raw ids 2..=6 map
    /// in order onto the codec table, anything else is read as RGBA8888.
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            2 => Self::Rgba4444,
            3 => Self::Rgba5551,
            4 => Self::Rgb565,
            5 => Self::Rgba8888,
            6 => Self::LuminanceAlpha88,
            _ => Self::Rgba8888,
        }
    }

    /// Convert raw pixel data into RGBA8 bytes.
    pub fn decode(self, data: &[u8]) -> Result<Vec<u8>, ScfError> {
        match self {
            Self::Rgba4444 => Ok(decode_rgba4444(data)),
            Self::Rgba8888 => Ok(data.to_vec()),
            Self::Rgba5551 | Self::Rgb565 | Self::LuminanceAlpha88 => {
                Err(ScfError::UnsupportedPixelFormat { format: self })
            }
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rgba4444 => "RGBA4444",
            Self::Rgba5551 => "RGBA5551",
            Self::Rgb565 => "RGB565",
            Self::Rgba8888 => "RGBA8888",
            Self::LuminanceAlpha88 => "LA88",
        };
        f.write_str(name)
    }
}

fn expand4(v: u8) -> u8 {
    v * 17
}

/// Each little-endian pair `(lo, hi)` becomes
/// `(hi >> 4, hi & 0xF, lo >> 4, lo & 0xF)`. The channel meaning of the
/// nibbles is unconfirmed. A trailing odd byte is dropped.
fn decode_rgba4444(data: &[u8]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(data.len() / 2 * 4);
    for pair in data.chunks_exact(2) {
        let (lo, hi) = (pair[0], pair[1]);
        rgba.extend_from_slice(&[
            expand4(hi >> 4),
            expand4(hi & 0x0F),
            expand4(lo >> 4),
            expand4(lo & 0x0F),
        ]);
    }
    rgba
}
