use image::RgbaImage;
use log::debug;

use crate::codec::PixelFormat;
use crate::error::ScfError;
use crate::reader::Reader;

/// Format byte, u16 width, u16 height
pub const TEXTURE_HEADER_SIZE: usize = 5;

/// Decoded texture sheet.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Format byte as stored in the tag
    pub raw_format: u8,
    pub format: PixelFormat,
    pub image: RgbaImage,
}

impl Texture {
    pub fn parse(body: &[u8]) -> Result<Self, ScfError> {
        let mut reader = Reader::new(body);
        let raw_format = reader.read_u8()?;
        let width = reader.read_u16()?;
        let height = reader.read_u16()?;

        let format = PixelFormat::from_raw(raw_format);
        let rgba = format.decode(&body[TEXTURE_HEADER_SIZE..])?;

        let expected = usize::from(width) * usize::from(height) * 4;
        if rgba.len() != expected {
            return Err(ScfError::TextureSizeMismatch {
                width,
                height,
                expected,
                received: rgba.len(),
            });
        }

        let image = RgbaImage::from_raw(u32::from(width), u32::from(height), rgba).ok_or(
            ScfError::TextureSizeMismatch {
                width,
                height,
                expected,
                received: 0,
            },
        )?;

        debug!("texture {width}x{height} {format} (raw format {raw_format})");

        Ok(Self {
            raw_format,
            format,
            image,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
