extern crate miette;
extern crate thiserror;

use miette::Diagnostic;
use thiserror::Error;

use crate::codec::PixelFormat;

#[derive(Error, Diagnostic, Debug)]
pub enum ConverterError {
    #[error("error converting an value")]
    #[diagnostic(code(libscf::try_from_int_error))]
    TryFromIntError(#[from] std::num::TryFromIntError),
}

/// Coarse classification of [`ScfError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Corrupt or truncated stream.
    Format,
    /// A recognized pixel format without a codec.
    UnsupportedFormat,
    /// A draw command points at a texture that was never decoded.
    Reference,
    /// Failure reported by an output sink.
    Io,
}

#[derive(Error, Diagnostic, Debug)]
pub enum ScfError {
    #[error(transparent)]
    #[diagnostic(code(libscf::convert_error))]
    ConvertValue(#[from] ConverterError),

    #[error("unexpected end of stream at offset {offset} (needed {needed} bytes, {available} available)")]
    #[diagnostic(code(libscf::unexpected_eof))]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid text at offset {offset}")]
    #[diagnostic(code(libscf::invalid_string))]
    InvalidString {
        offset: usize,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("incorrect {record} body size (expected {expected} bytes, received {received} bytes)")]
    #[diagnostic(code(libscf::body_length_mismatch))]
    BodyLengthMismatch {
        record: &'static str,
        expected: usize,
        received: usize,
    },

    #[error("unknown tag type {tag_type} at offset {offset}")]
    #[diagnostic(
        code(libscf::unknown_tag),
        help("the tag table has no decoder for this type; the file may be newer than this tool")
    )]
    UnknownTag { tag_type: u8, offset: usize },

    #[error(
        "texture {width}x{height} needs {expected} RGBA bytes, codec produced {received} bytes"
    )]
    #[diagnostic(code(libscf::texture_size_mismatch))]
    TextureSizeMismatch {
        width: u16,
        height: u16,
        expected: usize,
        received: usize,
    },

    #[error("pixel format {format} is not implemented")]
    #[diagnostic(code(libscf::unsupported_pixel_format))]
    UnsupportedPixelFormat { format: PixelFormat },

    #[error("texture index {index} is out of range ({texture_count} textures decoded)")]
    #[diagnostic(
        code(libscf::texture_index_out_of_range),
        help("textures must be declared before the shapes that draw them")
    )]
    TextureIndexOutOfRange { index: u8, texture_count: usize },

    #[error("failed to decode tag {tag_type} at offset {offset}")]
    #[diagnostic(code(libscf::tag_error))]
    InTag {
        tag_type: u8,
        offset: usize,
        #[source]
        source: Box<ScfError>,
    },

    #[error(
        "failed to decode command {command_index}{} of shape {shape_id}",
        .command_type.map(|t| format!(" (type {t})")).unwrap_or_default()
    )]
    #[diagnostic(code(libscf::shape_command_error))]
    InShapeCommand {
        shape_id: u16,
        /// `None` when the command header itself could not be read
        command_type: Option<u8>,
        command_index: usize,
        #[source]
        source: Box<ScfError>,
    },

    #[error("LZMA stream is corrupt")]
    #[diagnostic(code(libscf::decompress_error))]
    Decompress(#[from] lzma_rs::error::Error),

    #[error("decompressed size mismatch (expected {expected} bytes, received {received} bytes)")]
    #[diagnostic(code(libscf::decompressed_size_mismatch))]
    DecompressedSizeMismatch { expected: usize, received: usize },

    #[error("image processing error")]
    #[diagnostic(code(libscf::image_error))]
    Image(#[from] image::ImageError),

    #[error("output writing error")]
    #[diagnostic(code(libscf::io_error))]
    Io(#[from] std::io::Error),
}

impl ScfError {
    /// Classifies the error, looking through context wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InTag { source, .. } | Self::InShapeCommand { source, .. } => source.kind(),
            Self::UnsupportedPixelFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::TextureIndexOutOfRange { .. } => ErrorKind::Reference,
            Self::Image(_) | Self::Io(_) => ErrorKind::Io,
            Self::ConvertValue(_)
            | Self::UnexpectedEof { .. }
            | Self::InvalidString { .. }
            | Self::Decompress(_)
            | Self::DecompressedSizeMismatch { .. }
            | Self::BodyLengthMismatch { .. }
            | Self::UnknownTag { .. }
            | Self::TextureSizeMismatch { .. } => ErrorKind::Format,
        }
    }

    /// Innermost error, with the tag and shape context stripped.
    pub fn root(&self) -> &ScfError {
        match self {
            Self::InTag { source, .. } | Self::InShapeCommand { source, .. } => source.root(),
            other => other,
        }
    }
}
