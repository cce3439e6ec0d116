//! Decoder for SC sprite packages (SCF): a tag-typed record
//! stream of textures, shapes, transforms and placeholder timeline records,
//! plus extraction of the texture regions drawn by shapes.

/// Divisor of the linear matrix components
pub const MATRIX_DIVISOR: f64 = 1024.0;
/// Divisor of translations and vertex coordinates
pub const COORDINATE_DIVISOR: f64 = -20.0;
/// Unused bytes between the object counts and the export table
pub const HEADER_PADDING_SIZE: usize = 5;

pub mod codec;
pub mod compress;
mod converter;
pub mod error;
pub mod export;
pub mod extract;
pub mod reader;
pub mod shape;
pub mod stream;
pub mod texture;
pub mod transform;

pub use codec::PixelFormat;
pub use compress::decompress_sc;
pub use error::{ErrorKind, ScfError};
pub use export::{Export, ExportTable};
pub use extract::{extract_regions, plan_regions, PlannedRegion, Region, RegionName, RegionSink};
pub use shape::{DrawCommand, Shape};
pub use stream::{MovieClip, ObjectCounts, Scf, TagKind, TextField, TimelineOffset};
pub use texture::Texture;
pub use transform::{ColorTransform, Matrix};
