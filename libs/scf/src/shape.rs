use log::trace;

use crate::error::ScfError;
use crate::reader::Reader;
use crate::texture::Texture;
use crate::COORDINATE_DIVISOR;

/// Ends the command list regardless of the declared count
pub const COMMAND_END: u8 = 0;
/// Textured quad
pub const COMMAND_DRAW_BITMAP: u8 = 4;

/// Texture index, 8 x i32 vertex components, 8 x i16 UV components
pub const DRAW_BITMAP_SIZE: usize = 1 + 8 * 4 + 8 * 2;

#[derive(Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// Index into the texture collection
    pub texture: usize,
    /// Quad corners in stage units
    pub vertices: [(f64, f64); 4],
    /// Quad corners in texels of the referenced texture
    pub uvs: [(i16, i16); 4],
}

impl DrawCommand {
    pub fn parse(body: &[u8], textures: &[Texture]) -> Result<Self, ScfError> {
        if body.len() != DRAW_BITMAP_SIZE {
            return Err(ScfError::BodyLengthMismatch {
                record: "draw bitmap command",
                expected: DRAW_BITMAP_SIZE,
                received: body.len(),
            });
        }

        let mut reader = Reader::new(body);
        let index = reader.read_u8()?;
        if usize::from(index) >= textures.len() {
            return Err(ScfError::TextureIndexOutOfRange {
                index,
                texture_count: textures.len(),
            });
        }

        let mut vertices = [(0.0, 0.0); 4];
        for vertex in vertices.iter_mut() {
            let x = reader.read_i32()?;
            let y = reader.read_i32()?;
            *vertex = (
                f64::from(x) / COORDINATE_DIVISOR,
                f64::from(y) / COORDINATE_DIVISOR,
            );
        }

        let mut uvs = [(0, 0); 4];
        for uv in uvs.iter_mut() {
            *uv = (reader.read_i16()?, reader.read_i16()?);
        }

        Ok(Self {
            texture: usize::from(index),
            vertices,
            uvs,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub id: u16,
    /// Draw-bitmap commands in stream order
    pub commands: Vec<DrawCommand>,
    /// Commands of other types that were consumed and dropped
    pub discarded: usize,
}

impl Shape {
    pub fn parse(body: &[u8], textures: &[Texture]) -> Result<Self, ScfError> {
        let mut reader = Reader::new(body);
        Self::read(&mut reader, textures)
    }

    /// Decode a shape, leaving `reader` right after the last consumed
    /// command (after the 5-byte header for an end command).
    pub fn read(reader: &mut Reader<'_>, textures: &[Texture]) -> Result<Self, ScfError> {
        let id = reader.read_u16()?;
        let declared = reader.read_u16()?;

        let mut commands = Vec::new();
        let mut discarded = 0;

        for index in 0..usize::from(declared) {
            let (command_type, length) = reader.read_record_header().map_err(|error| {
                ScfError::InShapeCommand {
                    shape_id: id,
                    command_type: None,
                    command_index: index,
                    source: Box::new(error),
                }
            })?;
            let context = |error| ScfError::InShapeCommand {
                shape_id: id,
                command_type: Some(command_type),
                command_index: index,
                source: Box::new(error),
            };

            if command_type == COMMAND_END {
                break;
            }

            let body = reader.read_bytes(length).map_err(context)?;
            if command_type != COMMAND_DRAW_BITMAP {
                trace!("shape {id}: skipping command type {command_type} ({length} bytes)");
                discarded += 1;
                continue;
            }

            commands.push(DrawCommand::parse(body, textures).map_err(context)?);
        }

        Ok(Self {
            id,
            commands,
            discarded,
        })
    }
}
