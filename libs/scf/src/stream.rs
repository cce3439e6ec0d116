use log::{debug, warn};

use crate::error::ScfError;
use crate::export::ExportTable;
use crate::reader::Reader;
use crate::shape::Shape;
use crate::texture::Texture;
use crate::transform::{ColorTransform, Matrix};
use crate::HEADER_PADDING_SIZE;

/// Stream terminator, carries no body decoder
pub const TAG_END: u8 = 0;

/// Decoder category of a tag type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TagKind {
    Texture,
    Shape,
    MovieClip,
    TextField,
    Matrix,
    ColorTransform,
    TimelineOffset,
}

impl TagKind {
    /// Fixed tag table. `None` for the terminator and for every type
    /// without a known layout.
    pub fn from_raw(tag_type: u8) -> Option<Self> {
        match tag_type {
            1 => Some(Self::Texture),
            2 => Some(Self::Shape),
            3 | 10 | 12 | 14 => Some(Self::MovieClip),
            7 => Some(Self::TextField),
            8 => Some(Self::Matrix),
            9 => Some(Self::ColorTransform),
            13 => Some(Self::TimelineOffset),
            _ => None,
        }
    }
}

/// Object totals declared at the start of the stream. Informational only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ObjectCounts {
    pub shapes: u16,
    pub movie_clips: u16,
    pub textures: u16,
    pub text_fields: u16,
    pub matrices: u16,
    pub color_transforms: u16,
}

impl ObjectCounts {
    /// Six u16 totals
    pub const SIZE: usize = 12;

    pub fn read(reader: &mut Reader<'_>) -> Result<Self, ScfError> {
        let raw = reader.read_u16_array(Self::SIZE / 2)?;
        Ok(Self {
            shapes: raw[0],
            movie_clips: raw[1],
            textures: raw[2],
            text_fields: raw[3],
            matrices: raw[4],
            color_transforms: raw[5],
        })
    }
}

/// Text field placeholder, only the identifier is decoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TextField {
    pub id: u16,
}

impl TextField {
    pub fn parse(body: &[u8]) -> Result<Self, ScfError> {
        Ok(Self {
            id: Reader::new(body).read_u16()?,
        })
    }
}

/// Movie clip placeholder, the timeline is not decoded.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MovieClip {
    /// Tag type the clip was declared with (3, 10, 12 or 14)
    pub tag_type: u8,
    /// Leading identifier, when the body has one
    pub id: Option<u16>,
}

impl MovieClip {
    pub fn parse(tag_type: u8, body: &[u8]) -> Self {
        Self {
            tag_type,
            id: Reader::new(body).read_u16().ok(),
        }
    }
}

/// Timeline offset placeholder.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimelineOffset {
    /// Body length in bytes
    pub size: usize,
}

/// Decoded sprite package.
///
/// Every collection holds records in tag-stream order and is never modified
/// once [`Scf::parse`] returns.
#[derive(Clone, Debug, Default)]
pub struct Scf {
    counts: ObjectCounts,
    exports: ExportTable,
    textures: Vec<Texture>,
    shapes: Vec<Shape>,
    movie_clips: Vec<MovieClip>,
    text_fields: Vec<TextField>,
    matrices: Vec<Matrix>,
    color_transforms: Vec<ColorTransform>,
    timeline_offsets: Vec<TimelineOffset>,
}

impl Scf {
    /// Decompress an `.sc` file and decode the stream inside it.
    pub fn from_sc(data: &[u8]) -> Result<Self, ScfError> {
        Self::parse(&crate::compress::decompress_sc(data)?)
    }

    /// Decode a whole decompressed stream. Either every tag up to the
    /// terminator decodes or nothing is returned.
    pub fn parse(data: &[u8]) -> Result<Self, ScfError> {
        let mut reader = Reader::new(data);

        let counts = ObjectCounts::read(&mut reader)?;
        reader.skip(HEADER_PADDING_SIZE)?;
        let exports = ExportTable::read(&mut reader)?;

        let mut scf = Self {
            counts,
            exports,
            ..Self::default()
        };

        loop {
            let offset = reader.position();
            let (tag_type, length) = reader.read_record_header()?;
            if tag_type == TAG_END {
                break;
            }

            let context = |error| ScfError::InTag {
                tag_type,
                offset,
                source: Box::new(error),
            };

            let body = reader.read_bytes(length).map_err(context)?;
            let kind = TagKind::from_raw(tag_type)
                .ok_or(ScfError::UnknownTag { tag_type, offset })?;

            debug!("tag {tag_type} ({kind:?}) at offset {offset}, {length} bytes");
            scf.push(kind, tag_type, body).map_err(context)?;
        }

        if !reader.is_empty() {
            debug!("{} bytes after the end tag ignored", reader.remaining());
        }
        scf.check_counts();

        Ok(scf)
    }

    fn push(&mut self, kind: TagKind, tag_type: u8, body: &[u8]) -> Result<(), ScfError> {
        match kind {
            TagKind::Texture => self.textures.push(Texture::parse(body)?),
            TagKind::Shape => {
                let shape = Shape::parse(body, &self.textures)?;
                self.shapes.push(shape);
            }
            TagKind::MovieClip => self.movie_clips.push(MovieClip::parse(tag_type, body)),
            TagKind::TextField => self.text_fields.push(TextField::parse(body)?),
            TagKind::Matrix => self.matrices.push(Matrix::parse(body)?),
            TagKind::ColorTransform => self.color_transforms.push(ColorTransform::parse(body)?),
            TagKind::TimelineOffset => {
                self.timeline_offsets.push(TimelineOffset { size: body.len() })
            }
        }

        Ok(())
    }

    fn check_counts(&self) {
        let pairs = [
            ("shapes", self.counts.shapes, self.shapes.len()),
            ("movie clips", self.counts.movie_clips, self.movie_clips.len()),
            ("textures", self.counts.textures, self.textures.len()),
            ("text fields", self.counts.text_fields, self.text_fields.len()),
            ("matrices", self.counts.matrices, self.matrices.len()),
            (
                "color transforms",
                self.counts.color_transforms,
                self.color_transforms.len(),
            ),
        ];

        for (name, declared, decoded) in pairs {
            if usize::from(declared) != decoded {
                warn!("header declares {declared} {name}, stream holds {decoded}");
            }
        }
    }

    pub fn counts(&self) -> &ObjectCounts {
        &self.counts
    }

    pub fn exports(&self) -> &ExportTable {
        &self.exports
    }

    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    pub fn texture(&self, index: usize) -> Option<&Texture> {
        self.textures.get(index)
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Shape declared with `id`
    pub fn shape(&self, id: u16) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id == id)
    }

    pub fn movie_clips(&self) -> &[MovieClip] {
        &self.movie_clips
    }

    pub fn text_fields(&self) -> &[TextField] {
        &self.text_fields
    }

    pub fn matrices(&self) -> &[Matrix] {
        &self.matrices
    }

    pub fn color_transforms(&self) -> &[ColorTransform] {
        &self.color_transforms
    }

    pub fn timeline_offsets(&self) -> &[TimelineOffset] {
        &self.timeline_offsets
    }
}
