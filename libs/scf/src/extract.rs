use core::fmt;
use std::collections::HashSet;

use image::{imageops, RgbaImage};
use log::debug;

use crate::error::ScfError;
use crate::stream::Scf;
use crate::texture::Texture;

/// UV-space bounding box of a draw command, max edges exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    pub min_u: i16,
    pub min_v: i16,
    pub max_u: i16,
    pub max_v: i16,
}

impl Region {
    pub fn from_uvs(uvs: &[(i16, i16); 4]) -> Self {
        let mut region = Self {
            min_u: uvs[0].0,
            min_v: uvs[0].1,
            max_u: uvs[0].0,
            max_v: uvs[0].1,
        };
        for &(u, v) in &uvs[1..] {
            region.min_u = region.min_u.min(u);
            region.min_v = region.min_v.min(v);
            region.max_u = region.max_u.max(u);
            region.max_v = region.max_v.max(v);
        }
        region
    }

    /// Zero extent along either axis
    pub fn is_degenerate(&self) -> bool {
        self.min_u == self.max_u || self.min_v == self.max_v
    }

    pub fn width(&self) -> u32 {
        extent(self.min_u, self.max_u)
    }

    pub fn height(&self) -> u32 {
        extent(self.min_v, self.max_v)
    }
}

fn extent(min: i16, max: i16) -> u32 {
    u32::try_from(i32::from(max) - i32::from(min)).unwrap_or(0)
}

/// Output name of a region: `<shape id>.<command index>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegionName {
    pub shape_id: u16,
    /// Position of the draw command within its shape
    pub command_index: usize,
}

impl RegionName {
    pub fn file_name(&self) -> String {
        format!("{self}.png")
    }
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.shape_id, self.command_index)
    }
}

/// Region selected for export.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlannedRegion {
    pub name: RegionName,
    /// Index into the texture collection
    pub texture: usize,
    pub region: Region,
}

/// Receiver for extracted sub-images.
pub trait RegionSink {
    /// Store one region. `Ok(false)` means the sink chose to skip it.
    fn write_region(&mut self, name: &RegionName, image: RgbaImage) -> Result<bool, ScfError>;
}

impl RegionSink for Vec<(RegionName, RgbaImage)> {
    fn write_region(&mut self, name: &RegionName, image: RgbaImage) -> Result<bool, ScfError> {
        self.push((*name, image));
        Ok(true)
    }
}

/// Walk every draw command of every shape and keep each distinct
/// (texture, region) pair once, skipping zero-area regions.
pub fn plan_regions(scf: &Scf) -> Vec<PlannedRegion> {
    let mut seen: HashSet<(usize, Region)> = HashSet::new();
    let mut planned = Vec::new();

    for shape in scf.shapes() {
        for (command_index, command) in shape.commands.iter().enumerate() {
            let region = Region::from_uvs(&command.uvs);
            if region.is_degenerate() {
                debug!("shape {}: command {command_index} has an empty region", shape.id);
                continue;
            }
            if !seen.insert((command.texture, region)) {
                continue;
            }

            planned.push(PlannedRegion {
                name: RegionName {
                    shape_id: shape.id,
                    command_index,
                },
                texture: command.texture,
                region,
            });
        }
    }

    planned
}

/// Copy `region` out of the texture. The result always has the size of
/// the region; texels outside the texture stay transparent.
pub fn crop(texture: &Texture, region: &Region) -> RgbaImage {
    let mut image = RgbaImage::new(region.width(), region.height());
    let (width, height) = texture.image.dimensions();

    let outside = region.min_u < 0
        || region.min_v < 0
        || i64::from(region.max_u) > i64::from(width)
        || i64::from(region.max_v) > i64::from(height);
    if outside {
        debug!("region {region:?} exceeds texture {width}x{height}, padding");
    }

    imageops::replace(
        &mut image,
        &texture.image,
        -i64::from(region.min_u),
        -i64::from(region.min_v),
    );
    image
}

/// Crop every planned region and hand it to `sink`. Returns the number of
/// regions the sink stored.
pub fn extract_regions<S: RegionSink>(scf: &Scf, sink: &mut S) -> Result<usize, ScfError> {
    let mut written = 0;

    for planned in plan_regions(scf) {
        let texture = scf
            .texture(planned.texture)
            .ok_or(ScfError::TextureIndexOutOfRange {
                index: u8::try_from(planned.texture).unwrap_or(u8::MAX),
                texture_count: scf.textures().len(),
            })?;

        let image = crop(texture, &planned.region);
        if sink.write_region(&planned.name, image)? {
            written += 1;
        }
    }

    Ok(written)
}
