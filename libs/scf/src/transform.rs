use crate::error::ScfError;
use crate::reader::Reader;
use crate::{COORDINATE_DIVISOR, MATRIX_DIVISOR};

pub const MATRIX_SIZE: usize = 24;
pub const COLOR_TRANSFORM_SIZE: usize = 7;

/// 2D affine matrix. The linear part is stored in 1/1024 units, the
/// translation in -1/20 units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Matrix {
    pub fn parse(body: &[u8]) -> Result<Self, ScfError> {
        check_size("matrix", MATRIX_SIZE, body)?;

        let mut reader = Reader::new(body);
        let mut raw = [0i32; 6];
        for value in raw.iter_mut() {
            *value = reader.read_i32()?;
        }

        Ok(Self {
            a: f64::from(raw[0]) / MATRIX_DIVISOR,
            b: f64::from(raw[1]) / MATRIX_DIVISOR,
            c: f64::from(raw[2]) / MATRIX_DIVISOR,
            d: f64::from(raw[3]) / MATRIX_DIVISOR,
            tx: f64::from(raw[4]) / COORDINATE_DIVISOR,
            ty: f64::from(raw[5]) / COORDINATE_DIVISOR,
        })
    }
}

/// Per-channel color multipliers and additive offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColorTransform {
    pub red_multiplier: u8,
    pub green_multiplier: u8,
    pub blue_multiplier: u8,
    pub alpha_multiplier: u8,
    pub red_add: u8,
    pub green_add: u8,
    pub blue_add: u8,
}

impl ColorTransform {
    /// Wire order is `ra ga ba am rm gm bm`.
    pub fn parse(body: &[u8]) -> Result<Self, ScfError> {
        check_size("color transform", COLOR_TRANSFORM_SIZE, body)?;

        Ok(Self {
            red_add: body[0],
            green_add: body[1],
            blue_add: body[2],
            alpha_multiplier: body[3],
            red_multiplier: body[4],
            green_multiplier: body[5],
            blue_multiplier: body[6],
        })
    }
}

fn check_size(record: &'static str, expected: usize, body: &[u8]) -> Result<(), ScfError> {
    if body.len() != expected {
        return Err(ScfError::BodyLengthMismatch {
            record,
            expected,
            received: body.len(),
        });
    }

    Ok(())
}
