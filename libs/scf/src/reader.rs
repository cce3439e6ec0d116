use byteorder::{ByteOrder, LittleEndian};

use crate::error::ScfError;

/// Forward-only cursor over a borrowed byte buffer.
///
/// All multi-byte values are little-endian. A read that runs past the end
/// of the buffer fails with [`ScfError::UnexpectedEof`] and leaves the
/// position untouched.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of unread bytes
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ScfError> {
        let bytes = self
            .position
            .checked_add(len)
            .and_then(|end| self.data.get(self.position..end));
        let Some(bytes) = bytes else {
            return Err(ScfError::UnexpectedEof {
                offset: self.position,
                needed: len,
                available: self.remaining(),
            });
        };
        self.position += len;
        Ok(bytes)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), ScfError> {
        self.read_bytes(len).map(|_| ())
    }

    pub fn read_u8(&mut self) -> Result<u8, ScfError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, ScfError> {
        Ok(LittleEndian::read_u16(self.read_bytes(2)?))
    }

    pub fn read_i16(&mut self) -> Result<i16, ScfError> {
        Ok(LittleEndian::read_i16(self.read_bytes(2)?))
    }

    pub fn read_u32(&mut self) -> Result<u32, ScfError> {
        Ok(LittleEndian::read_u32(self.read_bytes(4)?))
    }

    pub fn read_i32(&mut self) -> Result<i32, ScfError> {
        Ok(LittleEndian::read_i32(self.read_bytes(4)?))
    }

    /// Read a contiguous array of `count` u16 values.
    pub fn read_u16_array(&mut self, count: usize) -> Result<Vec<u16>, ScfError> {
        let bytes = self.read_bytes(count.saturating_mul(2))?;
        let mut values = vec![0u16; count];
        LittleEndian::read_u16_into(bytes, &mut values);
        Ok(values)
    }

    /// Read a length-prefixed string. A length byte of 255 marks an absent
    /// string and yields `None`; every other length is followed by that many
    /// bytes of text.
    pub fn read_ascii(&mut self) -> Result<Option<String>, ScfError> {
        let size = self.read_u8()?;
        if size == 255 {
            return Ok(None);
        }

        let offset = self.position;
        let bytes = self.read_bytes(usize::from(size))?;
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(Some(text.to_string())),
            Err(source) => Err(ScfError::InvalidString { offset, source }),
        }
    }

    /// Read a 1-byte type and 4-byte length record header.
    pub fn read_record_header(&mut self) -> Result<(u8, usize), ScfError> {
        let record_type = self.read_u8()?;
        let length = crate::converter::u32_to_usize(self.read_u32()?)?;
        Ok((record_type, length))
    }
}
