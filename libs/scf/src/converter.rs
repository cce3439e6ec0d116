use crate::error::ConverterError;

/// Method for converting u32 to usize.
pub fn u32_to_usize(value: u32) -> Result<usize, ConverterError> {
    match usize::try_from(value) {
        Err(error) => Err(ConverterError::TryFromIntError(error)),
        Ok(result) => Ok(result),
    }
}

