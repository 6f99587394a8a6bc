use thiserror::Error;

pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

/// Failures raised while creating a canvas, styling text or encoding pixels.
#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Width or height is zero or larger than the raster supports.
    #[error("Canvas size {width}x{height} is out of range")]
    InvalidDimensions { width: u32, height: u32 },

    /// The font shorthand has no usable size or family.
    #[error("Unsupported font shorthand: {0}")]
    FontParseError(String),

    #[error("Unsupported fill color: {0}")]
    ColorParseError(String),

    /// Snapshot data could not be written as PNG.
    #[error("Could not encode canvas as PNG: {0}")]
    PngError(String),
}

impl From<png::EncodingError> for Canvas2dError {
    fn from(err: png::EncodingError) -> Self {
        Canvas2dError::PngError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_value() {
        let err = Canvas2dError::InvalidDimensions {
            width: 0,
            height: 500,
        };
        assert_eq!(err.to_string(), "Canvas size 0x500 is out of range");
        assert!(Canvas2dError::ColorParseError("#zzz".to_string())
            .to_string()
            .contains("#zzz"));
    }
}
