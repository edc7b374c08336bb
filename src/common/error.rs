use std::fmt::{Display, Error, Formatter};

// Error
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Input
    EmptyData,
    InvalidChar,
    DataTooLong,

    // Parameters
    InvalidVersion,
    InvalidECLevel,
    InvalidMaskingPattern,
    InvalidDimensions,

    // Field arithmetic
    Arithmetic,

    // Image container
    UnsupportedFormat,
    ImageEncodingFailed,
}

impl QRError {
    /// Errors caused by the payload itself rather than by the requested parameters.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptyData | Self::InvalidChar)
    }
}

impl Display for QRError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        let msg = match *self {
            // Input
            Self::EmptyData => "Empty data",
            Self::InvalidChar => "Invalid character, only U+0020..U+007E are allowed",
            Self::DataTooLong => "Data too long",

            // Parameters
            Self::InvalidVersion => "Invalid version",
            Self::InvalidECLevel => "Invalid error correction level",
            Self::InvalidMaskingPattern => "Invalid masking pattern",
            Self::InvalidDimensions => "Invalid image dimensions",

            // Field arithmetic
            Self::Arithmetic => "Undefined field operation",

            // Image container
            Self::UnsupportedFormat => "Unsupported image format",
            Self::ImageEncodingFailed => "Failed to encode image",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for QRError {}

pub type QRResult<T> = Result<T, QRError>;

#[cfg(test)]
mod error_tests {
    use super::QRError;

    #[test]
    fn test_invalid_input_group() {
        assert!(QRError::EmptyData.is_invalid_input());
        assert!(QRError::InvalidChar.is_invalid_input());
        assert!(!QRError::DataTooLong.is_invalid_input());
        assert!(!QRError::Arithmetic.is_invalid_input());
    }

    #[test]
    fn test_display() {
        assert_eq!(QRError::DataTooLong.to_string(), "Data too long");
        assert_eq!(QRError::UnsupportedFormat.to_string(), "Unsupported image format");
    }
}
