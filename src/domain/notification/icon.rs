//! Icon value object

use std::fmt;

/// Generic document icon used when an application registers without one.
/// A 1x1 transparent PNG.
const GENERIC_ICON_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Image container formats recognised from their magic bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Tiff,
    Jpeg,
    Gif,
    Icns,
    Unknown,
}

impl ImageFormat {
    /// Sniff the format from the leading bytes
    pub fn detect(data: &[u8]) -> Self {
        match data {
            [0x89, b'P', b'N', b'G', ..] => Self::Png,
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => Self::Tiff,
            [0xFF, 0xD8, 0xFF, ..] => Self::Jpeg,
            [b'G', b'I', b'F', b'8', ..] => Self::Gif,
            [b'i', b'c', b'n', b's', ..] => Self::Icns,
            _ => Self::Unknown,
        }
    }

    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Tiff => "image/tiff",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Icns => "image/icns",
            Self::Unknown => "application/octet-stream",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value object holding the raw bytes of an icon image.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    data: Vec<u8>,
}

impl Icon {
    /// Create an icon from raw image bytes
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Create an icon from a byte slice
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// The generic fallback icon
    pub fn generic() -> Self {
        Self::from_bytes(GENERIC_ICON_PNG)
    }

    /// Whether this is the generic fallback icon
    pub fn is_generic(&self) -> bool {
        self.data == GENERIC_ICON_PNG
    }

    /// Get the raw image data
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume and return the raw image data
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Detected container format
    pub fn format(&self) -> ImageFormat {
        ImageFormat::detect(&self.data)
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("format", &self.format())
            .field("size_bytes", &self.size_bytes())
            .finish()
    }
}
