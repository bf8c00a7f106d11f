//! Raster image types

use std::fmt;

/// Channels per pixel. The format only carries interleaved RGB.
pub const CHANNELS: usize = 3;

/// A numeric header field, kept as the token text it was read from.
///
/// Equality and display use the text, so `01` and `1` are different fields.
#[derive(Debug, Clone, Eq)]
pub struct HeaderValue {
    text: String,
    value: u32,
}

impl HeaderValue {
    pub fn new(text: impl Into<String>, value: u32) -> Self {
        Self { text: text.into(), value }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<u32> for HeaderValue {
    fn from(value: u32) -> Self {
        Self::new(value.to_string(), value)
    }
}

impl PartialEq for HeaderValue {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A decoded raster: the four header fields plus the raw sample block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Format tag from the first header token (e.g. `P6`)
    pub format_tag: String,
    /// Width of the image in pixels
    pub width: HeaderValue,
    /// Height of the image in pixels
    pub height: HeaderValue,
    /// Maximum channel value declared by the header (typically 255)
    pub max_value: HeaderValue,
    /// RGB samples interleaved [R, G, B, R, G, B, ...], row-major
    pub samples: Vec<u8>,
}

impl RasterImage {
    /// Payload length implied by the header, or `None` if it does not fit in `usize`.
    pub fn expected_len(&self) -> Option<usize> {
        (self.width.get() as usize)
            .checked_mul(self.height.get() as usize)?
            .checked_mul(CHANNELS)
    }

    /// Number of complete pixels in the payload. A trailing partial pixel is ignored.
    pub fn pixel_count(&self) -> usize {
        self.samples.len() / CHANNELS
    }

    /// Whether the payload length agrees with the header dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.expected_len() == Some(self.samples.len())
    }

    /// Same header as `self`, different payload.
    pub fn with_samples(&self, samples: Vec<u8>) -> Self {
        Self {
            format_tag: self.format_tag.clone(),
            width: self.width.clone(),
            height: self.height.clone(),
            max_value: self.max_value.clone(),
            samples,
        }
    }
}
