//! Binary PPM-style raster reader.
//!
//! The file is an ASCII header of four whitespace-delimited tokens (format tag, width,
//! height, max channel value) immediately followed by the raw RGB sample block. Only the
//! header is tokenized: once the fourth token has been read, the single whitespace byte
//! after it is consumed as the separator and everything that follows is the payload, verbatim.

use tracing::{debug, warn};
use crate::image_pipeline::common::error::{Result, ComparisonError};
use crate::image_pipeline::ppm::types::{HeaderValue, RasterImage};
use crate::image_pipeline::ppm::reader::RasterReader;

/// Number of header tokens preceding the payload.
const HEADER_TOKENS: usize = 4;

/// Raster reader for the fixed `<tag> <width> <height> <max>` + binary payload layout.
pub struct PpmReader;

/// Whitespace as the header grammar defines it: space, tab, LF, VT, FF, CR.
fn is_header_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Splits `data` into at most `HEADER_TOKENS` header tokens and the remaining payload.
///
/// Returns `None` for the payload when nothing follows the separator after the last token.
fn split_header(data: &[u8]) -> (Vec<&[u8]>, Option<&[u8]>) {
    let mut tokens = Vec::with_capacity(HEADER_TOKENS);
    let mut pos = 0;

    while tokens.len() < HEADER_TOKENS {
        while pos < data.len() && is_header_space(data[pos]) {
            pos += 1;
        }
        if pos == data.len() {
            return (tokens, None);
        }
        let start = pos;
        while pos < data.len() && !is_header_space(data[pos]) {
            pos += 1;
        }
        tokens.push(&data[start..pos]);
    }

    // A single whitespace byte ends the header; whatever follows belongs to the payload,
    // even when it happens to look like whitespace.
    if pos < data.len() {
        pos += 1;
    }
    let payload = (pos < data.len()).then(|| &data[pos..]);

    (tokens, payload)
}

fn parse_number(token: &[u8], field: &str) -> Result<HeaderValue> {
    std::str::from_utf8(token)
        .ok()
        .and_then(|s| s.parse::<u32>().ok().map(|value| HeaderValue::new(s, value)))
        .ok_or_else(|| {
            ComparisonError::FormatError(format!(
                "{} is not an unsigned integer: {:?}",
                field,
                String::from_utf8_lossy(token)
            ))
        })
}

impl RasterReader for PpmReader {
    /// Decodes a raster from the raw bytes of a file.
    ///
    /// # Arguments
    ///
    /// * `data` - Complete file contents
    ///
    /// # Returns
    ///
    /// * `Ok(RasterImage)` - Header fields and the untouched payload block
    /// * `Err(ComparisonError::FormatError)` - Fewer than four header tokens, no payload,
    ///   or a header field that does not parse
    fn read_raster(&self, data: &[u8]) -> Result<RasterImage> {
        debug!("Decoding raster, {} bytes", data.len());

        let (tokens, payload) = split_header(data);
        if tokens.len() < HEADER_TOKENS {
            return Err(ComparisonError::FormatError(format!(
                "expected {} header fields, found {}",
                HEADER_TOKENS,
                tokens.len()
            )));
        }
        let payload = payload.ok_or_else(|| {
            ComparisonError::FormatError("header is not followed by a payload".to_string())
        })?;

        let format_tag = std::str::from_utf8(tokens[0])
            .map_err(|_| ComparisonError::FormatError("format tag is not valid UTF-8".to_string()))?
            .to_string();
        let width = parse_number(tokens[1], "width")?;
        let height = parse_number(tokens[2], "height")?;
        let max_value = parse_number(tokens[3], "max value")?;

        let image = RasterImage {
            format_tag,
            width,
            height,
            max_value,
            samples: payload.to_vec(),
        };

        debug!(
            "Decoded raster: {} {}x{} max={}",
            image.format_tag, image.width, image.height, image.max_value
        );
        if !image.is_well_formed() {
            warn!(
                expected = ?image.expected_len(),
                actual = image.samples.len(),
                "Payload length does not match header dimensions"
            );
        }

        Ok(image)
    }
}
