//! Avatar image extraction
//!
//! Firmware avatar packages store each image as a Yaz0-compressed `.szs`
//! entry that decodes to a raw 256×256 RGBA bitmap. This module scans named
//! entries, decodes the matching ones and validates the result. A bad entry
//! is recorded and skipped so one corrupt file never hides the others.

use crate::decompress::decompress_bytes;
use crate::{Result, Yaz0Error};

/// Extension of Yaz0-compressed archive entries
pub const ARCHIVE_EXTENSION: &str = "szs";

/// Avatar width in pixels
pub const AVATAR_WIDTH: usize = 256;

/// Avatar height in pixels
pub const AVATAR_HEIGHT: usize = 256;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Decoded size of one avatar image
pub const AVATAR_IMAGE_SIZE: usize = AVATAR_WIDTH * AVATAR_HEIGHT * BYTES_PER_PIXEL;

/// Whether an entry name carries the `szs` extension
///
/// The extension is everything after the last `.`, compared case-sensitively.
pub fn has_archive_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| ext == ARCHIVE_EXTENSION)
}

/// A decoded 256×256 RGBA avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    name: String,
    pixels: Vec<u8>,
}

impl AvatarImage {
    /// Wrap a decoded buffer, checking it holds exactly one image
    pub fn from_decoded(name: impl Into<String>, pixels: Vec<u8>) -> Result<Self> {
        if pixels.len() != AVATAR_IMAGE_SIZE {
            return Err(Yaz0Error::InvalidImageSize {
                expected: AVATAR_IMAGE_SIZE,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            pixels,
        })
    }

    /// Name of the archive entry this image came from
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        AVATAR_WIDTH
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        AVATAR_HEIGHT
    }

    /// Raw RGBA bytes, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at (`x`, `y`), or `None` outside the image
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= AVATAR_WIDTH || y >= AVATAR_HEIGHT {
            return None;
        }
        let offset = (y * AVATAR_WIDTH + x) * BYTES_PER_PIXEL;
        let rgba = self.pixels.get(offset..offset + BYTES_PER_PIXEL)?;
        Some([rgba[0], rgba[1], rgba[2], rgba[3]])
    }

    /// Take the RGBA buffer
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

/// Outcome of scanning a set of archive entries
#[derive(Debug, Default)]
pub struct AvatarScan {
    /// Successfully decoded images, in entry order
    pub images: Vec<AvatarImage>,
    /// Entries ignored for their extension or because they are not Yaz0
    pub skipped: Vec<String>,
    /// Entries that could not be decoded
    pub failed: Vec<(String, Yaz0Error)>,
}

impl AvatarScan {
    /// True when no avatar images were found
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Decode every `.szs` entry of an extracted avatar directory
pub fn scan_avatar_entries<I, N, D>(entries: I) -> AvatarScan
where
    I: IntoIterator<Item = (N, D)>,
    N: AsRef<str>,
    D: AsRef<[u8]>,
{
    let mut scan = AvatarScan::default();

    for (name, data) in entries {
        let name = name.as_ref();
        if !has_archive_extension(name) {
            scan.skipped.push(name.to_string());
            continue;
        }

        match decode_avatar(name, data.as_ref()) {
            Ok(image) => scan.images.push(image),
            Err(Yaz0Error::NotThisFormat) => {
                log::debug!("{name}: not a Yaz0 stream, skipping");
                scan.skipped.push(name.to_string());
            }
            Err(e) => {
                log::warn!("{name}: could not be decoded: {e}");
                scan.failed.push((name.to_string(), e));
            }
        }
    }

    log::debug!(
        "avatar scan: {} images, {} skipped, {} failed",
        scan.images.len(),
        scan.skipped.len(),
        scan.failed.len()
    );
    scan
}

/// Decode one entry into an avatar image
pub fn decode_avatar(name: &str, data: &[u8]) -> Result<AvatarImage> {
    let pixels = decompress_bytes(data)?;
    AvatarImage::from_decoded(name, pixels)
}
