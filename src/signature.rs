//! Signature-based image type detection.
//!
//! Files are classified from the magic bytes at the start of their content,
//! never from their name. Only JPEG and PNG are recognised.
//!
//! # Examples
//!
//! ```
//! use imgcollect::signature::{ImageKind, classify};
//!
//! assert_eq!(classify(&[0xFF, 0xD8, 0xFF, 0xE0]), ImageKind::Jpeg);
//! assert_eq!(classify(b"\x89PNG\r\n\x1a\n"), ImageKind::Png);
//! assert_eq!(classify(b"hello"), ImageKind::Unknown);
//! ```

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Number of leading bytes read from every file.
///
/// This must stay the longest prefix any rule needs (the PNG signature).
pub const PREFIX_LEN: usize = 8;

/// JPEG start-of-image marker.
const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];

/// Canonical PNG file signature.
const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// The detected type of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageKind {
    /// Starts with the JPEG start-of-image marker.
    Jpeg,
    /// Starts with the full PNG signature.
    Png,
    /// Anything else. Callers skip these files.
    Unknown,
}

impl ImageKind {
    /// Returns the canonical extension (without the dot) for this kind.
    ///
    /// ```
    /// use imgcollect::signature::ImageKind;
    ///
    /// assert_eq!(ImageKind::Jpeg.extension(), Some("jpg"));
    /// assert_eq!(ImageKind::Png.extension(), Some("png"));
    /// assert_eq!(ImageKind::Unknown.extension(), None);
    /// ```
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            ImageKind::Jpeg => Some("jpg"),
            ImageKind::Png => Some("png"),
            ImageKind::Unknown => None,
        }
    }

    /// Returns true for the kinds that get collected.
    pub fn is_image(&self) -> bool {
        !matches!(self, ImageKind::Unknown)
    }
}

impl fmt::Display for ImageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImageKind::Jpeg => "JPEG",
            ImageKind::Png => "PNG",
            ImageKind::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// Classifies a byte prefix.
///
/// JPEG is checked before PNG. The signatures are disjoint, so the order never
/// changes the outcome.
pub fn classify(prefix: &[u8]) -> ImageKind {
    if is_jpeg(prefix) {
        ImageKind::Jpeg
    } else if is_png(prefix) {
        ImageKind::Png
    } else {
        ImageKind::Unknown
    }
}

fn is_jpeg(prefix: &[u8]) -> bool {
    prefix.starts_with(&JPEG_SOI)
}

fn is_png(prefix: &[u8]) -> bool {
    prefix.starts_with(&PNG_SIGNATURE)
}

/// Reads up to [`PREFIX_LEN`] bytes from the start of a file.
///
/// Hitting end-of-file early is not an error; the returned buffer simply holds
/// fewer bytes.
pub fn read_prefix(path: &Path) -> io::Result<Vec<u8>> {
    let file = File::open(path)?;
    let mut prefix = Vec::with_capacity(PREFIX_LEN);
    file.take(PREFIX_LEN as u64).read_to_end(&mut prefix)?;
    Ok(prefix)
}

/// Reads the prefix of a file and classifies it.
pub fn classify_file(path: &Path) -> io::Result<ImageKind> {
    read_prefix(path).map(|prefix| classify(&prefix))
}
