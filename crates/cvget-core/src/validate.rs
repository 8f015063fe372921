//! Post-download content validation.
//!
//! A downloaded archive is accepted only if it is at least 1 KiB and its
//! leading bytes carry a known archive signature. Anything else is almost
//! always an HTML error page or a truncated response; the file is deleted so
//! the next run retries instead of trusting a corrupt download via the
//! existence check.

use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Files smaller than this are rejected outright.
pub const MIN_ARCHIVE_BYTES: u64 = 1024;

/// Magic signatures of the accepted archive formats.
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];
const GZIP_MAGIC: [u8; 3] = [0x1F, 0x8B, 0x08];
// Full 6-byte xz signature. A shorter prefix would also match unrelated
// formats starting with 0xFD 0x37.
const XZ_MAGIC: [u8; 6] = [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00];

/// Container/compression format detected from magic bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Gzip,
    Xz,
}

impl ArchiveFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Gzip => "gzip",
            ArchiveFormat::Xz => "xz",
        }
    }
}

#[derive(Debug, Error)]
pub enum ValidateError {
    /// File smaller than [`MIN_ARCHIVE_BYTES`]; near-certain HTML error page
    /// or empty response.
    #[error("file is {len} bytes, below the {MIN_ARCHIVE_BYTES}-byte minimum")]
    TooSmall { len: u64 },
    /// Leading bytes match no accepted archive signature.
    #[error("leading bytes match no known archive signature")]
    BadMagic,
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Matches `prefix` against the known archive signatures, longest first.
/// Extension-independent: a zip served as `.tar.gz` still sniffs as zip.
pub fn sniff_format(prefix: &[u8]) -> Option<ArchiveFormat> {
    if prefix.starts_with(&XZ_MAGIC) {
        Some(ArchiveFormat::Xz)
    } else if prefix.starts_with(&ZIP_MAGIC) {
        Some(ArchiveFormat::Zip)
    } else if prefix.starts_with(&GZIP_MAGIC) {
        Some(ArchiveFormat::Gzip)
    } else {
        None
    }
}

/// Validates a downloaded archive: size floor, then magic sniff.
///
/// On failure the file is deleted (a missing file is tolerated) so a later
/// run can retry cleanly, and the failure is returned for reporting.
pub fn validate(path: &Path) -> Result<ArchiveFormat, ValidateError> {
    match inspect(path) {
        Ok(format) => Ok(format),
        Err(err) => {
            remove_quietly(path);
            Err(err)
        }
    }
}

fn inspect(path: &Path) -> Result<ArchiveFormat, ValidateError> {
    let len = fs::metadata(path)?.len();
    if len < MIN_ARCHIVE_BYTES {
        return Err(ValidateError::TooSmall { len });
    }

    let mut prefix = [0u8; 8];
    let mut file = fs::File::open(path)?;
    let n = file.read(&mut prefix)?;
    sniff_format(&prefix[..n]).ok_or(ValidateError::BadMagic)
}

fn remove_quietly(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!("could not delete invalid file {}: {}", path.display(), err);
        }
    }
}
