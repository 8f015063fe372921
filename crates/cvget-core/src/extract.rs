//! Archive extraction, dispatched by filename suffix.
//!
//! `.zip` goes through the zip crate; the tar family (`.tar`, `.tar.gz`,
//! `.tgz`, `.tar.xz`) through the tar crate with the decompressor chosen by
//! suffix. Unknown suffixes are an error without touching the archive, and a
//! corrupt archive is reported but left on disk for manual inspection.

use flate2::read::GzDecoder;
use std::fs::File;
use std::path::Path;
use tar::Archive;
use thiserror::Error;
use xz2::read::XzDecoder;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// Filename suffix matches no supported archive format.
    #[error("unknown archive format: {0}")]
    UnknownFormat(String),
    /// Corrupt or unsupported zip archive.
    #[error("zip: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// Tar-family unpack failure (corrupt stream, bad compression, disk).
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// Extracts `archive_path` into `dest_dir` (created if missing).
pub fn extract(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let name = archive_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    tracing::info!("extracting {} -> {}", archive_path.display(), dest_dir.display());
    std::fs::create_dir_all(dest_dir)?;

    if name.ends_with(".zip") {
        let file = File::open(archive_path)?;
        let mut archive = zip::ZipArchive::new(file)?;
        archive.extract(dest_dir)?;
    } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") || name.ends_with(".gz") {
        let file = File::open(archive_path)?;
        Archive::new(GzDecoder::new(file)).unpack(dest_dir)?;
    } else if name.ends_with(".tar.xz") || name.ends_with(".xz") {
        let file = File::open(archive_path)?;
        Archive::new(XzDecoder::new(file)).unpack(dest_dir)?;
    } else if name.ends_with(".tar") {
        let file = File::open(archive_path)?;
        Archive::new(file).unpack(dest_dir)?;
    } else {
        return Err(ExtractError::UnknownFormat(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    /// Minimal zip with one stored file.
    fn write_zip(path: &Path, entry: &str, body: &[u8]) {
        let file = File::create(path).unwrap();
        let mut zw = zip::ZipWriter::new(file);
        zw.start_file(entry, SimpleFileOptions::default()).unwrap();
        zw.write_all(body).unwrap();
        zw.finish().unwrap();
    }

    /// Minimal tar.gz with one file.
    fn write_tar_gz(path: &Path, entry: &str, body: &[u8]) {
        let file = File::create(path).unwrap();
        let enc = GzEncoder::new(file, Compression::default());
        let mut builder = tar::Builder::new(enc);
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, entry, body).unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    /// Minimal tar.xz with one file.
    fn write_tar_xz(path: &Path, entry: &str, body: &[u8]) {
        let file = File::create(path).unwrap();
        let enc = xz2::write::XzEncoder::new(file, 6);
        let mut builder = tar::Builder::new(enc);
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        builder.append_data(&mut header, entry, body).unwrap();
        builder.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn zip_archive_extracts() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("sample.zip");
        write_zip(&archive, "labels/readme.txt", b"occupied,vacant\n");

        let dest = tmp.path().join("out");
        extract(&archive, &dest).unwrap();
        let extracted = dest.join("labels/readme.txt");
        assert_eq!(fs::read(&extracted).unwrap(), b"occupied,vacant\n");
    }

    #[test]
    fn tar_gz_archive_extracts() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("sample.tar.gz");
        write_tar_gz(&archive, "images/frame0001.txt", b"placeholder");

        let dest = tmp.path().join("out");
        extract(&archive, &dest).unwrap();
        assert!(dest.join("images/frame0001.txt").is_file());
    }

    #[test]
    fn tar_xz_archive_extracts() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("sample.tar.xz");
        write_tar_xz(&archive, "subsets/train.txt", b"0001\n0002\n");

        let dest = tmp.path().join("out");
        extract(&archive, &dest).unwrap();
        assert_eq!(
            fs::read(dest.join("subsets/train.txt")).unwrap(),
            b"0001\n0002\n"
        );
    }

    #[test]
    fn unknown_suffix_is_an_error_not_a_panic() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("weights.rar");
        fs::write(&archive, b"whatever").unwrap();

        let err = extract(&archive, &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, ExtractError::UnknownFormat(ref n) if n == "weights.rar"));
        assert!(archive.exists(), "archive must be left untouched");
    }

    #[test]
    fn corrupt_zip_is_an_error_and_archive_is_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("broken.zip");
        fs::write(&archive, b"PK\x03\x04 but not actually a zip").unwrap();

        let err = extract(&archive, &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, ExtractError::Zip(_)));
        assert!(archive.exists(), "archive stays for manual inspection");
    }

    #[test]
    fn corrupt_tar_gz_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let archive = tmp.path().join("broken.tar.gz");
        fs::write(&archive, b"\x1f\x8b\x08 but truncated").unwrap();

        let err = extract(&archive, &tmp.path().join("out")).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
