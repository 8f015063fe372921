//! Idempotent fetch step.
//!
//! Presence implies success: if the destination file already exists, the
//! retriever is not invoked and its content is not re-checked. Cheap repeat
//! runs, at the cost of never healing a corrupted prior download (delete the
//! file to force a re-fetch). Validation keeps this safe by deleting files it
//! rejects, so only archives that once passed the sniff survive between runs.

use crate::retrieve::{RetrieveError, Retriever};
use std::path::Path;

/// How the archive came to exist at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Destination already existed; retriever not invoked.
    AlreadyPresent,
    /// Retriever downloaded it during this run.
    Downloaded,
}

/// Ensures `dest` holds the archive at `url`, downloading it if absent.
pub fn fetch(
    retriever: &dyn Retriever,
    url: &str,
    dest: &Path,
) -> Result<FetchOutcome, RetrieveError> {
    if dest.exists() {
        tracing::info!("already downloaded: {}", dest.display());
        return Ok(FetchOutcome::AlreadyPresent);
    }
    tracing::info!("downloading {} -> {}", url, dest.display());
    retriever.retrieve(url, dest)?;
    Ok(FetchOutcome::Downloaded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;

    /// Spy retriever: counts calls, writes fixed bytes.
    struct Spy {
        calls: Cell<usize>,
        body: Vec<u8>,
    }

    impl Spy {
        fn new(body: &[u8]) -> Self {
            Self {
                calls: Cell::new(0),
                body: body.to_vec(),
            }
        }
    }

    impl Retriever for Spy {
        fn retrieve(&self, _url: &str, dest: &Path) -> Result<(), RetrieveError> {
            self.calls.set(self.calls.get() + 1);
            fs::write(dest, &self.body)?;
            Ok(())
        }
    }

    #[test]
    fn existing_destination_short_circuits() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("PKLot.tar.gz");
        fs::write(&dest, b"stale but present").unwrap();

        let spy = Spy::new(b"fresh");
        let outcome = fetch(&spy, "https://example.com/PKLot.tar.gz", &dest).unwrap();
        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
        assert_eq!(spy.calls.get(), 0, "retriever must not be invoked");
        // content untouched
        assert_eq!(fs::read(&dest).unwrap(), b"stale but present");
    }

    #[test]
    fn missing_destination_invokes_retriever() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("archive.zip");

        let spy = Spy::new(b"archive bytes");
        let outcome = fetch(&spy, "https://example.com/archive.zip", &dest).unwrap();
        assert_eq!(outcome, FetchOutcome::Downloaded);
        assert_eq!(spy.calls.get(), 1);
        assert_eq!(fs::read(&dest).unwrap(), b"archive bytes");
    }

    #[test]
    fn retriever_failure_propagates() {
        struct Failing;
        impl Retriever for Failing {
            fn retrieve(&self, _url: &str, _dest: &Path) -> Result<(), RetrieveError> {
                Err(RetrieveError::Http(403))
            }
        }

        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("archive.zip");
        let err = fetch(&Failing, "https://example.com/archive.zip", &dest).unwrap_err();
        assert!(matches!(err, RetrieveError::Http(403)));
        assert!(!dest.exists());
    }
}
