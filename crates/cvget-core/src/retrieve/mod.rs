//! Retrieval backends.
//!
//! A [`Retriever`] turns a URL into a file on disk. Two production backends:
//! a streaming libcurl client with a configurable User-Agent, and a fallback
//! that shells out to an external download utility for environments where
//! library HTTP is blocked by a proxy. Both report failure as an error value;
//! neither aborts the run.

mod curl_client;
mod external;

pub use curl_client::CurlRetriever;
pub use external::ExternalRetriever;

use crate::config::{CvgetConfig, RetrievalBackend};
use std::path::Path;
use thiserror::Error;

/// Error from a single retrieval attempt. Always recovered by the caller;
/// a failed dataset is reported and the run continues.
#[derive(Debug, Error)]
pub enum RetrieveError {
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// Non-2xx response status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Server answered with an HTML page instead of an archive (blocked URL,
    /// login wall, or error page).
    #[error("server returned HTML instead of an archive")]
    HtmlResponse,
    /// External download utility exited non-zero or was killed by a signal.
    #[error("external downloader {program} failed (exit code {code:?})")]
    CommandFailed {
        program: String,
        code: Option<i32>,
    },
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
}

/// A mechanism that downloads `url` into the file at `dest`.
///
/// Implementations must not leave a file at `dest` on failure; a partial
/// download left behind would be mistaken for a finished one by the
/// existence check on the next run.
pub trait Retriever {
    fn retrieve(&self, url: &str, dest: &Path) -> Result<(), RetrieveError>;
}

/// Builds the retriever selected by the configuration.
pub fn from_config(cfg: &CvgetConfig) -> Box<dyn Retriever> {
    match cfg.backend {
        RetrievalBackend::Curl => Box::new(CurlRetriever::new(cfg.user_agent())),
        RetrievalBackend::External => Box::new(ExternalRetriever::new(
            cfg.external_command(),
            cfg.user_agent(),
        )),
    }
}

/// Path for the in-progress file: appends `.part` to the final path.
pub(crate) fn temp_path(final_path: &Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(".part");
    std::path::PathBuf::from(o)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("/tmp/PKLot.tar.gz"));
        assert_eq!(p.to_string_lossy(), "/tmp/PKLot.tar.gz.part");
    }

    #[test]
    fn from_config_honors_backend() {
        // Just exercise both arms; behavior is covered per backend.
        let mut cfg = CvgetConfig::default();
        let _ = from_config(&cfg);
        cfg.backend = RetrievalBackend::External;
        let _ = from_config(&cfg);
    }
}
