//! Streaming HTTP retrieval via libcurl.
//!
//! Single GET, body streamed straight to a `.part` file and renamed into
//! place on success, so a failed transfer never leaves a file at the
//! destination. Sends a browser-like User-Agent; several dataset hosts
//! reject the default library agent.

use super::{temp_path, RetrieveError, Retriever};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Duration;

pub struct CurlRetriever {
    user_agent: String,
}

impl CurlRetriever {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
        }
    }

    fn stream_to(&self, url: &str, tmp: &Path) -> Result<(), RetrieveError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(Duration::from_secs(30))?;
        // Abort transfers that stall below 1 KiB/s for a minute.
        easy.low_speed_limit(1024)?;
        easy.low_speed_time(Duration::from_secs(60))?;

        let mut out = BufWriter::new(fs::File::create(tmp)?);
        let mut write_err: Option<std::io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match out.write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    write_err = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        if let Some(io) = write_err {
            return Err(RetrieveError::Io(io));
        }
        performed?;
        out.flush()?;

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(RetrieveError::Http(code));
        }
        // A login wall or block page comes back 200 with an HTML body.
        if let Ok(Some(content_type)) = easy.content_type() {
            if content_type.to_ascii_lowercase().contains("text/html") {
                return Err(RetrieveError::HtmlResponse);
            }
        }
        Ok(())
    }
}

impl Retriever for CurlRetriever {
    fn retrieve(&self, url: &str, dest: &Path) -> Result<(), RetrieveError> {
        let tmp = temp_path(dest);
        match self.stream_to(url, &tmp) {
            Ok(()) => {
                fs::rename(&tmp, dest)?;
                Ok(())
            }
            Err(err) => {
                if let Err(rm) = fs::remove_file(&tmp) {
                    if rm.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!("could not remove {}: {}", tmp.display(), rm);
                    }
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_transfer_leaves_no_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("archive.zip");
        let retriever = CurlRetriever::new("Mozilla/5.0");
        // Nothing listens on this port; the connect fails fast.
        let err = retriever
            .retrieve("http://127.0.0.1:1/archive.zip", &dest)
            .unwrap_err();
        assert!(matches!(err, RetrieveError::Curl(_)));
        assert!(!dest.exists());
        assert!(!temp_path(&dest).exists());
    }
}
