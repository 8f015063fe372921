//! Retrieval by shelling out to an external download utility.
//!
//! Fallback for environments where library HTTP is blocked by a proxy but a
//! system tool (curl by default) is configured to get through. Arguments are
//! curl-compatible: `-fsSL -A <agent> -o <file> <url>`.

use super::{temp_path, RetrieveError, Retriever};
use std::fs;
use std::path::Path;
use std::process::Command;

pub struct ExternalRetriever {
    program: String,
    user_agent: String,
}

impl ExternalRetriever {
    pub fn new(program: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            user_agent: user_agent.into(),
        }
    }

    fn run(&self, url: &str, tmp: &Path) -> Result<(), RetrieveError> {
        // -f: non-2xx exits non-zero instead of saving the error page.
        let status = Command::new(&self.program)
            .arg("-fsSL")
            .arg("-A")
            .arg(&self.user_agent)
            .arg("-o")
            .arg(tmp)
            .arg(url)
            .status()?;
        if !status.success() {
            return Err(RetrieveError::CommandFailed {
                program: self.program.clone(),
                code: status.code(),
            });
        }
        Ok(())
    }
}

impl Retriever for ExternalRetriever {
    fn retrieve(&self, url: &str, dest: &Path) -> Result<(), RetrieveError> {
        let tmp = temp_path(dest);
        match self.run(url, &tmp) {
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
    fn missing_program_reports_io() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("archive.zip");
        let retriever = ExternalRetriever::new("cvget-no-such-tool", "Mozilla/5.0");
        let err = retriever
            .retrieve("https://example.com/archive.zip", &dest)
            .unwrap_err();
        assert!(matches!(err, RetrieveError::Io(_)));
        assert!(!dest.exists());
    }

    #[test]
    fn failing_command_reports_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let dest = tmp.path().join("archive.zip");
        // `false` ignores its arguments and exits 1.
        let retriever = ExternalRetriever::new("false", "Mozilla/5.0");
        let err = retriever
            .retrieve("https://example.com/archive.zip", &dest)
            .unwrap_err();
        match err {
            RetrieveError::CommandFailed { program, code } => {
                assert_eq!(program, "false");
                assert_eq!(code, Some(1));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!dest.exists());
    }
}
