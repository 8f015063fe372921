//! Archive filename derivation.
//!
//! Derives a safe local filename for a dataset archive from its source URL,
//! sanitized for Linux filesystems. Query strings and fragments are ignored,
//! so mirror URLs like `.../CCPD2019.tar.xz?download=1` still yield the
//! archive name.

use url::Url;

/// Default filename when the URL path yields nothing usable.
const DEFAULT_ARCHIVE_NAME: &str = "dataset.bin";

/// Derives a safe archive filename from the last path segment of `url`.
pub fn archive_name_from_url(url: &str) -> String {
    let candidate = Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|segments| segments.filter(|s| !s.is_empty()).last().map(String::from))
        })
        .filter(|s| !s.is_empty());

    let raw = match candidate {
        Some(c) => c,
        None => return DEFAULT_ARCHIVE_NAME.to_string(),
    };

    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_ARCHIVE_NAME.to_string()
    } else {
        sanitized
    }
}

/// Sanitizes a candidate filename for safe use on Linux: NUL, path
/// separators, control characters and whitespace become `_` (runs collapsed),
/// leading/trailing dots and underscores are trimmed, length capped at
/// NAME_MAX (255 bytes).
fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    let mut prev_underscore = false;
    for c in name.chars() {
        let keep = !(c == '\0' || c == '/' || c == '\\' || c.is_control() || c.is_whitespace());
        if keep {
            out.push(c);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    if trimmed.len() > NAME_MAX {
        let mut take = NAME_MAX;
        while take > 0 && !trimmed.is_char_boundary(take) {
            take -= 1;
        }
        trimmed[..take].to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_from_plain_url() {
        assert_eq!(
            archive_name_from_url("https://www.inf.ufpr.br/vri/databases/PKLot.tar.gz"),
            "PKLot.tar.gz"
        );
    }

    #[test]
    fn query_string_is_ignored() {
        assert_eq!(
            archive_name_from_url(
                "https://zenodo.org/records/15647076/files/CCPD2019.tar.xz?download=1"
            ),
            "CCPD2019.tar.xz"
        );
    }

    #[test]
    fn trailing_slash_falls_back_to_earlier_segment() {
        assert_eq!(
            archive_name_from_url("https://example.com/files/archive.zip/"),
            "archive.zip"
        );
    }

    #[test]
    fn bare_host_uses_default() {
        assert_eq!(archive_name_from_url("https://example.com/"), "dataset.bin");
        assert_eq!(archive_name_from_url("not a url"), "dataset.bin");
    }

    #[test]
    fn unsafe_characters_are_replaced() {
        assert_eq!(sanitize_filename("a b\tc.zip"), "a_b_c.zip");
        assert_eq!(sanitize_filename("..hidden.."), "hidden");
    }
}
