//! String check: is a string present in a resource?
//!
//! ```text
//! check_string --url https://example.com --str "Welcome"   ->  OK - String Found
//! ```
//!
//! The body is searched as bytes, so a resource that is not valid UTF-8 can
//! still be checked. A match at the very start of the body counts.
//!
//! The response can optionally be staged on disk before searching it (see
//! [`Staging`]). The staged file lives only for the duration of the search
//! and is removed on every path.
use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use url::Url;

use crate::probe::fetch::Fetcher;
use crate::probe::status::Verdict;

pub const STRING_FOUND: &str = "OK - String Found";
pub const STRING_NOT_FOUND: &str = "CRITICAL - String Not Found";

const STAGED_FILE_PREFIX: &str = "string_check_";

/// Where the fetched body is kept while it is searched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Staging {
    #[default]
    InMemory,
    /// In a temporary file created in the given directory.
    TempFile { dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInput {
    pub url: Url,
    pub needle: String,
    pub staging: Staging,
}

pub async fn run(fetcher: &Fetcher, input: &CheckInput) -> Verdict {
    let body = match fetcher.fetch_body(&input.url).await {
        Ok(body) => body,
        Err(err) => {
            tracing::debug!(%err, "fetch failed");
            return err.verdict();
        }
    };

    let body = match &input.staging {
        Staging::InMemory => body,
        Staging::TempFile { dir } => match stage(dir, &body) {
            Ok(staged) => staged,
            Err(err) => {
                tracing::debug!(%err, dir = %dir.display(), "staging failed");
                return Verdict::unknown(format!("UNKNOWN - Could not stage the response on disk: {err}"));
            }
        },
    };

    search(&body, &input.needle)
}

#[must_use]
pub fn search(haystack: &[u8], needle: &str) -> Verdict {
    if contains(haystack, needle.as_bytes()) {
        Verdict::ok(STRING_FOUND)
    } else {
        Verdict::critical(STRING_NOT_FOUND)
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// Writes the body to a temporary file and reads it back.
///
/// The file is deleted when the `NamedTempFile` is dropped, which happens
/// before this function returns, including when writing or reading fails.
fn stage(dir: &Path, body: &[u8]) -> io::Result<Vec<u8>> {
    let mut staged = tempfile::Builder::new().prefix(STAGED_FILE_PREFIX).tempfile_in(dir)?;

    tracing::trace!(path = %staged.path().display(), "staging the response");

    staged.write_all(body)?;
    staged.flush()?;

    fs::read(staged.path())
}
