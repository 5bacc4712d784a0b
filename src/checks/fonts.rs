//! Font availability check: do all the files of a web font answer `200 OK`?
//!
//! A web font is served as several files under one base URL (one per weight
//! and style, plus the `@font-face` stylesheet). The probe requests each of
//! them in order and fails on the first one whose final status line, after
//! redirects, lacks `200 OK`:
//!
//! ```text
//! ERROR italic HTTP/1.1 404 Not Found
//! ```
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::probe::fetch::Fetcher;
use crate::probe::status::Verdict;

pub const ALL_FOUND: &str = "Found All Fonts and CSS";

const EXPECTED_STATUS: &str = "200 OK";

/// A named file under the font base URL.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub name: String,
    /// Path relative to the base URL.
    pub path: String,
}

impl Resource {
    #[must_use]
    pub fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_owned(),
            path: path.to_owned(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid resource `{0}`, expected NAME=PATH")]
pub struct ParseResourceError(String);

impl FromStr for Resource {
    type Err = ParseResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, path)) if !name.trim().is_empty() && !path.trim().is_empty() => {
                Ok(Resource::new(name.trim(), path.trim()))
            }
            _ => Err(ParseResourceError(s.to_owned())),
        }
    }
}

/// The BentonSans files: four weights and the stylesheet.
#[must_use]
pub fn default_resources() -> Vec<Resource> {
    vec![
        Resource::new("light", "lt/woff"),
        Resource::new("light-italic", "ltit/woff"),
        Resource::new("regular", "reg/woff"),
        Resource::new("italic", "it/woff"),
        Resource::new("css", "fontface.css"),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckInput {
    base_url: Url,
    pub resources: Vec<Resource>,
}

impl CheckInput {
    /// Resource paths are appended to the base URL, so its path always ends
    /// with a `/`.
    #[must_use]
    pub fn new(mut base_url: Url, resources: Vec<Resource>) -> Self {
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self { base_url, resources }
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

pub async fn run(fetcher: &Fetcher, input: &CheckInput) -> Verdict {
    for resource in &input.resources {
        let url = match input.base_url.join(resource.path.trim_start_matches('/')) {
            Ok(url) => url,
            Err(err) => return Verdict::unknown(format!("UNKNOWN - Invalid path for {resource}: {err}")),
        };

        match fetcher.fetch_status_line(&url).await {
            Ok(status_line) if status_line.contains(EXPECTED_STATUS) => {
                tracing::debug!(name = %resource.name, %status_line, "font resource found");
            }
            Ok(status_line) => return Verdict::critical(format!("ERROR {} {status_line}", resource.name)),
            Err(err) => {
                tracing::debug!(name = %resource.name, %err, "no response for font resource");
                return Verdict::critical(format!("ERROR {} Headers Not Found", resource.name));
            }
        }
    }

    Verdict::ok(ALL_FOUND)
}
