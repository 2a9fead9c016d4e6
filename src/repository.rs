//! Repository context used to resolve relative references.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::AutolinkError;

/// Base URL every generated link points into.
pub const GITHUB_BASE_URL: &str = "https://github.com";

static REPOSITORY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("repository regex"));

/// Validated `owner/repo` pair.
///
/// Bare references such as `#26`, `GH-26`, a bare commit SHA or `user@sha`
/// only make sense relative to a repository. The value is checked once when
/// extensions are built and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repository {
    full: String,
    slash: usize,
}

impl Repository {
    /// Parses `owner/repo`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepositoryFormat` unless the value is exactly two
    /// segments of word characters, dots or hyphens joined by one slash.
    pub fn parse(value: &str) -> Result<Self, AutolinkError> {
        if !REPOSITORY_REGEX.is_match(value) {
            return Err(AutolinkError::InvalidRepositoryFormat(value.to_string()));
        }

        let slash = value
            .find('/')
            .ok_or_else(|| AutolinkError::InvalidRepositoryFormat(value.to_string()))?;

        Ok(Self {
            full: value.to_string(),
            slash,
        })
    }

    /// Parses an optional context where absence, including the empty
    /// string, is valid.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepositoryFormat` for a present but malformed value.
    pub fn parse_optional(value: Option<&str>) -> Result<Option<Self>, AutolinkError> {
        match value {
            None | Some("") => Ok(None),
            Some(value) => Self::parse(value).map(Some),
        }
    }

    pub fn owner(&self) -> &str {
        &self.full[..self.slash]
    }

    pub fn name(&self) -> &str {
        &self.full[self.slash + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Link target for an issue or pull request number in this repository.
    pub fn issue_url(&self, number: &str) -> String {
        issue_url(self.owner(), self.name(), number)
    }

    /// Link target for a commit in this repository.
    pub fn commit_url(&self, sha: &str) -> String {
        commit_url(self.owner(), self.name(), sha)
    }
}

/// Builds `https://github.com/{owner}/{repo}/issues/{number}`.
pub fn issue_url(owner: &str, repo: &str, number: &str) -> String {
    format!("{GITHUB_BASE_URL}/{owner}/{repo}/issues/{number}")
}

/// Builds `https://github.com/{owner}/{repo}/commit/{sha}`.
pub fn commit_url(owner: &str, repo: &str, sha: &str) -> String {
    format!("{GITHUB_BASE_URL}/{owner}/{repo}/commit/{sha}")
}

impl FromStr for Repository {
    type Err = AutolinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}
