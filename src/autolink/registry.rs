//! Static registry of GitHub autolink recognizers.
//!
//! `REGISTRY` is the single source of truth for which shorthand syntaxes
//! exist. Its order is the registration order hosts must preserve: when two
//! recognizers match at the same offset, the earlier one wins.

use regex::Captures;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::pattern::{FULL_SHA, Pattern, SEGMENT, SHORT_SHA};
use super::render;
use super::token::Token;
use crate::error::AutolinkError;
use crate::repository::Repository;

/// One of the ten recognizers, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionKind {
    /// `@octocat`
    Mention,
    /// `https://github.com/owner/repo/issues/26`
    IssueUrl,
    /// `https://github.com/owner/repo/pull/26`
    PullRequestUrl,
    /// `#26`
    IssueReference,
    /// `GH-26`
    GhReference,
    /// `owner/repo#26`
    CrossRepoReference,
    /// `https://github.com/owner/repo/commit/<40 hex>`
    CommitUrl,
    /// `a5c3785`
    CommitSha,
    /// `user@a5c3785`
    UserCommit,
    /// `owner/repo@a5c3785`
    RepoCommit,
}

impl ExtensionKind {
    pub const ALL: [ExtensionKind; 10] = [
        Self::Mention,
        Self::IssueUrl,
        Self::PullRequestUrl,
        Self::IssueReference,
        Self::GhReference,
        Self::CrossRepoReference,
        Self::CommitUrl,
        Self::CommitSha,
        Self::UserCommit,
        Self::RepoCommit,
    ];

    /// Registry entry for this recognizer.
    pub fn spec(self) -> &'static ExtensionSpec {
        &REGISTRY[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn requires_repository(self) -> bool {
        self.spec().requires_repository
    }
}

impl FromStr for ExtensionKind {
    type Err = AutolinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REGISTRY
            .iter()
            .find(|spec| spec.name == s)
            .map(|spec| spec.kind)
            .ok_or_else(|| AutolinkError::UnknownExtension(s.to_string()))
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

type Build = fn(&Captures<'_>, Option<&Repository>) -> Token;

/// Immutable definition of one recognizer.
#[derive(Debug)]
pub struct ExtensionSpec {
    pub kind: ExtensionKind,
    pub name: &'static str,
    pub requires_repository: bool,
    pattern: &'static LazyLock<Pattern>,
    build: Build,
}

impl ExtensionSpec {
    /// Earliest byte offset at which this recognizer could match.
    pub fn scan(&self, src: &str) -> Option<usize> {
        self.scan_in(src, true)
    }

    pub(crate) fn scan_in(&self, src: &str, ends_input: bool) -> Option<usize> {
        self.pattern.find_in(src, ends_input)
    }

    /// Anchored match at the start of `src`.
    ///
    /// Returns `None` when `src` does not begin with this syntax. The token's
    /// `raw` is always a non-empty prefix of `src`.
    pub fn tokenize(&self, src: &str, repository: Option<&Repository>) -> Option<Token> {
        self.tokenize_in(src, true, repository)
    }

    pub(crate) fn tokenize_in(
        &self,
        src: &str,
        ends_input: bool,
        repository: Option<&Repository>,
    ) -> Option<Token> {
        let captures = self.pattern.captures_in(src, ends_input)?;
        Some((self.build)(&captures, repository))
    }

    pub fn render(&self, token: &Token) -> String {
        render::render(token)
    }
}

fn group(captures: &Captures<'_>, index: usize) -> String {
    captures
        .get(index)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn github_url(path: &str) -> String {
    format!(r"https?://github\.com/({SEGMENT})/({SEGMENT})/{path}")
}

static MENTION: LazyLock<Pattern> = LazyLock::new(|| Pattern::new(&format!("@({SEGMENT})")));

static ISSUE_URL: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new(&github_url("issues/([0-9]+)")));

static PULL_REQUEST_URL: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new(&github_url("pull/([0-9]+)")));

static ISSUE_REFERENCE: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("#([0-9]+)"));

static GH_REFERENCE: LazyLock<Pattern> = LazyLock::new(|| Pattern::new("(?i:GH)-([0-9]+)"));

static CROSS_REPO_REFERENCE: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new(&format!("({SEGMENT})/({SEGMENT})#([0-9]+)")));

static COMMIT_URL: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new(&github_url(&format!("commit/({FULL_SHA})"))));

static COMMIT_SHA: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::followed_by_space_or_end(&format!("({SHORT_SHA})")));

static USER_COMMIT: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new(&format!("({SEGMENT})@({SHORT_SHA})")));

static REPO_COMMIT: LazyLock<Pattern> =
    LazyLock::new(|| Pattern::new(&format!("({SEGMENT})/({SEGMENT})@({SHORT_SHA})")));

/// All recognizers in registration order. Index matches `ExtensionKind`.
pub static REGISTRY: [ExtensionSpec; 10] = [
    ExtensionSpec {
        kind: ExtensionKind::Mention,
        name: "githubMentions",
        requires_repository: false,
        pattern: &MENTION,
        build: |c, _| Token::Mention {
            raw: group(c, 0),
            username: group(c, 1),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::IssueUrl,
        name: "githubIssueUrl",
        requires_repository: false,
        pattern: &ISSUE_URL,
        build: |c, _| Token::IssueUrl {
            raw: group(c, 0),
            owner: group(c, 1),
            repo: group(c, 2),
            number: group(c, 3),
            url: group(c, 0),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::PullRequestUrl,
        name: "githubPullRequestUrl",
        requires_repository: false,
        pattern: &PULL_REQUEST_URL,
        build: |c, _| Token::PullRequestUrl {
            raw: group(c, 0),
            owner: group(c, 1),
            repo: group(c, 2),
            number: group(c, 3),
            url: group(c, 0),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::IssueReference,
        name: "githubIssueReference",
        requires_repository: true,
        pattern: &ISSUE_REFERENCE,
        build: |c, repository| Token::IssueReference {
            raw: group(c, 0),
            number: group(c, 1),
            repository: repository.cloned(),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::GhReference,
        name: "githubGHReference",
        requires_repository: true,
        pattern: &GH_REFERENCE,
        build: |c, repository| Token::GhReference {
            raw: group(c, 0),
            number: group(c, 1),
            repository: repository.cloned(),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::CrossRepoReference,
        name: "githubCrossRepoReference",
        requires_repository: false,
        pattern: &CROSS_REPO_REFERENCE,
        build: |c, _| Token::CrossRepoReference {
            raw: group(c, 0),
            owner: group(c, 1),
            repo: group(c, 2),
            number: group(c, 3),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::CommitUrl,
        name: "githubCommitUrl",
        requires_repository: false,
        pattern: &COMMIT_URL,
        build: |c, _| Token::CommitUrl {
            raw: group(c, 0),
            owner: group(c, 1),
            repo: group(c, 2),
            sha: group(c, 3),
            url: group(c, 0),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::CommitSha,
        name: "githubCommitSHA",
        requires_repository: true,
        pattern: &COMMIT_SHA,
        build: |c, repository| Token::CommitSha {
            raw: group(c, 0),
            sha: group(c, 1),
            repository: repository.cloned(),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::UserCommit,
        name: "githubUserCommit",
        requires_repository: true,
        pattern: &USER_COMMIT,
        build: |c, repository| Token::UserCommit {
            raw: group(c, 0),
            user: group(c, 1),
            sha: group(c, 2),
            repository: repository.cloned(),
        },
    },
    ExtensionSpec {
        kind: ExtensionKind::RepoCommit,
        name: "githubRepoCommit",
        requires_repository: false,
        pattern: &REPO_COMMIT,
        build: |c, _| Token::RepoCommit {
            raw: group(c, 0),
            owner: group(c, 1),
            repo: group(c, 2),
            sha: group(c, 3),
        },
    },
];
