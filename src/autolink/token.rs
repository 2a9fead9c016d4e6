//! Tokens produced by a successful anchored match.

use super::registry::ExtensionKind;
use crate::repository::Repository;

/// Structured result of one tokenizer call.
///
/// Every variant carries `raw`, the exact prefix of the input that was
/// consumed. Other fields come from the match captures, plus the bound
/// repository for references that are relative to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Mention {
        raw: String,
        username: String,
    },
    IssueUrl {
        raw: String,
        owner: String,
        repo: String,
        number: String,
        url: String,
    },
    PullRequestUrl {
        raw: String,
        owner: String,
        repo: String,
        number: String,
        url: String,
    },
    IssueReference {
        raw: String,
        number: String,
        repository: Option<Repository>,
    },
    GhReference {
        raw: String,
        number: String,
        repository: Option<Repository>,
    },
    CrossRepoReference {
        raw: String,
        owner: String,
        repo: String,
        number: String,
    },
    CommitUrl {
        raw: String,
        owner: String,
        repo: String,
        sha: String,
        url: String,
    },
    CommitSha {
        raw: String,
        sha: String,
        repository: Option<Repository>,
    },
    UserCommit {
        raw: String,
        user: String,
        sha: String,
        repository: Option<Repository>,
    },
    RepoCommit {
        raw: String,
        owner: String,
        repo: String,
        sha: String,
    },
}

impl Token {
    /// Recognizer that produced this token.
    pub fn kind(&self) -> ExtensionKind {
        match self {
            Self::Mention { .. } => ExtensionKind::Mention,
            Self::IssueUrl { .. } => ExtensionKind::IssueUrl,
            Self::PullRequestUrl { .. } => ExtensionKind::PullRequestUrl,
            Self::IssueReference { .. } => ExtensionKind::IssueReference,
            Self::GhReference { .. } => ExtensionKind::GhReference,
            Self::CrossRepoReference { .. } => ExtensionKind::CrossRepoReference,
            Self::CommitUrl { .. } => ExtensionKind::CommitUrl,
            Self::CommitSha { .. } => ExtensionKind::CommitSha,
            Self::UserCommit { .. } => ExtensionKind::UserCommit,
            Self::RepoCommit { .. } => ExtensionKind::RepoCommit,
        }
    }

    /// Token type tag, identical to the producing extension's name.
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    /// Exact substring consumed from the input.
    pub fn raw(&self) -> &str {
        match self {
            Self::Mention { raw, .. }
            | Self::IssueUrl { raw, .. }
            | Self::PullRequestUrl { raw, .. }
            | Self::IssueReference { raw, .. }
            | Self::GhReference { raw, .. }
            | Self::CrossRepoReference { raw, .. }
            | Self::CommitUrl { raw, .. }
            | Self::CommitSha { raw, .. }
            | Self::UserCommit { raw, .. }
            | Self::RepoCommit { raw, .. } => raw,
        }
    }

    /// Repository bound at construction, for relative references.
    pub fn repository(&self) -> Option<&Repository> {
        match self {
            Self::IssueReference { repository, .. }
            | Self::GhReference { repository, .. }
            | Self::CommitSha { repository, .. }
            | Self::UserCommit { repository, .. } => repository.as_ref(),
            _ => None,
        }
    }
}

/// First seven characters of a commit hash, as GitHub displays it.
pub(crate) fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}
