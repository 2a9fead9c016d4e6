//! GitHub autolinked references as inline parser extensions.
//!
//! Recognizes the shorthand GitHub turns into links: `@mentions`, issue and
//! pull request URLs, `#26`, `GH-26`, `owner/repo#26`, commit URLs, bare
//! commit SHAs, `user@sha` and `owner/repo@sha`. Each recognizer is a pure
//! scan/tokenize/render triad. A host inline parser drives them; see
//! `MarkdownRenderer` for the comrak based host in this crate.

mod extension;
mod pattern;
mod registry;
mod render;
mod token;

pub use extension::{
    AutolinkOptions, Extension, Extensions, Level, github_autolinks, github_commit_sha,
    github_commit_url, github_cross_repo_reference, github_gh_reference, github_issue_reference,
    github_issue_url, github_mentions, github_pull_request_url, github_repo_commit,
    github_user_commit,
};
pub use registry::{ExtensionKind, ExtensionSpec, REGISTRY};
pub use render::render;
pub use token::Token;
