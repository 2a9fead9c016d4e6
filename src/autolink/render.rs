//! HTML fragments for recognized tokens.
//!
//! Output is a single anchor or escaped text. maud escapes every
//! interpolated value, so untrusted body text cannot break out of the
//! attribute or element it lands in.

use maud::{Markup, html};

use super::token::{Token, short_sha};
use crate::repository::{GITHUB_BASE_URL, Repository, commit_url, issue_url};

fn link(href: &str, text: &str) -> Markup {
    html! {
        a href=(href) { (text) }
    }
}

fn unlinked(raw: &str) -> Markup {
    html! { (raw) }
}

/// Renders a token to HTML.
///
/// Relative references render a link only when a repository was bound.
/// Without one they degrade to their raw text so the same body can be
/// previewed outside a repository page.
pub fn render(token: &Token) -> String {
    let markup = match token {
        Token::Mention { raw, username } => {
            link(&format!("{GITHUB_BASE_URL}/{username}"), raw)
        }
        Token::IssueUrl { number, url, .. } | Token::PullRequestUrl { number, url, .. } => {
            link(url, &format!("#{number}"))
        }
        Token::IssueReference {
            raw,
            number,
            repository,
        }
        | Token::GhReference {
            raw,
            number,
            repository,
        } => match repository {
            Some(repository) => link(&repository.issue_url(number), raw),
            None => unlinked(raw),
        },
        Token::CrossRepoReference {
            raw,
            owner,
            repo,
            number,
        } => link(&issue_url(owner, repo, number), raw),
        Token::CommitUrl { sha, url, .. } => link(url, short_sha(sha)),
        Token::CommitSha {
            raw,
            sha,
            repository,
        } => relative_commit(raw, sha, repository.as_ref(), None),
        Token::UserCommit {
            raw,
            user,
            sha,
            repository,
        } => relative_commit(raw, sha, repository.as_ref(), Some(user.as_str())),
        Token::RepoCommit {
            owner, repo, sha, ..
        } => link(
            &commit_url(owner, repo, sha),
            &format!("{owner}/{repo}@{}", short_sha(sha)),
        ),
    };

    markup.into_string()
}

fn relative_commit(
    raw: &str,
    sha: &str,
    repository: Option<&Repository>,
    user: Option<&str>,
) -> Markup {
    let Some(repository) = repository else {
        return unlinked(raw);
    };

    let text = match user {
        Some(user) => format!("{user}@{}", short_sha(sha)),
        None => short_sha(sha).to_string(),
    };
    link(&repository.commit_url(sha), &text)
}
