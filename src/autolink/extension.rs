//! Extension factory binding recognizers to a repository context.

use tracing::{debug, warn};

use super::registry::{ExtensionKind, ExtensionSpec};
use super::token::Token;
use crate::error::AutolinkError;
use crate::repository::Repository;

/// Construction options shared by every extension in a bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AutolinkOptions {
    /// Repository (`owner/repo`) bare references resolve against.
    pub repository: Option<String>,
}

impl AutolinkOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repository(repository: impl Into<String>) -> Self {
        Self {
            repository: Some(repository.into()),
        }
    }
}

/// Parser level an extension hooks into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Inline,
}

/// Validates the repository once for a set of recognizers.
///
/// A malformed repository is only an error when one of the recognizers
/// needs it. Recognizers that never resolve relative references ignore it.
fn bind_repository(
    options: &AutolinkOptions,
    requires_repository: bool,
) -> Result<Option<Repository>, AutolinkError> {
    match Repository::parse_optional(options.repository.as_deref()) {
        Ok(repository) => Ok(repository),
        Err(err) if requires_repository => Err(err),
        Err(err) => {
            warn!(%err, "Ignoring repository, no selected extension uses it");
            Ok(None)
        }
    }
}

/// A recognizer bound to its repository context.
///
/// Exposes the triad a host inline parser drives: `start` to find where a
/// match could begin, `tokenize` to consume exactly there, and `render` to
/// produce the HTML fragment.
#[derive(Debug, Clone)]
pub struct Extension {
    spec: &'static ExtensionSpec,
    repository: Option<Repository>,
}

impl Extension {
    /// Builds a single extension.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepositoryFormat` when the recognizer needs a
    /// repository and the supplied one is malformed.
    pub fn new(kind: ExtensionKind, options: &AutolinkOptions) -> Result<Self, AutolinkError> {
        let repository = bind_repository(options, kind.requires_repository())?;
        Ok(Self::bind(kind, repository))
    }

    fn bind(kind: ExtensionKind, repository: Option<Repository>) -> Self {
        Self {
            spec: kind.spec(),
            repository,
        }
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    pub fn kind(&self) -> ExtensionKind {
        self.spec.kind
    }

    pub fn level(&self) -> Level {
        Level::Inline
    }

    pub fn repository(&self) -> Option<&Repository> {
        self.repository.as_ref()
    }

    /// Byte offset of the earliest possible match in `src`, if any.
    pub fn start(&self, src: &str) -> Option<usize> {
        self.spec.scan(src)
    }

    pub(crate) fn start_in(&self, src: &str, ends_input: bool) -> Option<usize> {
        self.spec.scan_in(src, ends_input)
    }

    /// Consumes a token at the very start of `src`.
    pub fn tokenize(&self, src: &str) -> Option<Token> {
        self.spec.tokenize(src, self.repository.as_ref())
    }

    pub(crate) fn tokenize_in(&self, src: &str, ends_input: bool) -> Option<Token> {
        self.spec.tokenize_in(src, ends_input, self.repository.as_ref())
    }

    pub fn render(&self, token: &Token) -> String {
        self.spec.render(token)
    }
}

/// Ordered set of extensions sharing one repository context.
#[derive(Debug, Clone)]
pub struct Extensions {
    extensions: Vec<Extension>,
}

impl Extensions {
    /// Every recognizer in registration order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepositoryFormat` for a malformed repository.
    pub fn all(options: &AutolinkOptions) -> Result<Self, AutolinkError> {
        Self::from_kinds(ExtensionKind::ALL, options)
    }

    /// The given recognizers, kept in registration order.
    ///
    /// Duplicates collapse to one entry. The repository is validated once
    /// for the whole set.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRepositoryFormat` when any selected recognizer needs
    /// a repository and the supplied one is malformed.
    pub fn from_kinds(
        kinds: impl IntoIterator<Item = ExtensionKind>,
        options: &AutolinkOptions,
    ) -> Result<Self, AutolinkError> {
        let selected: Vec<ExtensionKind> = kinds.into_iter().collect();
        let kinds: Vec<ExtensionKind> = ExtensionKind::ALL
            .into_iter()
            .filter(|kind| selected.contains(kind))
            .collect();

        let requires_repository = kinds.iter().any(|kind| kind.requires_repository());
        let repository = bind_repository(options, requires_repository)?;

        debug!(
            extensions = kinds.len(),
            repository = repository.as_ref().map(Repository::as_str),
            "Built autolink extensions"
        );

        Ok(Self {
            extensions: kinds
                .into_iter()
                .map(|kind| Extension::bind(kind, repository.clone()))
                .collect(),
        })
    }

    /// Recognizers selected by registry name.
    ///
    /// # Errors
    ///
    /// Returns `UnknownExtension` for a name not in the registry, or
    /// `InvalidRepositoryFormat` as for `from_kinds`.
    pub fn from_names<S: AsRef<str>>(
        names: &[S],
        options: &AutolinkOptions,
    ) -> Result<Self, AutolinkError> {
        let kinds = names
            .iter()
            .map(|name| name.as_ref().parse())
            .collect::<Result<Vec<ExtensionKind>, _>>()?;
        Self::from_kinds(kinds, options)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Extension> {
        self.extensions.iter()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.extensions.iter().map(Extension::name).collect()
    }

    pub fn get(&self, kind: ExtensionKind) -> Option<&Extension> {
        self.extensions.iter().find(|ext| ext.kind() == kind)
    }

    /// Minimum `start` offset across the set.
    pub fn start(&self, src: &str) -> Option<usize> {
        self.start_in(src, true)
    }

    /// Minimum `start` offset for a text run that may not end the input.
    pub(crate) fn start_in(&self, src: &str, ends_input: bool) -> Option<usize> {
        self.extensions
            .iter()
            .filter_map(|ext| ext.start_in(src, ends_input))
            .min()
    }

    /// First extension, in registration order, that tokenizes at the start
    /// of `src`.
    pub fn tokenize(&self, src: &str) -> Option<(&Extension, Token)> {
        self.tokenize_in(src, true)
    }

    pub(crate) fn tokenize_in(&self, src: &str, ends_input: bool) -> Option<(&Extension, Token)> {
        self.extensions
            .iter()
            .find_map(|ext| ext.tokenize_in(src, ends_input).map(|token| (ext, token)))
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = &'a Extension;
    type IntoIter = std::slice::Iter<'a, Extension>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Bundle of every GitHub autolink extension.
///
/// # Errors
///
/// Returns `InvalidRepositoryFormat` for a malformed repository.
pub fn github_autolinks(options: &AutolinkOptions) -> Result<Extensions, AutolinkError> {
    Extensions::all(options)
}

macro_rules! named_extension {
    ($(#[$doc:meta])* $fn_name:ident => $kind:ident) => {
        $(#[$doc])*
        ///
        /// # Errors
        ///
        /// Returns `InvalidRepositoryFormat` if this recognizer needs a
        /// repository and the supplied one is malformed.
        pub fn $fn_name(options: &AutolinkOptions) -> Result<Extensions, AutolinkError> {
            Extensions::from_kinds([ExtensionKind::$kind], options)
        }
    };
}

named_extension!(
    /// `@username` mentions.
    github_mentions => Mention
);
named_extension!(
    /// Issue URLs.
    github_issue_url => IssueUrl
);
named_extension!(
    /// Pull request URLs.
    github_pull_request_url => PullRequestUrl
);
named_extension!(
    /// Bare `#26` references.
    github_issue_reference => IssueReference
);
named_extension!(
    /// `GH-26` references.
    github_gh_reference => GhReference
);
named_extension!(
    /// `owner/repo#26` references.
    github_cross_repo_reference => CrossRepoReference
);
named_extension!(
    /// Commit URLs.
    github_commit_url => CommitUrl
);
named_extension!(
    /// Bare commit SHAs.
    github_commit_sha => CommitSha
);
named_extension!(
    /// `user@sha` commits.
    github_user_commit => UserCommit
);
named_extension!(
    /// `owner/repo@sha` commits.
    github_repo_commit => RepoCommit
);
