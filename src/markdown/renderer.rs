//! Markdown rendering with GitHub Flavored Markdown support.

use anyhow::{Context, Result};
use comrak::{Arena, Options, format_html, parse_document};
use std::path::Path;
use tracing::debug;

use super::{alert, emoji, inline};
use crate::autolink::Extensions;

/// Renders markdown to HTML with GitHub Flavored Markdown extensions.
///
/// Provides GFM tables, strikethrough, task lists, footnotes, description
/// lists, emoji shortcodes, alert blockquotes and hard line breaks.
/// Optionally runs a bundle of GitHub autolink extensions over inline text.
///
/// Raw HTML passes through. Callers rendering untrusted input must run the
/// output through an allow-list sanitizer before display.
pub struct MarkdownRenderer<'a> {
    options: Options<'a>,
    extensions: Option<Extensions>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Creates renderer with GitHub Flavored Markdown options.
    ///
    /// Configures all GFM extensions:
    /// - Tables, strikethrough, autolinks, task lists, footnotes
    /// - Emoji shortcodes (`:rocket:`, plus `:hooray:` and `:laugh:`)
    /// - Alert blockquotes (`> [!NOTE]`)
    /// - Newlines inside paragraphs render as `<br />`
    /// - Raw HTML passthrough
    pub fn new() -> Self {
        let mut options = Options::default();

        // Extension options (GFM features)
        options.extension.strikethrough = true;
        options.extension.table = true;
        options.extension.autolink = true;
        options.extension.tasklist = true;
        options.extension.footnotes = true;
        options.extension.description_lists = true;
        options.extension.shortcodes = true;

        // Render options (sanitized downstream)
        options.render.hardbreaks = true;
        options.render.unsafe_ = true;

        // Keeps backslash escapes as their own nodes until rendering
        options.render.escaped_char_spans = true;

        Self {
            options,
            extensions: None,
        }
    }

    /// Creates renderer that applies GitHub autolink extensions.
    ///
    /// Bare URLs still autolink. A bare URL that begins with a GitHub issue,
    /// pull request or commit URL goes to the extensions instead.
    ///
    /// # Arguments
    ///
    /// * `extensions`: Autolink extensions, already bound to a repository
    pub fn with_extensions(extensions: Extensions) -> Self {
        Self {
            extensions: Some(extensions),
            ..Self::new()
        }
    }

    pub fn extensions(&self) -> Option<&Extensions> {
        self.extensions.as_ref()
    }

    /// Renders markdown content to HTML string.
    ///
    /// Parses markdown into AST, rewrites alerts and emoji aliases, runs
    /// autolink extensions over text nodes, and formats the tree as HTML.
    /// Empty input yields an empty string.
    ///
    /// # Arguments
    ///
    /// * `content`: Markdown content to render
    ///
    /// # Errors
    ///
    /// Returns error if HTML formatting fails
    pub fn render(&self, content: &str) -> Result<String> {
        if content.is_empty() {
            return Ok(String::new());
        }

        let arena = Arena::new();
        let root = parse_document(&arena, content, &self.options);

        alert::apply(&arena, root);
        emoji::expand_aliases(&arena, root);

        if let Some(extensions) = &self.extensions {
            debug!(extensions = extensions.len(), "Applying autolink extensions");
            inline::apply(&arena, root, extensions);
        }
        inline::unwrap_escapes(root);

        let mut html = Vec::with_capacity(content.len() * 2);
        format_html(root, &self.options, &mut html).context("Failed to format HTML")?;

        String::from_utf8(html).context("Rendered HTML contains invalid UTF8")
    }

    /// Renders markdown file at given path.
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read or rendering fails
    pub fn render_file(&self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read markdown file: {}", path.display()))?;
        self.render(&content)
    }
}

impl<'a> Default for MarkdownRenderer<'a> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autolink::{AutolinkOptions, github_autolinks, github_mentions};

    const SHA: &str = "a5c3785ed8d6a35868bc169f07e40e889087fd2e";

    fn autolink_renderer(repository: Option<&str>) -> MarkdownRenderer<'static> {
        let options = AutolinkOptions {
            repository: repository.map(String::from),
        };
        let extensions = github_autolinks(&options).expect("Should build extensions");
        MarkdownRenderer::with_extensions(extensions)
    }

    #[test]
    fn test_render_heading_and_emphasis() {
        // Arrange
        let renderer = autolink_renderer(None);
        let markdown = "# Hello @octocat\n\nThis is **bold** text.";

        // Act
        let html = renderer.render(markdown).expect("Should render markdown");

        // Assert
        assert_eq!(
            html,
            "<h1>Hello <a href=\"https://github.com/octocat\">@octocat</a></h1>\n\
             <p>This is <strong>bold</strong> text.</p>\n"
        );
    }

    #[test]
    fn test_render_references_in_table_cells() {
        // Arrange
        let renderer = autolink_renderer(Some("octo/repo"));
        let markdown = r#"
| Issue | Author   |
|-------|----------|
| #1    | @octocat |
"#;

        // Act
        let html = renderer.render(markdown).expect("Should render table");

        // Assert
        assert!(html.contains("<table>"), "Should contain table tag");
        assert!(
            html.contains(r#"<td><a href="https://github.com/octo/repo/issues/1">#1</a></td>"#),
            "Issue cell: {}",
            html
        );
        assert!(
            html.contains(r#"<td><a href="https://github.com/octocat">@octocat</a></td>"#),
            "Author cell: {}",
            html
        );
    }

    #[test]
    fn test_render_references_in_tasklist() {
        // Arrange
        let renderer = autolink_renderer(Some("octo/repo"));
        let markdown = "- [ ] Review #1\n- [x] Ping @octocat\n";

        // Act
        let html = renderer.render(markdown).expect("Should render tasklist");

        // Assert
        assert!(
            html.contains("type=\"checkbox\""),
            "Should contain checkbox: {}",
            html
        );
        assert!(html.contains(r#"Review <a href="https://github.com/octo/repo/issues/1">#1</a>"#));
        assert!(html.contains(r#"Ping <a href="https://github.com/octocat">@octocat</a>"#));
    }

    #[test]
    fn test_render_hard_breaks() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("first line\nsecond line")
            .expect("Should render");

        // Assert
        assert!(html.contains("<br />"), "Newline should break: {}", html);
    }

    #[test]
    fn test_render_emoji_shortcodes() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer.render("Shipped :rocket:").expect("Should render");

        // Assert
        assert!(html.contains('\u{1F680}'), "Should contain rocket: {}", html);
    }

    #[test]
    fn test_render_emoji_aliases() {
        // Arrange
        let plain = MarkdownRenderer::new();
        let linked = autolink_renderer(None);
        let markdown = ":hooray: :laugh: :tada:";

        // Act
        let plain_html = plain.render(markdown).expect("Should render");
        let linked_html = linked.render(markdown).expect("Should render");

        // Assert
        assert_eq!(plain_html, "<p>\u{1F389} \u{1F604} \u{1F389}</p>\n");
        assert_eq!(linked_html, plain_html);
    }

    #[test]
    fn test_render_escaped_emoji_alias_stays_text() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer.render("\\:hooray:").expect("Should render");

        // Assert
        assert_eq!(html, "<p>:hooray:</p>\n");
    }

    #[test]
    fn test_render_alert_blockquote() {
        // Arrange
        let renderer = autolink_renderer(None);

        // Act
        let html = renderer
            .render("> [!NOTE]\n> Useful @octo")
            .expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<div class=\"markdown-alert markdown-alert-note\">\n\
             <p class=\"markdown-alert-title\">Note</p>\n\
             <p>Useful <a href=\"https://github.com/octo\">@octo</a></p>\n\
             </div>\n"
        );
    }

    #[test]
    fn test_render_alert_marker_alone_in_paragraph() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let html = renderer
            .render("> [!warning]\n>\n> Mind the gap")
            .expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<div class=\"markdown-alert markdown-alert-warning\">\n\
             <p class=\"markdown-alert-title\">Warning</p>\n\
             <p>Mind the gap</p>\n\
             </div>\n"
        );
    }

    #[test]
    fn test_render_plain_blockquote_untouched() {
        // Arrange
        let renderer = MarkdownRenderer::new();

        // Act
        let quote = renderer.render("> just a quote").expect("Should render");
        let inline_marker = renderer
            .render("> [!NOTE] same line")
            .expect("Should render");

        // Assert
        assert_eq!(quote, "<blockquote>\n<p>just a quote</p>\n</blockquote>\n");
        assert!(inline_marker.starts_with("<blockquote>"), "{}", inline_marker);
    }

    #[test]
    fn test_render_empty_markdown() {
        // Arrange
        let renderer = autolink_renderer(None);

        // Act
        let html = renderer.render("").expect("Empty markdown should render");

        // Assert
        assert_eq!(html, "");
    }

    #[test]
    fn test_default_has_no_extensions() {
        // Arrange & Act
        let renderer = MarkdownRenderer::default();
        let html = renderer.render("Hi @octocat").expect("Should render");
        let escaped = renderer.render("Issue \\#5").expect("Should render");

        // Assert
        assert!(renderer.extensions().is_none());
        assert!(!html.contains("<a "), "Mentions stay plain: {}", html);
        assert_eq!(escaped, "<p>Issue #5</p>\n");
    }

    #[test]
    fn test_render_mention() {
        // Arrange
        let renderer = autolink_renderer(None);

        // Act
        let html = renderer.render("Thanks @octocat!").expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<p>Thanks <a href=\"https://github.com/octocat\">@octocat</a>!</p>\n"
        );
    }

    #[test]
    fn test_render_issue_reference_with_and_without_repository() {
        // Arrange
        let with_repo = autolink_renderer(Some("octo/hello-world"));
        let without_repo = autolink_renderer(None);

        // Act
        let linked = with_repo.render("Fixes #26").expect("Should render");
        let plain = without_repo.render("Fixes #26").expect("Should render");

        // Assert
        assert_eq!(
            linked,
            "<p>Fixes <a href=\"https://github.com/octo/hello-world/issues/26\">#26</a></p>\n"
        );
        assert_eq!(plain, "<p>Fixes #26</p>\n");
    }

    #[test]
    fn test_render_github_urls() {
        // Arrange
        let renderer = autolink_renderer(None);
        let markdown = format!(
            "See https://github.com/octo/repo/issues/1 and \
             https://github.com/octo/repo/pull/2 and \
             https://github.com/octo/repo/commit/{SHA}"
        );

        // Act
        let html = renderer.render(&markdown).expect("Should render");

        // Assert
        assert!(
            html.contains(r#"<a href="https://github.com/octo/repo/issues/1">#1</a>"#),
            "Issue URL: {}",
            html
        );
        assert!(
            html.contains(r#"<a href="https://github.com/octo/repo/pull/2">#2</a>"#),
            "Pull request URL: {}",
            html
        );
        assert!(
            html.contains(&format!(
                r#"<a href="https://github.com/octo/repo/commit/{SHA}">a5c3785</a>"#
            )),
            "Commit URL: {}",
            html
        );
    }

    #[test]
    fn test_render_keeps_other_bare_urls_linked() {
        // Arrange
        let renderer = autolink_renderer(None);
        let markdown = "see https://example.com/page and www.rust-lang.org \
                        and https://github.com/octo/repo/issues/1";

        // Act
        let html = renderer.render(markdown).expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<p>see <a href=\"https://example.com/page\">https://example.com/page</a> \
             and <a href=\"http://www.rust-lang.org\">www.rust-lang.org</a> \
             and <a href=\"https://github.com/octo/repo/issues/1\">#1</a></p>\n"
        );
    }

    #[test]
    fn test_render_github_url_with_trailing_path() {
        // Arrange
        let renderer = autolink_renderer(None);

        // Act
        let html = renderer
            .render("see https://github.com/octo/repo/pull/2/files")
            .expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<p>see <a href=\"https://github.com/octo/repo/pull/2\">#2</a>/files</p>\n"
        );
    }

    #[test]
    fn test_render_angle_bracket_autolink_untouched() {
        // Arrange
        let renderer = autolink_renderer(None);

        // Act
        let html = renderer
            .render("<https://github.com/octo/repo/issues/1>")
            .expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<p><a href=\"https://github.com/octo/repo/issues/1\">\
             https://github.com/octo/repo/issues/1</a></p>\n"
        );
    }

    #[test]
    fn test_render_sha_followed_by_markup() {
        // Arrange
        let renderer = autolink_renderer(Some("octo/repo"));

        // Act
        let html = renderer
            .render("a5c3785**bold** and a5c3785")
            .expect("Should render");
        let before_break = renderer
            .render("a5c3785\nnext")
            .expect("Should render");
        let in_strong = renderer.render("**a5c3785**").expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<p>a5c3785<strong>bold</strong> and \
             <a href=\"https://github.com/octo/repo/commit/a5c3785\">a5c3785</a></p>\n"
        );
        assert!(
            before_break.starts_with(
                "<p><a href=\"https://github.com/octo/repo/commit/a5c3785\">a5c3785</a><br />"
            ),
            "Line break ends the run: {}",
            before_break
        );
        assert_eq!(
            in_strong,
            "<p><strong><a href=\"https://github.com/octo/repo/commit/a5c3785\">a5c3785</a>\
             </strong></p>\n"
        );
    }

    #[test]
    fn test_render_escaped_references_stay_text() {
        // Arrange
        let renderer = autolink_renderer(Some("octo/repo"));

        // Act
        let html = renderer
            .render("Fixed \\#5 and #6, thanks \\@octocat")
            .expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<p>Fixed #5 and <a href=\"https://github.com/octo/repo/issues/6\">#6</a>, \
             thanks @octocat</p>\n"
        );
    }

    #[test]
    fn test_render_skips_code_spans_and_blocks() {
        // Arrange
        let renderer = autolink_renderer(Some("octo/repo"));
        let markdown = "Inline `@octocat #1` code\n\n```\n@octocat #1\n```\n";

        // Act
        let html = renderer.render(markdown).expect("Should render");

        // Assert
        assert!(!html.contains("<a "), "Code should not be linked: {}", html);
        assert!(html.contains("<code>@octocat #1</code>"));
    }

    #[test]
    fn test_render_skips_existing_links() {
        // Arrange
        let renderer = autolink_renderer(Some("octo/repo"));

        // Act
        let html = renderer
            .render("[see #1](https://example.com)")
            .expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<p><a href=\"https://example.com\">see #1</a></p>\n",
            "Link text should stay as written"
        );
    }

    #[test]
    fn test_render_inside_emphasis() {
        // Arrange
        let renderer = autolink_renderer(None);

        // Act
        let html = renderer.render("**@octocat**").expect("Should render");

        // Assert
        assert_eq!(
            html,
            "<p><strong><a href=\"https://github.com/octocat\">@octocat</a></strong></p>\n"
        );
    }

    #[test]
    fn test_render_only_selected_extensions() {
        // Arrange
        let extensions = github_mentions(&AutolinkOptions::with_repository("octo/repo"))
            .expect("Should build");
        let renderer = MarkdownRenderer::with_extensions(extensions);

        // Act
        let html = renderer.render("@octocat #1").expect("Should render");

        // Assert
        assert!(html.contains("https://github.com/octocat"));
        assert!(!html.contains("/issues/1"), "Issue refs disabled: {}", html);
    }

    #[test]
    fn test_render_is_idempotent() {
        // Arrange
        let renderer = autolink_renderer(Some("octo/repo"));
        let markdown = format!("@a fixed #1 in {SHA}\n\n- GH-2\n- octo/x@a5c3785");

        // Act
        let first = renderer.render(&markdown).expect("Should render");
        let second = renderer.render(&markdown).expect("Should render");

        // Assert
        assert_eq!(first, second);
    }
}
