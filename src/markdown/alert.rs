//! GitHub alert blockquotes (`> [!NOTE]`).

use comrak::Arena;
use comrak::nodes::{Ast, AstNode, LineColumn, NodeHtmlBlock, NodeValue};
use std::cell::RefCell;
use tracing::trace;

/// HTML block type for `<div>` and friends.
const HTML_BLOCK_DIV: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    const ALL: [AlertKind; 5] = [
        Self::Note,
        Self::Tip,
        Self::Important,
        Self::Warning,
        Self::Caution,
    ];

    pub(crate) fn title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }

    fn class(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    /// Parses a `[!NOTE]` marker, ignoring case and surrounding whitespace.
    pub(crate) fn from_marker(text: &str) -> Option<Self> {
        let name = text.trim().strip_prefix("[!")?.strip_suffix(']')?;
        Self::ALL
            .into_iter()
            .find(|kind| kind.title().eq_ignore_ascii_case(name))
    }

    fn opening(self) -> String {
        format!(
            "<div class=\"markdown-alert markdown-alert-{}\">\n<p class=\"markdown-alert-title\">{}</p>",
            self.class(),
            self.title()
        )
    }
}

fn is_break<'a>(node: &'a AstNode<'a>) -> bool {
    matches!(
        node.data.borrow().value,
        NodeValue::SoftBreak | NodeValue::LineBreak
    )
}

/// Alert kind and the paragraph holding the marker, when the blockquote's
/// first line is a marker on its own.
fn marker<'a>(quote: &'a AstNode<'a>) -> Option<(AlertKind, &'a AstNode<'a>)> {
    let paragraph = quote.first_child()?;
    if !matches!(paragraph.data.borrow().value, NodeValue::Paragraph) {
        return None;
    }

    let first = paragraph.first_child()?;
    let kind = {
        let ast = first.data.borrow();
        let NodeValue::Text(text) = &ast.value else {
            return None;
        };
        AlertKind::from_marker(text)?
    };

    match first.next_sibling() {
        Some(next) if !is_break(next) => None,
        _ => Some((kind, paragraph)),
    }
}

fn html_block<'a>(
    arena: &'a Arena<AstNode<'a>>,
    literal: String,
    start: LineColumn,
) -> &'a AstNode<'a> {
    let value = NodeValue::HtmlBlock(NodeHtmlBlock {
        block_type: HTML_BLOCK_DIV,
        literal,
    });
    arena.alloc(AstNode::new(RefCell::new(Ast::new(value, start))))
}

/// Rewrites alert blockquotes into `markdown-alert` divs.
///
/// The marker line is dropped and the remaining blocks are kept as the
/// alert body. A paragraph left empty by the marker is removed.
pub(crate) fn apply<'a>(arena: &'a Arena<AstNode<'a>>, root: &'a AstNode<'a>) {
    let quotes: Vec<&'a AstNode<'a>> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::BlockQuote))
        .collect();

    for quote in quotes {
        let Some((kind, paragraph)) = marker(quote) else {
            continue;
        };
        trace!(alert = kind.title(), "Alert blockquote");

        if let Some(first) = paragraph.first_child() {
            if let Some(next) = first.next_sibling().filter(|next| is_break(*next)) {
                next.detach();
            }
            first.detach();
        }
        if paragraph.first_child().is_none() {
            paragraph.detach();
        }

        let start = quote.data.borrow().sourcepos.start;
        quote.insert_before(html_block(arena, kind.opening(), start));
        while let Some(child) = quote.first_child() {
            quote.insert_before(child);
        }
        quote.insert_before(html_block(arena, "</div>".to_string(), start));
        quote.detach();
    }
}
