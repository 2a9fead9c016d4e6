//! Inline pass that runs autolink extensions over comrak text nodes.

use comrak::Arena;
use comrak::nodes::{Ast, AstNode, NodeValue};
use std::cell::RefCell;
use tracing::{debug, trace};

use crate::autolink::Extensions;

/// Piece of a text node after extensions ran over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    Html(String),
}

/// Splits text into literal runs and rendered extension output.
///
/// At each step the earliest `start` offset across all extensions decides
/// how much literal text to flush. Extensions are then tried at that offset
/// in registration order and the first token wins. If none accepts the
/// offset, one character is kept as text and scanning resumes after it.
///
/// `ends_input` is false when more inline markup follows `text` in the
/// same container, so the end of `text` is not the end of the input.
pub(crate) fn split(text: &str, extensions: &Extensions, ends_input: bool) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while !rest.is_empty() {
        let Some(offset) = extensions.start_in(rest, ends_input) else {
            literal.push_str(rest);
            break;
        };

        literal.push_str(&rest[..offset]);
        rest = &rest[offset..];

        match extensions.tokenize_in(rest, ends_input) {
            Some((extension, token)) => {
                trace!(extension = extension.name(), raw = token.raw(), "Autolink token");

                if !literal.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Html(extension.render(&token)));
                rest = &rest[token.raw().len()..];
            }
            None => {
                debug!(offset, "Scan hit without token, keeping text");
                let width = rest.chars().next().map_or(1, char::len_utf8);
                literal.push_str(&rest[..width]);
                rest = &rest[width..];
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Text(literal));
    }

    segments
}

fn inside_link<'a>(node: &'a AstNode<'a>) -> bool {
    node.ancestors().any(|ancestor| {
        matches!(
            ancestor.data.borrow().value,
            NodeValue::Link(_) | NodeValue::Image(_)
        )
    })
}

fn is_escaped<'a>(node: &'a AstNode<'a>) -> bool {
    node.parent()
        .is_some_and(|parent| matches!(parent.data.borrow().value, NodeValue::Escaped))
}

/// A text node ends its input when nothing but a line break follows it in
/// its container.
fn ends_input<'a>(node: &'a AstNode<'a>) -> bool {
    match node.next_sibling() {
        None => true,
        Some(next) => matches!(
            next.data.borrow().value,
            NodeValue::SoftBreak | NodeValue::LineBreak
        ),
    }
}

fn single_text<'a>(node: &'a AstNode<'a>) -> Option<String> {
    let child = node.first_child()?;
    if child.next_sibling().is_some() {
        return None;
    }
    match &child.data.borrow().value {
        NodeValue::Text(text) => Some(text.clone()),
        _ => None,
    }
}

/// Turns bare URL autolinks that start with a GitHub reference back into
/// text so the extensions render them.
///
/// comrak builds these links while parsing and gives them no source
/// position, which tells them apart from `<...>` autolinks and written
/// `[text](url)` links. Any other URL keeps its link.
fn reclaim_autolinks<'a>(
    arena: &'a Arena<AstNode<'a>>,
    root: &'a AstNode<'a>,
    extensions: &Extensions,
) {
    let links: Vec<&'a AstNode<'a>> = root
        .descendants()
        .filter(|node| {
            let ast = node.data.borrow();
            matches!(ast.value, NodeValue::Link(_)) && ast.sourcepos.start.line == 0
        })
        .collect();

    for link in links {
        let Some(text) = single_text(link) else {
            continue;
        };
        if extensions.tokenize(&text).is_none() {
            continue;
        }

        trace!(url = %text, "Reclaiming autolink for extensions");
        let start = link.data.borrow().sourcepos.start;
        let replacement = arena.alloc(AstNode::new(RefCell::new(Ast::new(
            NodeValue::Text(text),
            start,
        ))));
        link.insert_before(replacement);
        link.detach();
    }
}

/// Replaces escape wrappers with the characters they hold.
pub(crate) fn unwrap_escapes<'a>(root: &'a AstNode<'a>) {
    let escapes: Vec<&'a AstNode<'a>> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Escaped))
        .collect();

    for escape in escapes {
        while let Some(child) = escape.first_child() {
            escape.insert_before(child);
        }
        escape.detach();
    }
}

/// Replaces autolinkable text nodes under `root` with text and inline HTML
/// siblings.
///
/// Text already inside a link or image is left alone, as are characters
/// written with a backslash escape. Code spans and code blocks hold
/// literals rather than text children, so they are never scanned.
///
/// Backslash escapes must still be `Escaped` nodes here; `unwrap_escapes`
/// runs after this pass.
pub(crate) fn apply<'a>(
    arena: &'a Arena<AstNode<'a>>,
    root: &'a AstNode<'a>,
    extensions: &Extensions,
) {
    reclaim_autolinks(arena, root, extensions);

    let text_nodes: Vec<&'a AstNode<'a>> = root
        .descendants()
        .filter(|node| matches!(node.data.borrow().value, NodeValue::Text(_)))
        .filter(|node| !inside_link(*node) && !is_escaped(*node))
        .collect();

    for node in text_nodes {
        let (text, start) = {
            let ast = node.data.borrow();
            match &ast.value {
                NodeValue::Text(text) => (text.clone(), ast.sourcepos.start),
                _ => continue,
            }
        };

        let segments = split(&text, extensions, ends_input(node));
        if !segments.iter().any(|s| matches!(s, Segment::Html(_))) {
            continue;
        }

        for segment in segments {
            let value = match segment {
                Segment::Text(text) => NodeValue::Text(text),
                Segment::Html(html) => NodeValue::HtmlInline(html),
            };
            let replacement = arena.alloc(AstNode::new(RefCell::new(Ast::new(value, start))));
            node.insert_before(replacement);
        }
        node.detach();
    }
}
