//! Emoji shortcode aliases on top of the gemoji names comrak resolves.

use comrak::Arena;
use comrak::nodes::{Ast, AstNode, NodeShortCode, NodeValue};
use regex::Regex;
use std::cell::RefCell;
use std::sync::LazyLock;

/// Extra shortcode names and the gemoji name each one stands for.
pub(crate) const ALIASES: [(&str, &str); 2] = [("hooray", "tada"), ("laugh", "smile")];

static ALIAS: LazyLock<Regex> = LazyLock::new(|| {
    let names: Vec<&str> = ALIASES.iter().map(|(alias, _)| *alias).collect();
    Regex::new(&format!(":({}):", names.join("|"))).expect("alias pattern")
});

fn resolve(alias: &str) -> Option<NodeShortCode> {
    let (_, name) = ALIASES.iter().find(|(candidate, _)| *candidate == alias)?;
    let mut shortcode = NodeShortCode::resolve(name)?;
    shortcode.code = alias.to_string();
    Some(shortcode)
}

/// Replaces `:hooray:` and `:laugh:` in text nodes with emoji.
///
/// comrak leaves unknown shortcodes as plain text, so aliases are found in
/// the merged text after parsing. Escaped colons never reach here as part
/// of the same text node.
pub(crate) fn expand_aliases<'a>(arena: &'a Arena<AstNode<'a>>, root: &'a AstNode<'a>) {
    let text_nodes: Vec<&'a AstNode<'a>> = root
        .descendants()
        .filter(|node| match &node.data.borrow().value {
            NodeValue::Text(text) => ALIAS.is_match(text),
            _ => false,
        })
        .collect();

    for node in text_nodes {
        let (text, start) = {
            let ast = node.data.borrow();
            match &ast.value {
                NodeValue::Text(text) => (text.clone(), ast.sourcepos.start),
                _ => continue,
            }
        };

        let mut pieces = Vec::new();
        let mut last = 0;
        for captures in ALIAS.captures_iter(&text) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let Some(shortcode) = resolve(name.as_str()) else {
                continue;
            };
            if whole.start() > last {
                pieces.push(NodeValue::Text(text[last..whole.start()].to_string()));
            }
            pieces.push(NodeValue::ShortCode(shortcode));
            last = whole.end();
        }

        if pieces.is_empty() {
            continue;
        }
        if last < text.len() {
            pieces.push(NodeValue::Text(text[last..].to_string()));
        }

        for value in pieces {
            let replacement = arena.alloc(AstNode::new(RefCell::new(Ast::new(value, start))));
            node.insert_before(replacement);
        }
        node.detach();
    }
}
