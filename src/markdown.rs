//! Markdown rendering with GitHub Flavored Markdown support.
//!
//! This module provides markdown rendering using comrak with GFM extensions
//! (tables, strikethrough, task lists, emoji shortcodes, alerts) and acts as
//! the host that drives GitHub autolink extensions over inline text.

mod alert;
mod emoji;
mod inline;
mod renderer;

pub use renderer::MarkdownRenderer;
