//! GitHub autolinked references for CommonMark rendering.

pub mod autolink;
mod config;
mod error;
mod markdown;
pub mod repository;

pub use autolink::{AutolinkOptions, Extension, ExtensionKind, Extensions, Level, Token};
pub use config::Config;
pub use error::AutolinkError;
pub use markdown::MarkdownRenderer;
pub use repository::Repository;
