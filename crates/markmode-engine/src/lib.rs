//! # markmode-engine
//!
//! A Markdown grammar with two outputs:
//!
//! - [`Markdown::transform`] renders HTML
//! - [`parse_paragraph`] reports positioned [`Token`]s for editor layers
//!   (highlighting, outlining, navigation)
//!
//! Both walk the same syntax tree, produced by [`grammar`].

pub mod classify;
pub mod error;
pub mod escape;
pub mod grammar;
pub mod options;
pub mod outline;
pub mod preview;
pub mod references;
pub mod render;
pub mod token;
pub mod tokens;

pub use error::EngineError;
pub use options::Options;
pub use render::Markdown;
pub use token::{Span, Token, TokenType};
pub use tokens::{Tokenizer, contains_multiline_construct, parse_paragraph, parse_sections};

/// Render `text` with default options.
pub fn transform(text: &str) -> String {
    Markdown::default().transform(text)
}
