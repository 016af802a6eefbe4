//! Error types for the renderer and its collaborators.

use thiserror::Error;

/// The markup could not be turned into a document tree.
///
/// `Clone` so a renderer can keep the failure of its single parse attempt
/// and report it on every later call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Feeding the tokenizer failed.
    #[error("failed to read markup: {0}")]
    Io(String),

    /// Strict parsing rejected the markup.
    #[error("{count} markup error(s), first: {first}")]
    Malformed { count: usize, first: String },
}

/// Errors surfaced by [`crate::render::HtmlRenderer::render`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("HTML Parse Error: {0}")]
    Parse(#[from] ParseError),
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error: {0}")]
    HttpStatus(u16),
}
