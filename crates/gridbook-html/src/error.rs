//! HTML error types

use thiserror::Error;

/// Result type for HTML operations
pub type HtmlResult<T> = std::result::Result<T, HtmlError>;

/// Errors that can occur during HTML reading
#[derive(Debug, Error)]
pub enum HtmlError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Markup error
    #[error("Markup error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] gridbook_core::Error),
}
