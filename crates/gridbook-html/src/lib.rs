//! # gridbook-html
//!
//! HTML table reader for gridbook.
//!
//! Each `<table>` of a document becomes a [`Sheet`](gridbook_core::Sheet);
//! merged cells expressed with `colspan`/`rowspan` are laid out on the
//! physical grid a browser would render.
//!
//! ```rust
//! use gridbook_html::{HtmlReadOptions, HtmlReader};
//!
//! let html = r#"<table>
//!   <caption>Prices</caption>
//!   <tr><th colspan="2">Fruit</th><th>Price</th></tr>
//!   <tr><td rowspan="2">Apple</td><td>Red</td><td>1.20</td></tr>
//!   <tr><td>Green</td><td>1.10</td></tr>
//! </table>"#;
//!
//! let book = HtmlReader::read_str(html, &HtmlReadOptions::default()).unwrap();
//! let sheet = book.sheet_by_name("Prices").unwrap();
//! assert_eq!(sheet.get_ref("C1").unwrap().as_text(), Some("Price"));
//! assert_eq!(sheet.get_ref("B3").unwrap().as_text(), Some("Green"));
//! ```

pub mod dom;
pub mod error;
mod options;
pub mod reader;

pub use dom::{parse_document, Element, Node};
pub use error::{HtmlError, HtmlResult};
pub use options::HtmlReadOptions;
pub use reader::{GridReconstructor, HtmlReader};
