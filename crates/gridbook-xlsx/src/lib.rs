//! # gridbook-xlsx
//!
//! SpreadsheetML (XLSX) readers for gridbook.
//!
//! This crate turns the XML parts of an XLSX workbook into a normalized
//! [`gridbook_core::Book`]. Unpacking the ZIP container is left to the
//! caller: every reader takes the bytes of one part.
//!
//! - [`resolve`] and [`CellResolver`] - typed values from raw cells
//! - [`read_shared_strings`], [`read_date_styles`], [`read_workbook`] and
//!   [`read_worksheet`] - one reader per part
//! - [`XlsxReader::read_parts`] - a whole book
//!
//! ## Example
//!
//! ```rust
//! use gridbook_core::CellValue;
//! use gridbook_xlsx::{XlsxParts, XlsxReadOptions, XlsxReader};
//!
//! let sheet = br#"<worksheet><sheetData>
//!     <row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1"><v>3.5</v></c></row>
//! </sheetData></worksheet>"#;
//! let strings = br#"<sst><si><t>Price</t></si></sst>"#;
//!
//! let parts = XlsxParts::new(vec![&sheet[..]]).shared_strings(&strings[..]);
//! let book = XlsxReader::read_parts(&parts, &XlsxReadOptions::default()).unwrap();
//!
//! let sheet = book.sheet(0).unwrap();
//! assert_eq!(sheet.name(), "Sheet1");
//! assert_eq!(sheet.get_ref("A1"), Some(&CellValue::text("Price")));
//! assert_eq!(sheet.get_ref("B1"), Some(&CellValue::Number(3.5)));
//! ```

pub mod error;
pub mod number_format;
pub mod reader;
pub mod styles;
pub mod value;

mod options;

pub use error::{XlsxError, XlsxResult};
pub use number_format::{is_builtin_date_format, is_date_format_code};
pub use options::XlsxReadOptions;
pub use reader::{
    read_shared_strings, read_workbook, read_worksheet, WorkbookInfo, XlsxParts, XlsxReader,
};
pub use styles::read_date_styles;
pub use value::{resolve, CellKind, CellResolver, DateStyles, SharedStrings, DATE_FORMAT};
