//! # gridbook-core
//!
//! Core data structures for the gridbook spreadsheet normalizer.
//!
//! This crate provides the format-agnostic model every reader produces:
//! - [`CellValue`] - A typed cell value (text, number or date-time)
//! - [`CellRef`], [`ReferenceParser`] and the `encode_*`/`decode_*`
//!   functions - the A1 reference codec
//! - [`DateSystem`] - serial date conversion for the 1900 and 1904 systems
//! - [`Book`], [`Sheet`] and their builders - the normalized grid
//!
//! ## Example
//!
//! ```rust
//! use gridbook_core::{Book, CellValue, SheetBuilder};
//!
//! let mut sheet = SheetBuilder::new();
//! sheet.name("Data").value(0, 0, "Hello").value(0, 1, 42.0);
//!
//! let mut book = Book::builder();
//! book.sheet(sheet.finish()).unwrap();
//! let book = book.build();
//!
//! let data = book.sheet_by_name("Data").unwrap();
//! assert_eq!(data.get_ref("B1"), Some(&CellValue::Number(42.0)));
//! ```

pub mod book;
pub mod cell;
pub mod date;
pub mod error;
pub mod sheet;

// Re-exports for convenience
pub use book::{Book, BookBuilder};
pub use cell::{CellRef, CellValue, ReferenceParser};
pub use date::DateSystem;
pub use error::{Axis, Error, Result};
pub use sheet::{Sheet, SheetBuilder};
