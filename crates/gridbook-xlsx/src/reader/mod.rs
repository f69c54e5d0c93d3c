//! SpreadsheetML part readers
//!
//! The readers work on the bytes of individual parts; getting those
//! bytes out of a package is up to the caller.

mod shared_strings;
mod workbook;
mod worksheet;

pub use shared_strings::read_shared_strings;
pub use workbook::{read_workbook, WorkbookInfo};
pub use worksheet::read_worksheet;

use gridbook_core::{Book, DateSystem};
use log::debug;

use crate::error::XlsxResult;
use crate::options::XlsxReadOptions;
use crate::styles::read_date_styles;
use crate::value::CellResolver;

/// The parts of one workbook, as raw XML bytes
#[derive(Debug, Clone, Default)]
pub struct XlsxParts<'a> {
    /// `xl/workbook.xml`
    pub workbook: Option<&'a [u8]>,
    /// `xl/sharedStrings.xml`
    pub shared_strings: Option<&'a [u8]>,
    /// `xl/styles.xml`
    pub styles: Option<&'a [u8]>,
    /// Worksheet parts, in workbook sheet order
    pub worksheets: Vec<&'a [u8]>,
}

impl<'a> XlsxParts<'a> {
    /// Parts holding only the given worksheets
    pub fn new(worksheets: Vec<&'a [u8]>) -> Self {
        Self {
            worksheets,
            ..Self::default()
        }
    }

    /// Set the workbook part
    pub fn workbook(mut self, xml: &'a [u8]) -> Self {
        self.workbook = Some(xml);
        self
    }

    /// Set the shared strings part
    pub fn shared_strings(mut self, xml: &'a [u8]) -> Self {
        self.shared_strings = Some(xml);
        self
    }

    /// Set the styles part
    pub fn styles(mut self, xml: &'a [u8]) -> Self {
        self.styles = Some(xml);
        self
    }
}

/// SpreadsheetML reader
pub struct XlsxReader;

impl XlsxReader {
    /// Assemble a book from already extracted parts
    ///
    /// Missing optional parts behave as empty: no shared strings, no date
    /// styles, the 1900 date system and default sheet names.
    pub fn read_parts(parts: &XlsxParts<'_>, options: &XlsxReadOptions) -> XlsxResult<Book> {
        let info = match parts.workbook {
            Some(xml) => read_workbook(xml)?,
            None => WorkbookInfo::default(),
        };
        let shared_strings = match parts.shared_strings {
            Some(xml) => read_shared_strings(xml)?,
            None => Vec::new(),
        };
        let date_styles = match parts.styles {
            Some(xml) => read_date_styles(xml)?,
            None => Vec::new(),
        };

        let date_system: DateSystem = options.date_system.unwrap_or(info.date_system);
        let resolver = CellResolver::new(&shared_strings, &date_styles, date_system);

        let mut book = Book::builder();
        for (index, xml) in parts.worksheets.iter().enumerate() {
            let name = match info.sheet_names.get(index) {
                Some(name) if !name.is_empty() => name.clone(),
                _ => format!("Sheet{}", index + 1),
            };
            let sheet = read_worksheet(*xml, &name, &resolver)?;
            book.sheet(sheet)?;
        }

        debug!(
            "Read {} worksheets with date system {:?}",
            book.len(),
            date_system
        );
        Ok(book.build())
    }
}
