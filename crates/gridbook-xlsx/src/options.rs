//! XLSX options

use gridbook_core::DateSystem;

/// Options for reading SpreadsheetML parts
#[derive(Debug, Clone, Default)]
pub struct XlsxReadOptions {
    /// Date system to use instead of the one declared in `workbook.xml`
    pub date_system: Option<DateSystem>,
}
