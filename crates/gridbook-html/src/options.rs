//! HTML options

/// Options for reading HTML tables
#[derive(Debug, Clone)]
pub struct HtmlReadOptions {
    /// Prefix for the names of tables without a caption (default: "Sheet ")
    ///
    /// The table's 0-based position in the document is appended.
    pub sheet_name_prefix: String,
    /// Leave out rows that live in a `<tfoot>` (default: true)
    pub skip_footer_rows: bool,
}

impl Default for HtmlReadOptions {
    fn default() -> Self {
        Self {
            sheet_name_prefix: "Sheet ".to_string(),
            skip_footer_rows: true,
        }
    }
}
