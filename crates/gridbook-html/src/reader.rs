//! HTML table reader
//!
//! Every `<table>` becomes a sheet. Rows and cells are laid out on a
//! physical grid: a cell's `colspan` pushes the following cells of its row
//! to the right, and its `rowspan` reserves its column in the rows below, so
//! later rows skip over it.

use std::io::Read;

use ahash::AHashMap;
use log::{debug, trace};

use crate::dom::{parse_document, Element};
use crate::error::HtmlResult;
use crate::options::HtmlReadOptions;
use gridbook_core::{Book, BookBuilder, CellValue, SheetBuilder};

/// Remaining vertical span per column
#[derive(Debug, Default)]
struct RowSpans {
    remaining: AHashMap<u32, u32>,
}

impl RowSpans {
    /// Reserve `column` for the next `count - 1` rows
    fn increase(&mut self, column: u32, count: u32) {
        if count > 1 {
            let entry = self.remaining.entry(column).or_insert(0);
            *entry = entry.saturating_add(count - 1);
        }
    }

    /// Consume one row of reservation at `column`, returning whether it was taken
    fn decrease(&mut self, column: u32) -> bool {
        match self.remaining.get_mut(&column) {
            Some(remaining) if *remaining > 1 => {
                *remaining -= 1;
                true
            }
            Some(_) => {
                self.remaining.remove(&column);
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.remaining.clear();
    }
}

/// Span attribute value, with anything missing, malformed or non-positive meaning 1
fn parse_span(value: Option<&str>) -> u32 {
    value
        .and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|&n| n > 0)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(1)
}

/// Caption text of a table, when its first child is a non-empty `<caption>`
fn caption<E: Element>(table: &E) -> Option<String> {
    let first = table.children().first()?;
    if !first.is("caption") {
        return None;
    }
    let text = first.text();
    (!text.is_empty()).then_some(text)
}

/// All `<tr>` descendants of `parent` with the tag of their direct parent
fn rows_with_parent<'a, E: Element>(parent: &'a E, out: &mut Vec<(&'a str, &'a E)>) {
    for child in parent.children() {
        if child.is("tr") {
            out.push((parent.tag_name(), child));
        }
        rows_with_parent(child, out);
    }
}

/// Lays the cells of one table out on a physical grid
///
/// The span tracker lives as long as the reconstructor and is reset for
/// every table, so one instance can be reused across the tables of a
/// document but must not be shared between threads.
#[derive(Debug, Default)]
pub struct GridReconstructor {
    spans: RowSpans,
    skip_footer_rows: bool,
}

impl GridReconstructor {
    /// Create a reconstructor that leaves out `<tfoot>` rows
    pub fn new() -> Self {
        Self {
            spans: RowSpans::default(),
            skip_footer_rows: true,
        }
    }

    /// Whether rows inside `<tfoot>` are left out
    pub fn skip_footer_rows(mut self, skip: bool) -> Self {
        self.skip_footer_rows = skip;
        self
    }

    /// Write the non-empty cells of `table` into `sheet`
    ///
    /// Returns the number of physical rows laid out.
    pub fn reconstruct<E: Element>(&mut self, table: &E, sheet: &mut SheetBuilder) -> u32 {
        self.spans.clear();

        let mut rows = Vec::new();
        rows_with_parent(table, &mut rows);

        let mut i: u32 = 0;
        for (parent, row) in rows {
            if self.skip_footer_rows && parent.eq_ignore_ascii_case("tfoot") {
                continue;
            }

            let mut j: u32 = 0;
            for cell in row.children_by_tag(&["td", "th"]) {
                while self.spans.decrease(j) {
                    j += 1;
                }

                let text = cell.text();
                if !text.is_empty() {
                    trace!("({}, {}) <- {:?}", i, j, text);
                    sheet.value(i, j, CellValue::Text(text));
                }

                self.spans.increase(j, parse_span(cell.attr("rowspan")));
                j = j.saturating_add(parse_span(cell.attr("colspan")));
            }
            i += 1;
        }

        self.spans.clear();
        i
    }
}

/// HTML document reader
pub struct HtmlReader;

impl HtmlReader {
    /// Read a book from an HTML reader
    pub fn read<R: Read>(mut reader: R, options: &HtmlReadOptions) -> HtmlResult<Book> {
        let mut markup = String::new();
        reader.read_to_string(&mut markup)?;
        Self::read_str(&markup, options)
    }

    /// Read a book from HTML markup
    pub fn read_str(markup: &str, options: &HtmlReadOptions) -> HtmlResult<Book> {
        let document = parse_document(markup)?;
        Self::read_document(&document, options)
    }

    /// Read a book from an already parsed document tree
    pub fn read_document<E: Element>(document: &E, options: &HtmlReadOptions) -> HtmlResult<Book> {
        let mut book = Book::builder();
        let mut sheet = SheetBuilder::new();
        let mut grid = GridReconstructor::new().skip_footer_rows(options.skip_footer_rows);

        for (sheet_index, table) in document.descendants_by_tag("table").into_iter().enumerate() {
            let name = caption(table)
                .unwrap_or_else(|| format!("{}{}", options.sheet_name_prefix, sheet_index));
            let name = unique_name(&book, name);

            sheet.name(name.as_str());
            let rows = grid.reconstruct(table, &mut sheet);
            debug!(
                "Table {} -> sheet '{}' ({} rows, {} cells)",
                sheet_index,
                name,
                rows,
                sheet.len()
            );

            book.sheet(sheet.build())?;
            sheet.clear();
        }

        Ok(book.build())
    }
}

/// Suffix `name` with " (n)" until no sheet in `book` carries it
fn unique_name(book: &BookBuilder, name: String) -> String {
    if !book.contains(&name) {
        return name;
    }
    (2..)
        .map(|n| format!("{} ({})", name, n))
        .find(|candidate| !book.contains(candidate))
        .unwrap_or(name)
}
