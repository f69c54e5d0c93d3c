//! Sheet type and its builder

use ahash::AHashMap;

use crate::cell::{CellRef, CellValue};

/// A named, sparse grid of cell values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    /// Sheet name
    name: String,
    /// Cell storage keyed by (row, col)
    cells: AHashMap<(u32, u32), CellValue>,
    /// One past the last used row
    row_count: u32,
    /// One past the last used column
    column_count: u32,
}

impl Sheet {
    /// Create a new empty sheet with the given name
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Get the sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value at a 0-based coordinate
    pub fn get(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Get the value at an A1-style address
    pub fn get_ref(&self, address: &str) -> Option<&CellValue> {
        let r: CellRef = address.parse().ok()?;
        self.get(r.row, r.col)
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the sheet holds no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of rows spanned by the used area (from row 0)
    pub fn row_count(&self) -> u32 {
        self.row_count
    }

    /// Number of columns spanned by the used area (from column 0)
    pub fn column_count(&self) -> u32 {
        self.column_count
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (CellRef, &CellValue)> {
        let mut entries: Vec<_> = self.cells.iter().collect();
        entries.sort_unstable_by_key(|(k, _)| **k);
        entries
            .into_iter()
            .map(|(&(row, col), v)| (CellRef::new(row, col), v))
    }
}

/// Accumulates cells for one sheet
///
/// The builder can be reused: [`build`](SheetBuilder::build) snapshots the
/// current state and [`clear`](SheetBuilder::clear) resets it for the next
/// sheet.
#[derive(Debug, Default)]
pub struct SheetBuilder {
    sheet: Sheet,
}

impl SheetBuilder {
    /// Create a builder for an unnamed sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sheet name
    pub fn name<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.sheet.name = name.into();
        self
    }

    /// Store a value, replacing any previous value at the same coordinate
    pub fn value<V: Into<CellValue>>(&mut self, row: u32, col: u32, value: V) -> &mut Self {
        let sheet = &mut self.sheet;
        sheet.cells.insert((row, col), value.into());
        sheet.row_count = sheet.row_count.max(row.saturating_add(1));
        sheet.column_count = sheet.column_count.max(col.saturating_add(1));
        self
    }

    /// Number of cells stored so far
    pub fn len(&self) -> usize {
        self.sheet.len()
    }

    /// Check if no cells were stored yet
    pub fn is_empty(&self) -> bool {
        self.sheet.is_empty()
    }

    /// Snapshot the sheet built so far
    pub fn build(&self) -> Sheet {
        self.sheet.clone()
    }

    /// Consume the builder
    pub fn finish(self) -> Sheet {
        self.sheet
    }

    /// Forget all cells and the name
    pub fn clear(&mut self) {
        self.sheet.name.clear();
        self.sheet.cells.clear();
        self.sheet.row_count = 0;
        self.sheet.column_count = 0;
    }
}
