//! Book type - an ordered collection of sheets

use crate::error::{Error, Result};
use crate::sheet::Sheet;

/// A book of named sheets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Book {
    sheets: Vec<Sheet>,
}

impl Book {
    /// Create a book with no sheets
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a book
    pub fn builder() -> BookBuilder {
        BookBuilder::default()
    }

    /// Get the number of sheets
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the book has no sheets
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get a sheet by index
    pub fn sheet(&self, index: usize) -> Result<&Sheet> {
        self.sheets
            .get(index)
            .ok_or(Error::SheetOutOfBounds(index, self.sheets.len()))
    }

    /// Get a sheet by name
    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name() == name)
    }

    /// Iterate over all sheets
    pub fn sheets(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.iter()
    }

    /// Sheet names in order
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name()).collect()
    }
}

/// Accumulates sheets for a [`Book`]
#[derive(Debug, Default)]
pub struct BookBuilder {
    sheets: Vec<Sheet>,
}

impl BookBuilder {
    /// Append a sheet; names must be unique
    pub fn sheet(&mut self, sheet: Sheet) -> Result<&mut Self> {
        if self.contains(sheet.name()) {
            return Err(Error::DuplicateSheetName(sheet.name().to_string()));
        }
        self.sheets.push(sheet);
        Ok(self)
    }

    /// Whether a sheet with this name was already added
    pub fn contains(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name() == name)
    }

    /// Number of sheets added so far
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if no sheets were added yet
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Finish the book
    pub fn build(self) -> Book {
        Book {
            sheets: self.sheets,
        }
    }
}
