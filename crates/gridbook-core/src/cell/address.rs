//! A1-style cell references
//!
//! Columns are written as a bijective base-26 numeral over `A`-`Z` (there is
//! no digit for zero, so `A` = 0, `Z` = 25, `AA` = 26) and rows as the
//! 1-based decimal row number. Internally every coordinate is 0-based.

use crate::error::{Axis, Error, Result};
use std::fmt;
use std::str::FromStr;

/// Format a 0-based `(row, col)` pair as an A1 reference
///
/// # Examples
/// ```
/// use gridbook_core::cell::encode_ref;
///
/// assert_eq!(encode_ref(0, 0).unwrap(), "A1");
/// assert_eq!(encode_ref(0, 26).unwrap(), "AA1");
/// assert!(encode_ref(-1, 0).is_err());
/// ```
pub fn encode_ref(row: i64, col: i64) -> Result<String> {
    let mut result = encode_column(col)?;
    result.push_str(&encode_row(row)?);
    Ok(result)
}

/// Convert a column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
pub fn encode_column(col: i64) -> Result<String> {
    if col < 0 {
        return Err(Error::negative(Axis::Column, col));
    }
    Ok(column_letters(col as u64))
}

/// Convert a row index to its 1-based label
pub fn encode_row(row: i64) -> Result<String> {
    if row < 0 {
        return Err(Error::negative(Axis::Row, row));
    }
    Ok((row as u64 + 1).to_string())
}

/// Convert column letters to an index (A = 0, Z = 25, AA = 26, etc.)
///
/// Letters are case-insensitive.
pub fn decode_column(label: &str) -> Result<i64> {
    if label.is_empty() {
        return Err(Error::InvalidReference("empty column label".into()));
    }

    let mut acc: i64 = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(Error::InvalidReference(format!(
                "invalid column letter '{}'",
                c
            )));
        }
        let digit = (c.to_ascii_uppercase() as u8 - b'A') as i64 + 1;
        acc = acc
            .checked_mul(26)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| Error::InvalidReference(format!("column '{}' too large", label)))?;
    }

    Ok(acc - 1)
}

/// Convert a 1-based row label to a 0-based index
pub fn decode_row(label: &str) -> Result<i64> {
    label
        .parse::<i64>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| Error::InvalidReference(format!("invalid row label '{}'", label)))
}

fn column_letters(col: u64) -> String {
    let mut letters = Vec::new();
    let mut n = col as i128;

    loop {
        letters.push(b'A' + (n % 26) as u8);
        n = n / 26 - 1;
        if n < 0 {
            break;
        }
    }

    letters.reverse();
    letters.into_iter().map(char::from).collect()
}

/// Split `text` into a leading letter run and a trailing positive row number
fn split_reference(text: &str) -> Option<CellRef> {
    let split = text
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(text.len());
    let (letters, digits) = text.split_at(split);

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    let col = u32::try_from(decode_column(letters).ok()?).ok()?;

    Some(CellRef::new(row - 1, col))
}

/// A 0-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u32,
}

impl CellRef {
    /// Create a new cell reference
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", column_letters(self.col as u64), self.row as u64 + 1)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        split_reference(s).ok_or_else(|| Error::InvalidReference(s.to_string()))
    }
}

/// Stateful parser for reference strings
///
/// A successful [`parse`](ReferenceParser::parse) binds the parser to the
/// parsed coordinate; a failed one unbinds it, so stale coordinates are
/// never observable after a bad input.
#[derive(Debug, Clone, Default)]
pub struct ReferenceParser {
    bound: Option<CellRef>,
}

impl ReferenceParser {
    /// Create an unbound parser
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text`, returning whether it was a valid reference
    pub fn parse(&mut self, text: &str) -> bool {
        self.bound = split_reference(text);
        self.bound.is_some()
    }

    /// Whether the last parse succeeded
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// The bound coordinate, if any
    pub fn cell_ref(&self) -> Option<CellRef> {
        self.bound
    }

    /// Column index of the last successful parse
    pub fn column_index(&self) -> Result<u32> {
        self.bound.map(|r| r.col).ok_or(Error::Unbound)
    }

    /// Row index of the last successful parse
    pub fn row_index(&self) -> Result<u32> {
        self.bound.map(|r| r.row).ok_or(Error::Unbound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_ref() {
        assert_eq!(encode_ref(0, 0).unwrap(), "A1");
        assert_eq!(encode_ref(0, 1).unwrap(), "B1");
        assert_eq!(encode_ref(1, 0).unwrap(), "A2");
        assert_eq!(encode_ref(0, 26).unwrap(), "AA1");
        assert_eq!(
            encode_ref(-1, 0),
            Err(Error::NegativeIndex {
                axis: Axis::Row,
                index: -1
            })
        );
        assert_eq!(
            encode_ref(0, -1),
            Err(Error::NegativeIndex {
                axis: Axis::Column,
                index: -1
            })
        );
    }

    #[test]
    fn test_encode_column() {
        assert_eq!(encode_column(0).unwrap(), "A");
        assert_eq!(encode_column(25).unwrap(), "Z");
        assert_eq!(encode_column(26).unwrap(), "AA");
        assert_eq!(encode_column(701).unwrap(), "ZZ");
        assert_eq!(encode_column(702).unwrap(), "AAA");
        assert_eq!(encode_column(16383).unwrap(), "XFD");
        assert!(encode_column(-1).is_err());
    }

    #[test]
    fn test_encode_row() {
        assert_eq!(encode_row(0).unwrap(), "1");
        assert_eq!(encode_row(1).unwrap(), "2");
        assert!(encode_row(-1).is_err());
    }

    #[test]
    fn test_decode_column() {
        assert_eq!(decode_column("A").unwrap(), 0);
        assert_eq!(decode_column("Z").unwrap(), 25);
        assert_eq!(decode_column("AA").unwrap(), 26);
        assert_eq!(decode_column("AB").unwrap(), 27);
        assert_eq!(decode_column("BA").unwrap(), 52);
        assert_eq!(decode_column("xfd").unwrap(), 16383);

        assert!(decode_column("").is_err());
        assert!(decode_column("A1").is_err());
        assert!(decode_column(&"Z".repeat(20)).is_err());
    }

    #[test]
    fn test_decode_row() {
        assert_eq!(decode_row("1").unwrap(), 0);
        assert_eq!(decode_row("100").unwrap(), 99);
        assert!(decode_row("").is_err());
        assert!(decode_row("x").is_err());
    }

    #[test]
    fn test_parse() {
        let mut parser = ReferenceParser::new();
        assert_eq!(parser.column_index(), Err(Error::Unbound));
        assert_eq!(parser.row_index(), Err(Error::Unbound));

        assert!(parser.parse("A1"));
        assert_eq!(parser.column_index().unwrap(), 0);
        assert_eq!(parser.row_index().unwrap(), 0);

        assert!(parser.parse("A2"));
        assert_eq!(parser.column_index().unwrap(), 0);
        assert_eq!(parser.row_index().unwrap(), 1);

        assert!(parser.parse("B1"));
        assert_eq!(parser.column_index().unwrap(), 1);
        assert_eq!(parser.row_index().unwrap(), 0);

        assert!(!parser.parse("hello"));
        assert_eq!(parser.column_index(), Err(Error::Unbound));
        assert_eq!(parser.row_index(), Err(Error::Unbound));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let mut parser = ReferenceParser::new();
        for text in ["", "A", "1", "A0", "1A", "A1B", "$A$1", "A-1", "A+1"] {
            assert!(!parser.parse(text), "'{}' should not parse", text);
            assert!(!parser.is_bound());
        }
    }

    #[test]
    fn test_cell_ref_from_str_and_display() {
        let r: CellRef = "AB12".parse().unwrap();
        assert_eq!(r, CellRef::new(11, 27));
        assert_eq!(r.to_string(), "AB12");
        assert!("12".parse::<CellRef>().is_err());
    }

    proptest! {
        #[test]
        fn column_round_trip(col in 0i64..10_000_000) {
            prop_assert_eq!(decode_column(&encode_column(col).unwrap()).unwrap(), col);
        }

        #[test]
        fn row_round_trip(row in 0i64..i64::MAX - 1) {
            prop_assert_eq!(decode_row(&encode_row(row).unwrap()).unwrap(), row);
        }

        #[test]
        fn parser_round_trip(row in 0u32..u32::MAX, col in 0u32..1_000_000) {
            let mut parser = ReferenceParser::new();
            prop_assert!(parser.parse(&CellRef::new(row, col).to_string()));
            prop_assert_eq!(parser.row_index().unwrap(), row);
            prop_assert_eq!(parser.column_index().unwrap(), col);
        }
    }
}
