//! Cell value resolution
//!
//! A worksheet cell arrives as raw text plus two optional attributes: the
//! type tag `t` and the style index `s`. Turning that into a typed value
//! needs the workbook's shared string table, the date-ness of each cell
//! style and the date system, all of which are borrowed here rather than
//! owned.

use chrono::NaiveDate;
use gridbook_core::{CellValue, DateSystem};

/// Fixed layout of `t="d"` cell payloads
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The `t` attribute of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// `n`, also the meaning of a missing tag
    Number,
    /// `d`, an ISO 8601 date
    Date,
    /// `s`, an index into the shared string table
    SharedString,
    /// `str`, a formula's string result
    String,
    /// `inlineStr`, text stored in the cell itself
    InlineString,
    /// Anything else, including booleans and errors
    Unknown,
}

impl CellKind {
    /// Map a `t` attribute value to a kind
    pub fn from_attr(value: &str) -> Self {
        match value {
            "n" => CellKind::Number,
            "d" => CellKind::Date,
            "s" => CellKind::SharedString,
            "str" => CellKind::String,
            "inlineStr" => CellKind::InlineString,
            _ => CellKind::Unknown,
        }
    }
}

/// Read access to a shared string table
pub trait SharedStrings {
    /// The string at `index`, or `None` when out of range
    fn shared_string(&self, index: usize) -> Option<&str>;
}

impl SharedStrings for [String] {
    fn shared_string(&self, index: usize) -> Option<&str> {
        self.get(index).map(String::as_str)
    }
}

impl SharedStrings for Vec<String> {
    fn shared_string(&self, index: usize) -> Option<&str> {
        self.as_slice().shared_string(index)
    }
}

impl SharedStrings for [&str] {
    fn shared_string(&self, index: usize) -> Option<&str> {
        self.get(index).copied()
    }
}

/// Read access to the date-ness of cell styles
pub trait DateStyles {
    /// Whether style `index` has a date format, or `None` when out of range
    fn is_date_style(&self, index: usize) -> Option<bool>;
}

impl DateStyles for [bool] {
    fn is_date_style(&self, index: usize) -> Option<bool> {
        self.get(index).copied()
    }
}

impl DateStyles for Vec<bool> {
    fn is_date_style(&self, index: usize) -> Option<bool> {
        self.as_slice().is_date_style(index)
    }
}

/// Resolve a raw cell into a typed value
///
/// Returns `None` when the combination of text, kind and style does not
/// yield a value:
/// - a shared string index that does not parse or is out of range
/// - a `d` payload that is not a `yyyy-mm-dd` date
/// - a number that does not parse, or whose style index does not parse or
///   is out of range
/// - an unknown kind
///
/// A missing kind behaves like [`CellKind::Number`] and a missing style
/// like a non-date style.
pub fn resolve<S, D>(
    text: &str,
    kind: Option<CellKind>,
    style: Option<&str>,
    shared_strings: &S,
    date_styles: &D,
    date_system: DateSystem,
) -> Option<CellValue>
where
    S: SharedStrings + ?Sized,
    D: DateStyles + ?Sized,
{
    match kind.unwrap_or(CellKind::Number) {
        CellKind::SharedString => {
            let index: usize = text.trim().parse().ok()?;
            shared_strings.shared_string(index).map(CellValue::text)
        }
        CellKind::String | CellKind::InlineString => Some(CellValue::text(text)),
        CellKind::Date => parse_date(text).map(CellValue::DateTime),
        CellKind::Number => {
            let number = parse_number(text)?;
            let is_date = match style {
                Some(style) => {
                    let index: usize = style.trim().parse().ok()?;
                    date_styles.is_date_style(index)?
                }
                None => false,
            };
            if is_date {
                date_system.to_datetime(number).map(CellValue::DateTime)
            } else {
                Some(CellValue::Number(number))
            }
        }
        CellKind::Unknown => None,
    }
}

/// Parse a finite number; `inf`, `NaN` and friends are not cell values
fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse the date at the start of `text`; any time part is dropped
fn parse_date(text: &str) -> Option<chrono::NaiveDateTime> {
    let (date, _) = NaiveDate::parse_and_remainder(text.trim(), DATE_FORMAT).ok()?;
    date.and_hms_opt(0, 0, 0)
}

/// Resolves cells against one workbook's lookup tables
#[derive(Debug)]
pub struct CellResolver<'a, S: ?Sized, D: ?Sized> {
    shared_strings: &'a S,
    date_styles: &'a D,
    date_system: DateSystem,
}

impl<'a, S, D> CellResolver<'a, S, D>
where
    S: SharedStrings + ?Sized,
    D: DateStyles + ?Sized,
{
    /// Bundle the lookup tables and date system of a workbook
    pub fn new(shared_strings: &'a S, date_styles: &'a D, date_system: DateSystem) -> Self {
        Self {
            shared_strings,
            date_styles,
            date_system,
        }
    }

    /// The date system serial numbers are interpreted in
    pub fn date_system(&self) -> DateSystem {
        self.date_system
    }

    /// See [`resolve`]
    pub fn resolve(&self, text: &str, kind: Option<CellKind>, style: Option<&str>) -> Option<CellValue> {
        resolve(
            text,
            kind,
            style,
            self.shared_strings,
            self.date_styles,
            self.date_system,
        )
    }
}
