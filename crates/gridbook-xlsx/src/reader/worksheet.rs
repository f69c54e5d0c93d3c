//! Worksheet parts (`xl/worksheets/sheetN.xml`)

use std::io::BufRead;

use gridbook_core::{ReferenceParser, Sheet, SheetBuilder};
use log::{debug, trace, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::XlsxResult;
use crate::styles::{attr_string, attr_u32};
use crate::value::{CellKind, CellResolver, DateStyles, SharedStrings};

/// Raw attributes and payload of a `c` element being read
#[derive(Debug, Default)]
struct RawCell {
    row: u32,
    col: u32,
    kind: Option<CellKind>,
    style: Option<String>,
    value: Option<String>,
    inline: Option<String>,
}

impl RawCell {
    /// Inline string text wins over `v` for `inlineStr` cells
    fn payload(&self) -> Option<&str> {
        match self.kind {
            Some(CellKind::InlineString) => self.inline.as_deref().or(self.value.as_deref()),
            _ => self.value.as_deref().or(self.inline.as_deref()),
        }
    }
}

/// Tracks where the next cell goes when it carries no usable `r`
#[derive(Debug, Default)]
struct Cursor {
    row: Option<u32>,
    next_col: u32,
}

impl Cursor {
    fn start_row(&mut self, declared: Option<u32>) {
        let row = match declared {
            Some(r) if r > 0 => r - 1,
            _ => self.row.map_or(0, |r| r.saturating_add(1)),
        };
        self.row = Some(row);
        self.next_col = 0;
    }

    fn place(
        &mut self,
        parser: &mut ReferenceParser,
        reference: Option<&str>,
    ) -> XlsxResult<(u32, u32)> {
        let position = match reference {
            Some(r) if parser.parse(r) => (parser.row_index()?, parser.column_index()?),
            other => {
                if let Some(r) = other {
                    warn!("Ignoring unparsable cell reference {:?}", r);
                }
                (self.row.unwrap_or(0), self.next_col)
            }
        };
        self.row = Some(position.0);
        self.next_col = position.1.saturating_add(1);
        Ok(position)
    }
}

/// Read one worksheet part into a sheet named `name`
///
/// Cells whose value resolves to nothing are left out of the sheet.
pub fn read_worksheet<R, S, D>(
    reader: R,
    name: &str,
    resolver: &CellResolver<'_, S, D>,
) -> XlsxResult<Sheet>
where
    R: BufRead,
    S: SharedStrings + ?Sized,
    D: DateStyles + ?Sized,
{
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut sheet = SheetBuilder::new();
    sheet.name(name);

    let mut parser = ReferenceParser::new();
    let mut cursor = Cursor::default();
    let mut cell: Option<RawCell> = None;
    let mut in_v = false;
    let mut in_is = false;
    let mut in_t = false;
    let mut in_rph = false;
    let mut skipped = 0usize;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => cursor.start_row(attr_u32(&e, b"r")?),
                b"c" => cell = Some(start_cell(&e, &mut cursor, &mut parser)?),
                b"v" if cell.is_some() => in_v = true,
                b"is" if cell.is_some() => in_is = true,
                b"rPh" if in_is => in_rph = true,
                b"t" if in_is && !in_rph => in_t = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => cursor.start_row(attr_u32(&e, b"r")?),
                b"c" => {
                    let raw = start_cell(&e, &mut cursor, &mut parser)?;
                    trace!("Cell ({}, {}) has no value", raw.row, raw.col);
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"c" => {
                    if let Some(raw) = cell.take() {
                        if !store_cell(&raw, resolver, &mut sheet) {
                            skipped += 1;
                        }
                    }
                    in_v = false;
                    in_is = false;
                    in_t = false;
                    in_rph = false;
                }
                b"v" => in_v = false,
                b"is" => in_is = false,
                b"rPh" => in_rph = false,
                b"t" => in_t = false,
                _ => {}
            },
            Event::Text(e) if in_v || in_t => {
                let text = e.unescape()?;
                push_payload(cell.as_mut(), in_v, &text);
            }
            Event::CData(e) if in_v || in_t => {
                let text = String::from_utf8_lossy(&e);
                push_payload(cell.as_mut(), in_v, &text);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let sheet = sheet.finish();
    debug!(
        "Read worksheet '{}': {} cells, {} skipped",
        sheet.name(),
        sheet.len(),
        skipped
    );
    Ok(sheet)
}

fn start_cell(
    e: &BytesStart<'_>,
    cursor: &mut Cursor,
    parser: &mut ReferenceParser,
) -> XlsxResult<RawCell> {
    let reference = attr_string(e, b"r")?;
    let (row, col) = cursor.place(parser, reference.as_deref())?;
    Ok(RawCell {
        row,
        col,
        kind: attr_string(e, b"t")?.map(|t| CellKind::from_attr(&t)),
        style: attr_string(e, b"s")?,
        ..RawCell::default()
    })
}

fn push_payload(cell: Option<&mut RawCell>, in_v: bool, text: &str) {
    let Some(cell) = cell else {
        return;
    };
    let target = if in_v { &mut cell.value } else { &mut cell.inline };
    target.get_or_insert_with(String::new).push_str(text);
}

/// Resolve a finished cell into the sheet; false when it resolved to nothing
fn store_cell<S, D>(raw: &RawCell, resolver: &CellResolver<'_, S, D>, sheet: &mut SheetBuilder) -> bool
where
    S: SharedStrings + ?Sized,
    D: DateStyles + ?Sized,
{
    let Some(text) = raw.payload() else {
        trace!("Cell ({}, {}) has no value", raw.row, raw.col);
        return true;
    };
    match resolver.resolve(text, raw.kind, raw.style.as_deref()) {
        Some(value) => {
            sheet.value(raw.row, raw.col, value);
            true
        }
        None => {
            warn!(
                "Skipping cell ({}, {}): cannot resolve {:?} as {:?} with style {:?}",
                raw.row, raw.col, text, raw.kind, raw.style
            );
            false
        }
    }
}
