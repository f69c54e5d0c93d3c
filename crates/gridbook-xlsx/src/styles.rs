//! Cell style table (`xl/styles.xml`)
//!
//! Only the number format of each cell style matters here: it decides
//! whether a numeric cell holds a date.

use std::collections::HashMap;
use std::io::BufRead;

use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::XlsxResult;
use crate::number_format::{is_builtin_date_format, is_date_format_code};

/// Read `styles.xml` into one date flag per `cellXfs/xf` entry
///
/// The flag at index `i` answers "is style `s="i"` a date format".
pub fn read_date_styles<R: BufRead>(reader: R) -> XlsxResult<Vec<bool>> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut num_fmts: HashMap<u32, String> = HashMap::new();
    let mut xf_num_fmt_ids: Vec<u32> = Vec::new();
    // Only numFmts/numFmt counts: the ones under dxfs may reuse ids
    let mut in_num_fmts = false;
    let mut in_cell_xfs = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"numFmts" => in_num_fmts = true,
                b"cellXfs" => in_cell_xfs = true,
                b"numFmt" if in_num_fmts => read_num_fmt(&e, &mut num_fmts)?,
                b"xf" if in_cell_xfs => {
                    xf_num_fmt_ids.push(attr_u32(&e, b"numFmtId")?.unwrap_or(0));
                }
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"numFmt" if in_num_fmts => read_num_fmt(&e, &mut num_fmts)?,
                b"xf" if in_cell_xfs => {
                    xf_num_fmt_ids.push(attr_u32(&e, b"numFmtId")?.unwrap_or(0));
                }
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"numFmts" => in_num_fmts = false,
                b"cellXfs" => in_cell_xfs = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    let flags: Vec<bool> = xf_num_fmt_ids
        .into_iter()
        .map(|id| match num_fmts.get(&id) {
            Some(code) => is_date_format_code(code),
            None => is_builtin_date_format(id),
        })
        .collect();

    debug!(
        "Read {} cell styles ({} custom number formats, {} dates)",
        flags.len(),
        num_fmts.len(),
        flags.iter().filter(|&&d| d).count()
    );

    Ok(flags)
}

fn read_num_fmt(e: &BytesStart<'_>, num_fmts: &mut HashMap<u32, String>) -> XlsxResult<()> {
    let id = attr_u32(e, b"numFmtId")?;
    let code = attr_string(e, b"formatCode")?;
    if let (Some(id), Some(code)) = (id, code) {
        num_fmts.insert(id, code);
    }
    Ok(())
}

pub(crate) fn attr_string(e: &BytesStart<'_>, name: &[u8]) -> XlsxResult<Option<String>> {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

pub(crate) fn attr_u32(e: &BytesStart<'_>, name: &[u8]) -> XlsxResult<Option<u32>> {
    Ok(attr_string(e, name)?.and_then(|s| s.trim().parse().ok()))
}
