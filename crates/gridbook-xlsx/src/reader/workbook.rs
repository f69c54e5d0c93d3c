//! Workbook part (`xl/workbook.xml`)

use std::io::BufRead;

use gridbook_core::DateSystem;
use log::debug;
use quick_xml::events::Event;
use quick_xml::reader::Reader;

use crate::error::XlsxResult;
use crate::styles::attr_string;

/// What the readers need from `workbook.xml`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkbookInfo {
    /// Date system declared by `workbookPr@date1904`
    pub date_system: DateSystem,
    /// Sheet names in declaration order
    pub sheet_names: Vec<String>,
}

/// Read the date system and sheet names
pub fn read_workbook<R: BufRead>(reader: R) -> XlsxResult<WorkbookInfo> {
    let mut xml_reader = Reader::from_reader(reader);
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut info = WorkbookInfo::default();

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(e) | Event::Empty(e) => match e.local_name().as_ref() {
                b"workbookPr" => {
                    let date1904 = attr_string(&e, b"date1904")?
                        .map(|v| matches!(v.trim(), "1" | "true"))
                        .unwrap_or(false);
                    info.date_system = DateSystem::from_date1904_flag(date1904);
                }
                b"sheet" => {
                    let name = attr_string(&e, b"name")?.unwrap_or_default();
                    info.sheet_names.push(name);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!(
        "Workbook declares {} sheets, date system {:?}",
        info.sheet_names.len(),
        info.date_system
    );
    Ok(info)
}
