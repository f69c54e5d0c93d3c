//! Reading whole workbooks from extracted parts

use chrono::NaiveDate;
use gridbook_core::{CellValue, DateSystem};
use gridbook_xlsx::{XlsxError, XlsxParts, XlsxReadOptions, XlsxReader};
use pretty_assertions::assert_eq;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"
          xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <workbookPr defaultThemeVersion="124226"/>
  <sheets>
    <sheet name="Orders" sheetId="1" r:id="rId1"/>
  </sheets>
</workbook>"#;

const WORKBOOK_1904: &str = r#"<workbook><workbookPr date1904="1"/><sheets>
  <sheet name="Orders" sheetId="1"/>
</sheets></workbook>"#;

const SHARED_STRINGS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
  <si><t>Item</t></si>
  <si><t>Shipped</t></si>
  <si><t>Widget</t></si>
</sst>"#;

const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="1"><numFmt numFmtId="164" formatCode="dd/mm/yyyy"/></numFmts>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="164" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
    <xf numFmtId="4" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/>
  </cellXfs>
</styleSheet>"#;

const ORDERS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <dimension ref="A1:C2"/>
  <sheetData>
    <row r="1" spans="1:3">
      <c r="A1" t="s"><v>0</v></c>
      <c r="B1" t="s"><v>1</v></c>
      <c r="C1" t="inlineStr"><is><t>Total</t></is></c>
    </row>
    <row r="2" spans="1:3">
      <c r="A2" t="s"><v>2</v></c>
      <c r="B2" s="1"><v>45306.5</v></c>
      <c r="C2" s="2"><v>1234.5</v></c>
    </row>
  </sheetData>
</worksheet>"#;

fn datetime(y: i32, m: u32, d: u32, h: u32) -> CellValue {
    CellValue::DateTime(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap(),
    )
}

fn full_parts(workbook: &'static str) -> XlsxParts<'static> {
    XlsxParts::new(vec![ORDERS.as_bytes()])
        .workbook(workbook.as_bytes())
        .shared_strings(SHARED_STRINGS.as_bytes())
        .styles(STYLES.as_bytes())
}

#[test]
fn test_read_full_workbook() {
    let book = XlsxReader::read_parts(&full_parts(WORKBOOK), &XlsxReadOptions::default()).unwrap();

    assert_eq!(book.sheet_names(), vec!["Orders"]);
    let sheet = book.sheet(0).unwrap();
    assert_eq!(sheet.len(), 6);
    assert_eq!(sheet.get_ref("A1"), Some(&CellValue::text("Item")));
    assert_eq!(sheet.get_ref("B1"), Some(&CellValue::text("Shipped")));
    assert_eq!(sheet.get_ref("C1"), Some(&CellValue::text("Total")));
    assert_eq!(sheet.get_ref("A2"), Some(&CellValue::text("Widget")));
    assert_eq!(sheet.get_ref("B2"), Some(&datetime(2024, 1, 15, 12)));
    assert_eq!(sheet.get_ref("C2"), Some(&CellValue::Number(1234.5)));
}

#[test]
fn test_date1904_workbook() {
    let book =
        XlsxReader::read_parts(&full_parts(WORKBOOK_1904), &XlsxReadOptions::default()).unwrap();
    let sheet = book.sheet_by_name("Orders").unwrap();
    assert_eq!(sheet.get_ref("B2"), Some(&datetime(2028, 1, 16, 12)));
}

#[test]
fn test_date_system_override() {
    let options = XlsxReadOptions {
        date_system: Some(DateSystem::V1900),
    };
    let book = XlsxReader::read_parts(&full_parts(WORKBOOK_1904), &options).unwrap();
    let sheet = book.sheet(0).unwrap();
    assert_eq!(sheet.get_ref("B2"), Some(&datetime(2024, 1, 15, 12)));
}

#[test]
fn test_missing_optional_parts() {
    let parts = XlsxParts::new(vec![ORDERS.as_bytes(), ORDERS.as_bytes()]);
    let book = XlsxReader::read_parts(&parts, &XlsxReadOptions::default()).unwrap();

    assert_eq!(book.sheet_names(), vec!["Sheet1", "Sheet2"]);
    let sheet = book.sheet(1).unwrap();
    // Shared string lookups fail and style 1 is out of range
    assert_eq!(sheet.get_ref("A1"), None);
    assert_eq!(sheet.get_ref("B2"), None);
    assert_eq!(sheet.get_ref("C1"), Some(&CellValue::text("Total")));
    assert_eq!(sheet.len(), 1);
}

#[test]
fn test_unnamed_sheets_get_default_names() {
    let parts = XlsxParts::new(vec![ORDERS.as_bytes(), ORDERS.as_bytes()]).workbook(WORKBOOK.as_bytes());
    let book = XlsxReader::read_parts(&parts, &XlsxReadOptions::default()).unwrap();
    assert_eq!(book.sheet_names(), vec!["Orders", "Sheet2"]);
}

#[test]
fn test_duplicate_sheet_names_are_rejected() {
    let workbook = r#"<workbook><sheets><sheet name="A"/><sheet name="A"/></sheets></workbook>"#;
    let parts = XlsxParts::new(vec![ORDERS.as_bytes(), ORDERS.as_bytes()]).workbook(workbook.as_bytes());
    let err = XlsxReader::read_parts(&parts, &XlsxReadOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        XlsxError::Core(gridbook_core::Error::DuplicateSheetName(ref name)) if name == "A"
    ));
}

#[test]
fn test_malformed_xml_is_an_error() {
    let parts = XlsxParts::new(vec![&b"<worksheet><sheetData></row></sheetData></worksheet>"[..]]);
    let result = XlsxReader::read_parts(&parts, &XlsxReadOptions::default());
    assert!(matches!(result, Err(XlsxError::Xml(_))));
}
