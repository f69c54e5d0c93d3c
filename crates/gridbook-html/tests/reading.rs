//! End-to-end tests for reading HTML tables into books

use gridbook_core::CellValue;
use gridbook_html::{HtmlReadOptions, HtmlReader};
use pretty_assertions::assert_eq;

fn read(html: &str) -> gridbook_core::Book {
    HtmlReader::read_str(html, &HtmlReadOptions::default()).expect("Failed to read HTML")
}

fn dump(sheet: &gridbook_core::Sheet) -> Vec<String> {
    sheet
        .cells()
        .map(|(r, v)| format!("{}={}", r, v))
        .collect()
}

#[test]
fn test_sheet_names() {
    let book = read(
        r#"<html><body>
        <table><caption>First</caption><tr><td>1</td></tr></table>
        <table><tr><td>2</td></tr></table>
        <table><caption></caption><tr><td>3</td></tr></table>
        </body></html>"#,
    );

    assert_eq!(book.sheet_names(), vec!["First", "Sheet 1", "Sheet 2"]);
}

#[test]
fn test_custom_prefix() {
    let options = HtmlReadOptions {
        sheet_name_prefix: "Table".into(),
        ..Default::default()
    };
    let book = HtmlReader::read_str("<table></table><table></table>", &options).unwrap();
    assert_eq!(book.sheet_names(), vec!["Table0", "Table1"]);
}

#[test]
fn test_duplicate_captions() {
    let book = read(
        "<table><caption>T</caption></table><table><caption>T</caption></table>",
    );
    assert_eq!(book.sheet_names(), vec!["T", "T (2)"]);
}

#[test]
fn test_values_are_text() {
    let book = read("<table><tr><td>3.14</td><th>2010-02-01</th></tr></table>");
    let sheet = book.sheet(0).unwrap();

    assert_eq!(sheet.get(0, 0), Some(&CellValue::text("3.14")));
    assert_eq!(sheet.get(0, 1), Some(&CellValue::text("2010-02-01")));
}

#[test]
fn test_merged_layout() {
    // +-----+-----+-----+
    // |  a (2x2)  |  b  |
    // |           +-----+
    // |           |  c  |
    // +-----+-----+-----+
    // |  d  |  e  |  f  |
    // +-----+-----+-----+
    //
    // Only the first column of a cell is reserved below it, so "c" lands
    // next to "a"'s first column.
    let book = read(
        r#"<table>
        <tr><td colspan="2" rowspan="2">a</td><td>b</td></tr>
        <tr><td>c</td></tr>
        <tr><td>d</td><td>e</td><td>f</td></tr>
        </table>"#,
    );

    assert_eq!(
        dump(book.sheet(0).unwrap()),
        vec!["A1=a", "C1=b", "B2=c", "A3=d", "B3=e", "C3=f"]
    );
}

#[test]
fn test_overlapping_rowspans_accumulate() {
    let book = read(
        r#"<table>
        <tr><td rowspan="3">a</td><td>b</td></tr>
        <tr><td rowspan="2">c</td></tr>
        <tr><td>d</td></tr>
        <tr><td>e</td></tr>
        </table>"#,
    );

    assert_eq!(
        dump(book.sheet(0).unwrap()),
        vec!["A1=a", "B1=b", "B2=c", "C3=d", "A4=e"]
    );
}

#[test]
fn test_footer_and_header_sections() {
    let html = r#"<table>
        <thead><tr><th>h</th></tr></thead>
        <tfoot><tr><td>total</td></tr></tfoot>
        <tbody><tr><td>x</td></tr></tbody>
        </table>"#;

    let book = read(html);
    assert_eq!(dump(book.sheet(0).unwrap()), vec!["A1=h", "A2=x"]);

    let options = HtmlReadOptions {
        skip_footer_rows: false,
        ..Default::default()
    };
    let book = HtmlReader::read_str(html, &options).unwrap();
    assert_eq!(dump(book.sheet(0).unwrap()), vec!["A1=h", "A2=total", "A3=x"]);
}

#[test]
fn test_sloppy_html() {
    let book = read(
        "<!DOCTYPE html><TABLE border=1><TR><TD>a<TD>b&nbsp;c<TR><TD>d<br>e</TABLE>",
    );

    let sheet = book.sheet(0).unwrap();
    assert_eq!(sheet.get_ref("A1"), Some(&CellValue::text("a")));
    assert_eq!(sheet.get_ref("B1"), Some(&CellValue::text("b\u{a0}c")));
    assert_eq!(sheet.get_ref("A2"), Some(&CellValue::text("d e")));
}

#[test]
fn test_cell_text_with_bare_ampersand_and_less_than() {
    let book = read(
        "<table><tr><td>AT&T &amp; Co</td><td>1 < 2</td><td>x</td></tr>\
         <tr><td colspan=\"99999999999\">wide</td><td rowspan=\"2\">tall</td></tr></table>",
    );

    let sheet = book.sheet(0).unwrap();
    assert_eq!(sheet.get_ref("A1"), Some(&CellValue::text("AT&T & Co")));
    assert_eq!(sheet.get_ref("B1"), Some(&CellValue::text("1 < 2")));
    assert_eq!(sheet.get_ref("C1"), Some(&CellValue::text("x")));
    assert_eq!(sheet.get(1, 0), Some(&CellValue::text("wide")));
    assert_eq!(sheet.get(1, u32::MAX), Some(&CellValue::text("tall")));
}

#[test]
fn test_from_reader() {
    let html = b"<table><tr><td>x</td></tr></table>".as_slice();
    let book = HtmlReader::read(html, &HtmlReadOptions::default()).unwrap();
    assert_eq!(book.sheet_count(), 1);
    assert_eq!(book.sheet(0).unwrap().len(), 1);
}

#[test]
fn test_no_tables() {
    let book = read("<p>nothing here</p>");
    assert!(book.is_empty());
}
