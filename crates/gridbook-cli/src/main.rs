//! Gridbook CLI - dump normalized spreadsheet cells

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridbook_core::cell::encode_ref;
use gridbook_core::{Book, CellRef, DateSystem};
use gridbook_html::{HtmlReadOptions, HtmlReader};
use gridbook_xlsx::{XlsxParts, XlsxReadOptions, XlsxReader};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "gridbook")]
#[command(
    author,
    version,
    about = "Normalize HTML tables and SpreadsheetML parts into typed cells"
)]
struct Cli {
    /// Log reader decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cells of every table in an HTML document
    Html {
        /// Input HTML file
        input: PathBuf,

        /// Only print the sheet at this index (0-based)
        #[arg(short, long)]
        sheet: Option<usize>,

        /// Name prefix for tables without a caption
        #[arg(short, long, default_value = "Sheet ")]
        prefix: String,

        /// Keep rows that belong to <tfoot>
        #[arg(long)]
        include_footer: bool,
    },

    /// Print the cells of worksheet parts extracted from an XLSX file
    Xlsx {
        /// Worksheet part (xl/worksheets/sheetN.xml), repeat for each sheet
        #[arg(long = "sheet-part", required = true)]
        sheet_parts: Vec<PathBuf>,

        /// Workbook part (xl/workbook.xml)
        #[arg(long)]
        workbook: Option<PathBuf>,

        /// Shared strings part (xl/sharedStrings.xml)
        #[arg(long)]
        shared_strings: Option<PathBuf>,

        /// Styles part (xl/styles.xml)
        #[arg(long)]
        styles: Option<PathBuf>,

        /// Use the 1904 date system regardless of the workbook part
        #[arg(long)]
        date1904: bool,
    },

    /// Convert between A1 references and 0-based ROW,COL indices
    Ref {
        /// An A1 reference such as "C7", or indices such as "6,2"
        reference: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "gridbook_core=debug,gridbook_html=debug,gridbook_xlsx=debug,gridbook=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Commands::Html {
            input,
            sheet,
            prefix,
            include_footer,
        } => {
            let options = HtmlReadOptions {
                sheet_name_prefix: prefix,
                skip_footer_rows: !include_footer,
            };
            read_html(&input, &options, sheet)
        }
        Commands::Xlsx {
            sheet_parts,
            workbook,
            shared_strings,
            styles,
            date1904,
        } => {
            let options = XlsxReadOptions {
                date_system: date1904.then_some(DateSystem::V1904),
            };
            read_xlsx(
                &sheet_parts,
                workbook.as_deref(),
                shared_strings.as_deref(),
                styles.as_deref(),
                &options,
            )
        }
        Commands::Ref { reference } => {
            println!("{}", convert_reference(&reference)?);
            Ok(())
        }
    }
}

fn read_html(input: &Path, options: &HtmlReadOptions, sheet: Option<usize>) -> Result<()> {
    let markup = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let book = HtmlReader::read_str(&markup, options)
        .with_context(|| format!("Failed to parse '{}'", input.display()))?;
    info!("Read {} tables from '{}'", book.sheet_count(), input.display());
    print_book(&book, sheet)
}

fn read_part(path: Option<&Path>) -> Result<Option<Vec<u8>>> {
    path.map(|path| {
        std::fs::read(path).with_context(|| format!("Failed to read '{}'", path.display()))
    })
    .transpose()
}

fn read_xlsx(
    sheet_parts: &[PathBuf],
    workbook: Option<&Path>,
    shared_strings: Option<&Path>,
    styles: Option<&Path>,
    options: &XlsxReadOptions,
) -> Result<()> {
    let workbook = read_part(workbook)?;
    let shared_strings = read_part(shared_strings)?;
    let styles = read_part(styles)?;
    let worksheets = sheet_parts
        .iter()
        .map(|path| read_part(Some(path.as_path())).map(Option::unwrap_or_default))
        .collect::<Result<Vec<_>>>()?;

    let parts = XlsxParts {
        workbook: workbook.as_deref(),
        shared_strings: shared_strings.as_deref(),
        styles: styles.as_deref(),
        worksheets: worksheets.iter().map(Vec::as_slice).collect(),
    };
    let book = XlsxReader::read_parts(&parts, options).context("Failed to read workbook parts")?;
    info!("Read {} worksheets", book.sheet_count());
    print_book(&book, None)
}

/// Print `Sheet<TAB>Ref<TAB>Type<TAB>Value` lines
fn print_book(book: &Book, only: Option<usize>) -> Result<()> {
    if let Some(index) = only {
        book.sheet(index)
            .with_context(|| format!("Sheet index {} not found", index))?;
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for (index, sheet) in book.sheets().enumerate() {
        if only.is_some_and(|only| only != index) {
            continue;
        }
        debug!(
            "Sheet '{}': {} rows x {} columns",
            sheet.name(),
            sheet.row_count(),
            sheet.column_count()
        );
        for (cell, value) in sheet.cells() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}",
                sheet.name(),
                cell,
                value.type_name(),
                escape(&value.to_string())
            )?;
        }
    }
    out.flush().context("Failed to write to stdout")?;
    Ok(())
}

/// Keep one cell per line
fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\t', "\\t")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
}

/// Turn "ROW,COL" into an A1 reference, or an A1 reference into "ROW,COL"
fn convert_reference(reference: &str) -> Result<String> {
    let reference = reference.trim();
    if let Some((row, col)) = reference.split_once(',') {
        let row: i64 = row.trim().parse().context("ROW must be an integer")?;
        let col: i64 = col.trim().parse().context("COL must be an integer")?;
        return Ok(encode_ref(row, col)?);
    }

    let cell: CellRef = reference.parse()?;
    Ok(format!("{},{}", cell.row, cell.col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("plain"), "plain");
        assert_eq!(escape("a\tb\nc"), "a\\tb\\nc");
        assert_eq!(escape("C:\\x"), "C:\\\\x");
    }

    #[test]
    fn test_convert_reference() {
        assert_eq!(convert_reference("C7").unwrap(), "6,2");
        assert_eq!(convert_reference(" aa12 ").unwrap(), "11,26");
        assert_eq!(convert_reference("6,2").unwrap(), "C7");
        assert_eq!(convert_reference("0, 27").unwrap(), "AB1");
        assert!(convert_reference("-1,2").is_err());
        assert!(convert_reference("7C").is_err());
        assert!(convert_reference("C-7").is_err());
        assert!(convert_reference("C0").is_err());
        assert!(convert_reference("C7x").is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "gridbook",
            "xlsx",
            "--sheet-part",
            "sheet1.xml",
            "--sheet-part",
            "sheet2.xml",
            "--date1904",
        ])
        .unwrap();
        match cli.command {
            Commands::Xlsx {
                sheet_parts,
                date1904,
                ..
            } => {
                assert_eq!(sheet_parts.len(), 2);
                assert!(date1904);
            }
            _ => panic!("expected xlsx subcommand"),
        }
    }
}
