//! Delimited-text validation for fetched tables
//!
//! A table is trusted only after every record parses against its header row.
//! Rows must match the header's field count. An empty body is a table with no
//! rows.

use std::io::Write;

use csv::{ReaderBuilder, StringRecord};

use crate::errors::{DumpError, DumpResult};

/// Parse `text` in full as CSV with a header row
///
/// When `show` is set each row is written to `out` as a header-keyed map.
/// Returns the number of data rows; text without a header row has none.
///
/// # Errors
///
/// Returns `DumpError::Parse` on the first malformed record, including a row
/// whose field count differs from the header, and `DumpError::Show` if a row
/// cannot be written to `out`.
pub fn validate_table<W: Write>(
    table: &str,
    text: &str,
    show: bool,
    out: &mut W,
) -> DumpResult<usize> {
    let parse_error = |source| DumpError::Parse {
        table: table.to_string(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(parse_error)?.clone();
    if headers.is_empty() {
        tracing::debug!("Table {} is empty", table);
        return Ok(0);
    }

    let mut rows = 0;
    for record in reader.records() {
        let record = record.map_err(parse_error)?;
        if show {
            writeln!(out, "{}", format_row(&headers, &record)).map_err(|source| {
                DumpError::Show {
                    table: table.to_string(),
                    source,
                }
            })?;
        }
        rows += 1;
    }

    tracing::debug!("Table {} parsed: {} rows", table, rows);
    Ok(rows)
}

fn format_row(headers: &StringRecord, record: &StringRecord) -> String {
    let fields: Vec<String> = headers
        .iter()
        .zip(record.iter())
        .map(|(header, value)| format!("{:?}: {:?}", header, value))
        .collect();
    format!("{{{}}}", fields.join(", "))
}
