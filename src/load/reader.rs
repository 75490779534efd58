//! Delimited-text row tokenizer.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use crate::{LoadOptions, Result};

const UTF8_BOM: char = '\u{feff}';

/// Read every row of `reader`, header included.
///
/// Rows must all have the header's cell count; a ragged row fails the whole
/// read so callers never see a partial table.
pub fn read_rows(reader: &mut dyn Read, options: &LoadOptions) -> Result<Vec<StringRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(false)
        .delimiter(options.delimiter.as_byte())
        .comment(options.comment)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        rows.push(record?);
    }

    if options.trim_bom {
        if let Some(first) = rows.first_mut() {
            strip_bom(first);
        }
    }
    Ok(rows)
}

fn strip_bom(row: &mut StringRecord) {
    let Some(cell) = row.get(0) else {
        return;
    };
    let Some(stripped) = cell.strip_prefix(UTF8_BOM) else {
        return;
    };
    let mut cleaned = StringRecord::with_capacity(row.as_slice().len(), row.len());
    cleaned.push_field(stripped);
    for cell in row.iter().skip(1) {
        cleaned.push_field(cell);
    }
    *row = cleaned;
}
