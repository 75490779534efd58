//! Turning raw rows into keyed records.

mod format;
mod reader;

use std::collections::HashMap;
use std::io::Read;

use csv::StringRecord;

pub use format::{Formats, RowReader};
pub use reader::read_rows;

use crate::parse::Registry;
use crate::schema::{RecordSchema, Schema};
use crate::{LoadOptions, Result};

/// Loaded records keyed by the raw text of their first cell.
pub type Table<R> = HashMap<String, R>;

/// Read `reader` and build one record per data row using `registry`.
pub fn from_reader_with_registry<R, In>(
    mut reader: In,
    schema: &Schema<R>,
    options: &LoadOptions,
    registry: &Registry,
) -> Result<Table<R>>
where
    R: Default,
    In: Read,
{
    let rows = read_rows(&mut reader, options)?;
    Ok(materialize(rows, schema, registry, R::default))
}

/// Build the output table from already tokenized rows.
///
/// The first row is the header. A cell that fails to parse or assign leaves
/// its field at whatever `new` produced; the row is still stored.
pub fn materialize<R, N>(
    rows: Vec<StringRecord>,
    schema: &Schema<R>,
    registry: &Registry,
    new: N,
) -> Table<R>
where
    N: Fn() -> R,
{
    let mut rows = rows.into_iter();
    let Some(header) = rows.next() else {
        return Table::new();
    };
    let mut header: Vec<String> = header.iter().map(str::to_owned).collect();
    let layout = schema.resolve(&mut header);

    let data_rows = rows.len();
    tracing::debug!(
        rows = data_rows,
        columns = header.len(),
        fields = layout.len(),
        unmatched = ?layout.unmatched().collect::<Vec<_>>(),
        "materializing records"
    );

    let mut table = Table::with_capacity(data_rows);
    for (row_index, row) in rows.enumerate() {
        let mut record = new();
        fill_record(&mut record, &row, row_index + 1, &layout, schema, registry);
        let id = row.get(0).unwrap_or_default().to_owned();
        if table.insert(id, record).is_some() {
            tracing::warn!(
                row = row_index + 1,
                id = row.get(0).unwrap_or_default(),
                "duplicate identifier replaces earlier row"
            );
        }
    }

    tracing::debug!(records = table.len(), "materialized records");
    table
}

fn fill_record<R>(
    record: &mut R,
    row: &StringRecord,
    row_index: usize,
    layout: &RecordSchema,
    schema: &Schema<R>,
    registry: &Registry,
) {
    for (field_index, field) in layout.fields().iter().enumerate() {
        let Some(column) = field.column else {
            continue;
        };
        let Some(cell) = row.get(column) else {
            continue;
        };
        let outcome = registry
            .parse(field.kind, cell, field.desc.as_ref())
            .and_then(|value| schema.assign(field_index, record, value));
        // A bad cell keeps the field's default and never fails the load.
        if let Err(err) = outcome {
            let err = err.with_location(row_index, column);
            tracing::trace!(
                field = %field.name,
                kind = %field.kind,
                row = row_index,
                column,
                error = %err,
                "field left at default"
            );
        }
    }
}
