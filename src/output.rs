use crate::aggregate::AggregateTable;
use serde::Serialize;
use std::error::Error;
use tabled::builder::Builder;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &str, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV export for a dynamically-keyed aggregate: one header of key names plus
/// the measure, one record per group.
pub fn write_aggregate_csv(path: &str, table: &AggregateTable) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    let mut header: Vec<String> = table.key_names.iter().map(|s| s.to_string()).collect();
    header.push(table.measure.to_string());
    wtr.write_record(&header)?;
    for row in &table.rows {
        let mut record: Vec<String> = row.keys.iter().map(|k| k.to_string()).collect();
        record.push(row.total.to_string());
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &str, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Print a report banner followed by a Markdown preview of the first rows.
pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    banner(title, note);
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

/// Markdown preview of an aggregate table, built row by row since the column
/// set is only known at runtime.
pub fn preview_aggregate(title: &str, note: Option<&str>, table: &AggregateTable, max_rows: usize) {
    banner(title, note);
    if table.rows.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let mut builder = Builder::default();
    let mut header: Vec<String> = table.key_names.iter().map(|s| s.to_string()).collect();
    header.push(table.measure.to_string());
    builder.push_record(header);
    for row in table.rows.iter().take(max_rows) {
        let mut record: Vec<String> = row.keys.iter().map(|k| k.to_string()).collect();
        record.push(row.total.to_string());
        builder.push_record(record);
    }
    let table_str = builder.build().with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

fn banner(title: &str, note: Option<&str>) {
    println!("{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
}
