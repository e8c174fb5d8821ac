use crate::aggregate::{AggregateRow, AggregateTable};

/// The `n` largest rows of an aggregate by summed total, descending. The sort
/// is stable and compares only the total, so rows with equal totals keep
/// their relative order from the input table; no secondary key is invented.
/// `n` larger than the table returns every row; `n == 0` returns nothing.
pub fn top_n(table: &AggregateTable, n: usize) -> Vec<AggregateRow> {
    let mut rows = table.rows.clone();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows.truncate(n);
    rows
}
