//! Table output for `--format table`

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

/// Printed instead of an empty table
pub const EMPTY: &str = "Nothing matched in TestRail.";

/// Rounded table with centered headers; `EMPTY` when there are no rows.
pub fn format_table<T: Tabled>(rows: &[T]) -> String {
    if rows.is_empty() {
        return EMPTY.to_string();
    }

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()))
        .to_string()
}
