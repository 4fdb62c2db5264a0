//! Top-violators report.

use anyhow::Result;
use comfy_table::{presets, Attribute, Cell, CellAlignment, ContentArrangement, Table};
use std::io::Write;

use cleanchat_core::ViolationTracker;

use crate::ui::output_format::styled;
use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Builds the ranked table for the `n` most frequent violators.
pub fn violators_table(tracker: &ViolationTracker, n: usize, supports_color: bool) -> Table {
    let mut table = Table::new();
    if supports_color {
        table.load_preset(presets::UTF8_FULL);
    } else {
        table.load_preset(presets::ASCII_FULL);
        table.force_no_tty();
    }
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let header = ["#", "Author", "Violations"].map(|h| {
        let cell = Cell::new(h);
        if supports_color { cell.add_attribute(Attribute::Bold) } else { cell }
    });
    table.set_header(header);

    for (rank, (author_id, count)) in tracker.top_violators(n).into_iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(tracker.display_name(author_id)),
            Cell::new(count).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Prints the report title and table, or a note when nothing was recorded.
pub fn print_top_violators<W: Write>(
    writer: &mut W,
    tracker: &ViolationTracker,
    n: usize,
    theme: &ThemeMap,
    supports_color: bool,
) -> Result<()> {
    if tracker.is_empty() {
        writeln!(writer, "{}", styled("No violations recorded.", ThemeEntry::Success, theme, supports_color))?;
        return Ok(());
    }

    let title = format!("Top violators ({} violations total)", tracker.total_violations());
    writeln!(writer, "{}", styled(&title, ThemeEntry::Header, theme, supports_color))?;
    writeln!(writer, "{}", violators_table(tracker, n, supports_color))?;
    Ok(())
}
