use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;

use crate::data::data_view::{DataView, NO_ITEMS_TEXT};

/// Render the current page as a comfy-table, or `None` when nothing matches
pub fn render_page(view: &DataView) -> Option<String> {
    if view.is_empty() {
        return None;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        view.column_labels()
            .into_iter()
            .map(|label| Cell::new(label).add_attribute(Attribute::Bold))
            .collect::<Vec<_>>(),
    );

    for row in view.page_cells() {
        table.add_row(row);
    }

    Some(table.to_string())
}

/// "Page p of last │ Showing items a - b"
pub fn page_summary(view: &DataView) -> String {
    if view.is_empty() {
        return NO_ITEMS_TEXT.to_string();
    }
    format!(
        "Page {} of {} │ {}",
        view.current_page(),
        view.last_page_number(),
        view.items_shown_text()
    )
}

/// Print one page to stdout for `--classic`
pub fn display_page(view: &DataView) {
    match render_page(view) {
        Some(table) => {
            println!("{table}");
            println!("\n{}", page_summary(view).green());
        }
        None => println!("{}", NO_ITEMS_TEXT.yellow()),
    }
}
