// Table rendering that depends only on the DataView

use crate::column_manager::ColumnManager;
use crate::data::data_view::{DataView, NO_ITEMS_TEXT};
use ratatui::{
    layout::Constraint,
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

/// Render the current page of the view
pub fn render_table(f: &mut Frame, area: Rect, view: &DataView) {
    if view.is_empty() {
        let empty = Paragraph::new(NO_ITEMS_TEXT)
            .block(Block::default().borders(Borders::ALL).title("Parts"))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(empty, area);
        return;
    }

    let cells = view.page_cells();
    let widths: Vec<Constraint> = ColumnManager::calculate_widths(view.columns(), &cells)
        .into_iter()
        .map(Constraint::Length)
        .collect();

    let header = build_header_row(view);
    let rows = build_data_rows(cells);

    let title = if view.search_query().trim().is_empty() {
        format!("Parts ({} rows)", view.total_count())
    } else {
        format!(
            "Parts ({} of {} rows match '{}')",
            view.row_count(),
            view.total_count(),
            view.search_query()
        )
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn build_header_row(view: &DataView) -> Row<'static> {
    let style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    Row::new(
        view.column_labels()
            .into_iter()
            .map(|label| Cell::from(label.to_string()).style(style))
            .collect::<Vec<_>>(),
    )
}

fn build_data_rows(cells: Vec<Vec<String>>) -> Vec<Row<'static>> {
    cells
        .into_iter()
        .enumerate()
        .map(|(idx, row)| {
            // Zebra striping keeps wide rows readable
            let style = if idx % 2 == 1 {
                Style::default().bg(Color::Rgb(30, 30, 30))
            } else {
                Style::default()
            };
            Row::new(row.into_iter().map(Cell::from).collect::<Vec<_>>()).style(style)
        })
        .collect()
}

/// Shown while the one-off fetch is in flight
pub fn render_loading(f: &mut Frame, area: Rect, url: &str) {
    let loading = Paragraph::new(format!("Loading parts from {} ...", url))
        .block(Block::default().borders(Borders::ALL).title("Parts"))
        .style(Style::default().fg(Color::Gray));
    f.render_widget(loading, area);
}

/// A failed fetch replaces the table with the error
pub fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let error = Paragraph::new(vec![
        Line::from("Failed to load parts").style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(message.to_string()),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title("Error"),
    );
    f.render_widget(error, area);
}
