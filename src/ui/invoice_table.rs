use tui::{
    backend::Backend,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::models::{BadgeVariant, InvoiceRecord, PaymentStatus};

/// Shown in the file column when nothing was attached
pub const NO_FILE: &str = "-";

pub fn badge_style(variant: BadgeVariant) -> Style {
    match variant {
        BadgeVariant::Default => Style::default().fg(Color::Black).bg(Color::White).add_modifier(Modifier::BOLD),
        BadgeVariant::Secondary => Style::default().fg(Color::White).bg(Color::DarkGray),
        BadgeVariant::Destructive => Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

pub fn status_badge(status: PaymentStatus) -> Span<'static> {
    Span::styled(format!(" {} ", status.label()), badge_style(status.badge_variant()))
}

fn record_row(record: &InvoiceRecord) -> Row<'static> {
    let file = match &record.file_name {
        Some(name) => Cell::from(name.clone()),
        None => Cell::from(NO_FILE).style(Style::default().fg(Color::DarkGray)),
    };

    Row::new(vec![
        Cell::from(record.invoice_id.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(status_badge(record.payment_status)),
        Cell::from(record.total_amount.clone()),
        Cell::from(record.payment_method.label()),
        file,
    ])
    .height(1)
}

/// Draw the submitted invoices. Callers skip this entirely when there are none.
pub fn render_invoice_table<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    records: &[InvoiceRecord],
    table_state: &mut TableState,
) {
    let header_cells = ["Invoice", "Status", "Amount", "Method", "File"]
        .iter()
        .map(|h| Cell::from(*h).style(Style::default().fg(Color::Yellow)));
    let header = Row::new(header_cells)
        .style(Style::default())
        .height(1)
        .bottom_margin(1);

    let rows = records.iter().map(record_row);

    let table = Table::new(rows)
        .header(header)
        .block(Block::default().title("Submitted Invoices").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .widths(&[
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(25),
        ]);

    frame.render_stateful_widget(table, area, table_state);
}
