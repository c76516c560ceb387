//! TUI layout and widget rendering.
//!
//! Every widget is drawn from the [`App`] passed in; nothing is cached
//! between frames.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table};

use super::runtime::{App, format_value};
use super::style;
use crate::form::Field;
use crate::projection::round2;

/// Renders the full TUI frame.
pub fn render(frame: &mut Frame, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // header
            Constraint::Min(14),    // form + chart
            Constraint::Length(12), // summary + table
            Constraint::Length(1),  // footer
        ])
        .split(frame.area());

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(44), Constraint::Min(30)])
        .split(rows[1]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    render_header(frame, app, rows[0]);
    render_form(frame, app, top[0]);
    render_chart(frame, app, top[1]);
    render_summary(frame, app, bottom[0]);
    render_table(frame, app, bottom[1]);
    render_footer(frame, app, rows[3]);
}

/// Header bar: preset name and payback headline.
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let headline = match (app.result.is_profitable, app.result.payback_month) {
        (true, Some(month)) => format!(" │ payback: month {month} "),
        (true, None) => " │ paid back within lifespan ".to_string(),
        (false, _) => " │ not profitable ".to_string(),
    };
    let header = Line::from(vec![
        Span::styled(
            " BATTERY PAYBACK ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            &app.preset_name,
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(headline, Style::default().fg(style::tone_color(app.summary.tone))),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Editable input fields, one per line.
fn render_form(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = Field::ALL
        .iter()
        .enumerate()
        .map(|(idx, &field)| {
            let value = match &app.editing {
                Some(buf) if buf.field == field => format!("{}_", buf.text),
                _ => format_value(app.form.get(field)),
            };
            let unit = match field {
                Field::InstallCost => app.currency.as_str(),
                other => other.unit(),
            };
            let text = format!(" {:<16} {:>12} {:<6}", field.label(), value, unit);
            if idx == app.selected {
                Line::from(Span::styled(
                    text,
                    Style::default()
                        .bg(style::SELECTED_BG)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(text)
            }
        })
        .collect();

    let block = Block::default().title(" Inputs ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Cumulative savings vs install cost, with the payback month marked.
fn render_chart(frame: &mut Frame, app: &App, area: Rect) {
    let result = &app.result;
    let cumulative: Vec<(f64, f64)> = result
        .monthly
        .iter()
        .map(|m| (f64::from(m.month), m.cumulative))
        .collect();

    let x_hi = cumulative.last().map_or(1.0, |p| p.0).max(1.0);
    let y_bounds = style::savings_bounds_y(&cumulative, result.install_cost);

    let cost_line = [(0.0, result.install_cost), (x_hi, result.install_cost)];
    let payback_line: Vec<(f64, f64)> = match result.payback_month {
        Some(month) if result.is_profitable => {
            let x = f64::from(month);
            vec![(x, y_bounds[0]), (x, y_bounds[1])]
        }
        _ => Vec::new(),
    };

    let mut datasets = vec![
        Dataset::default()
            .name("Cumulative savings")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::PRIMARY))
            .data(&cumulative),
        Dataset::default()
            .name("Install cost")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(style::ACCENT))
            .data(&cost_line),
    ];
    if !payback_line.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Paid back")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(style::ACCENT))
                .data(&payback_line),
        );
    }

    let x_labels = vec!["0".to_string(), format!("{}", x_hi as u32)];
    let y_labels = vec![
        format!("{:.0}", y_bounds[0]),
        format!("{:.0}", y_bounds[1]),
    ];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Cumulative Savings ")
                .borders(Borders::ALL),
        )
        .x_axis(
            Axis::default()
                .title("month")
                .bounds([0.0, x_hi])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(app.currency.as_str())
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Average savings, payback message, and color-coded total profit.
fn render_summary(frame: &mut Frame, app: &App, area: Rect) {
    let summary = &app.summary;
    let lines = vec![
        Line::from(format!(" {}", summary.average_line(&app.currency))),
        Line::from(format!(" {}", summary.payback_line())),
        Line::from(Span::styled(
            format!(" {}", summary.profit_line(&app.currency)),
            Style::default()
                .fg(style::tone_color(summary.tone))
                .add_modifier(Modifier::BOLD),
        )),
    ];
    let block = Block::default().title(" Summary ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Yearly savings table.
fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("Year"),
        Cell::from(format!("Savings ({})", app.currency)),
        Cell::from(format!("Cumulative ({})", app.currency)),
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .result
        .yearly
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.year.to_string()),
                Cell::from(format!("{:.2}", round2(r.savings))),
                Cell::from(format!("{:.2}", round2(r.cumulative))),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(14),
            Constraint::Min(16),
        ],
    )
    .header(header)
    .block(Block::default().title(" Per Year ").borders(Borders::ALL));
    frame.render_widget(table, area);
}

/// Footer with the latest advisory, or keybinding hints.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Some(status) => Line::from(Span::styled(
            format!(" ! {status}"),
            Style::default().fg(style::ACCENT),
        )),
        None if app.editing.is_some() => Line::from(Span::styled(
            " Enter:Apply  Esc:Cancel  Backspace:Delete",
            Style::default().fg(style::FOOTER_FG),
        )),
        None => Line::from(Span::styled(
            " q:Quit  ↑/↓:Select  Enter:Edit  1/2/3:Preset  r:Reset",
            Style::default().fg(style::FOOTER_FG),
        )),
    };
    frame.render_widget(Paragraph::new(line), area);
}
