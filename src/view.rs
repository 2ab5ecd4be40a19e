//! Renderização: TUI (ratatui) e texto simples para o modo headless.

use crate::stats::Stats;
use crate::types::LocationRecord;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use std::fmt::Write;
use std::time::Duration;

pub const TRIGGER_LABEL: &str = "Get Last Location";

const HEADERS: [&str; 4] = ["Timestamp", "Street", "City", "Execution Time (ms)"];

/// Tudo que a tela precisa; derivado do estado do tracker a cada quadro.
pub struct ViewModel<'a> {
    pub results: &'a [LocationRecord],
    pub stats: Stats,
    /// Tempo decorrido da busca em andamento, `None` quando ociosa.
    pub loading: Option<Duration>,
}

/// Desenha o quadro completo.
pub fn render(frame: &mut Frame, view: &ViewModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(trigger(view.loading), chunks[0]);
    frame.render_widget(results_table(view.results), chunks[1]);
    frame.render_widget(stats_panel(&view.stats), chunks[2]);
    render_help(frame, chunks[3]);
}

fn trigger<'a>(loading: Option<Duration>) -> Paragraph<'a> {
    let (label, style) = match loading {
        Some(elapsed) => (
            format!("{} (loading... {} ms)", TRIGGER_LABEL, elapsed.as_millis()),
            Style::default().fg(Color::DarkGray),
        ),
        None => (
            TRIGGER_LABEL.to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
    };

    Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(style))
}

fn results_table<'a>(results: &'a [LocationRecord]) -> Table<'a> {
    let rows: Vec<Row> = results
        .iter()
        .map(|r| {
            Row::new(vec![
                Cell::from(r.timestamp.to_string()),
                Cell::from(r.address.street.as_str()),
                Cell::from(r.address.city.as_str()),
                Cell::from(r.execution_time.to_string()),
            ])
        })
        .collect();

    let header = Row::new(HEADERS.to_vec()).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    Table::new(
        rows,
        [
            Constraint::Length(15),
            Constraint::Min(16),
            Constraint::Min(16),
            Constraint::Length(19),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Results ({}) ", results.len())),
    )
}

fn stats_panel<'a>(stats: &Stats) -> Paragraph<'a> {
    let lines: Vec<Line> = stats_lines(stats).into_iter().map(Line::from).collect();
    Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Stats "))
}

fn render_help(frame: &mut Frame, area: Rect) {
    let text = Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::from(" fetch  "),
        Span::styled("Q", Style::default().fg(Color::Green)),
        Span::from(" quit"),
    ]);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

/// Linhas "Fastest/Slowest/Average", compartilhadas entre TUI e texto.
///
/// A média sai sem arredondamento (`650`, `583.3333333333334`).
pub fn stats_lines(stats: &Stats) -> [String; 3] {
    [
        format!("Fastest: {} ms", stats.fastest),
        format!("Slowest: {} ms", stats.slowest),
        format!("Average: {} ms", stats.average),
    ]
}

/// Tabela e estatísticas em texto puro.
pub fn render_text(results: &[LocationRecord], stats: &Stats) -> String {
    let cells: Vec<[String; 4]> = results
        .iter()
        .map(|r| {
            [
                r.timestamp.to_string(),
                r.address.street.clone(),
                r.address.city.clone(),
                r.execution_time.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS.map(str::to_string);
    for row in std::iter::once(&header).chain(cells.iter()) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    }

    out.push('\n');
    for line in stats_lines(stats) {
        let _ = writeln!(out, "{}", line);
    }
    out
}
