// ============================================================================
// Chart - Historique du taux d'une paire
// ============================================================================
// Graphique ligne du taux sur 7, 14 ou 30 jours (/api/history)
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de points (x = index du jour, y = taux)
// 3. Axis : bornes + labels (dates aux extrémités)
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::{App, ChartPanel};
use crate::models::RateHistory;
use crate::ui::palette::Palette;

/// Dessine la vue graphique complète (header + graphique)
pub fn render_history_chart(frame: &mut Frame, app: &App, area: Rect) {
    let palette = Palette::for_theme(app.theme());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area)
        .to_vec();

    render_chart_header(frame, app, &palette, chunks[0]);

    match &app.chart_panel {
        ChartPanel::Loading => render_message(frame, &palette, chunks[1], "Loading history...", false),
        ChartPanel::Failed(message) => render_message(frame, &palette, chunks[1], message, true),
        ChartPanel::Ready(history) if history.is_empty() => render_message(
            frame,
            &palette,
            chunks[1],
            "No historical data available",
            false,
        ),
        ChartPanel::Ready(history) => render_chart_graph(frame, app, history, &palette, chunks[1]),
    }
}

/// Header : paire, fenêtre, variation sur la période
fn render_chart_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.base())
        .title(format!(" 📈 {} ", app.chart_pair.label()));

    let mut spans = vec![
        Span::raw("Window: "),
        Span::styled(app.chart_window.label(), palette.title_style()),
    ];

    if let ChartPanel::Ready(history) = &app.chart_panel {
        if let (Some(latest), Some(change)) = (history.latest(), history.change_percent()) {
            let color = if change >= 0.0 { palette.positive } else { palette.negative };
            let arrow = if change >= 0.0 { "▲" } else { "▼" };
            spans.push(Span::raw("  Last: "));
            spans.push(Span::styled(
                format!("{:.4}", latest.rate),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!("  {} {:+.2}%", arrow, change),
                Style::default().fg(color),
            ));
        }
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled("[h/l]", palette.key_style()));
    spans.push(Span::raw(" Window  "));
    spans.push(Span::styled("[ESC]", palette.key_style()));
    spans.push(Span::raw(" Back"));

    let paragraph = Paragraph::new(Line::from(spans))
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Dessine le graphique ligne
fn render_chart_graph(
    frame: &mut Frame,
    app: &App,
    history: &RateHistory,
    palette: &Palette,
    area: Rect,
) {
    let points: Vec<(f64, f64)> = history
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.rate))
        .collect();

    let Some((min_rate, max_rate)) = history.bounds() else {
        return;
    };

    // Marge de 5% ; taux constant = bande artificielle autour de la valeur
    let spread = max_rate - min_rate;
    let margin = if spread > 0.0 { spread * 0.05 } else { max_rate.abs() * 0.01 + 0.0001 };
    let y_min = (min_rate - margin).max(0.0);
    let y_max = max_rate + margin;

    let color = match history.change_percent() {
        Some(change) if change < 0.0 => palette.negative,
        _ => palette.positive,
    };

    let name = history.pair.label();
    let datasets = vec![Dataset::default()
        .name(name.as_str())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&points)];

    let first_date = history.points.first().map(|p| p.date.format("%m-%d").to_string());
    let last_date = history.latest().map(|p| p.date.format("%m-%d").to_string());

    let x_axis = Axis::default()
        .style(palette.muted_style())
        .bounds([0.0, (points.len().max(2) - 1) as f64])
        .labels(vec![
            Span::raw(first_date.unwrap_or_default()),
            Span::raw(last_date.unwrap_or_default()),
        ]);

    let y_axis = Axis::default()
        .title(history.pair.to.as_str())
        .style(palette.muted_style())
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.4}", y_min)),
            Span::raw(format!("{:.4}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.4}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border_style())
                .style(palette.base())
                .title(format!(" {} - {} days ", name, app.chart_window.days())),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Message à la place du graphique (chargement, vide, erreur)
fn render_message(frame: &mut Frame, palette: &Palette, area: Rect, message: &str, is_error: bool) {
    let (title, style) = if is_error {
        (" ⚠ Error ", palette.error_style())
    } else {
        (" History ", palette.muted_style())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.base())
        .title(title);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message.to_string(), style)),
        Line::from(""),
        Line::from(Span::styled("[ESC] Back", palette.muted_style())),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
