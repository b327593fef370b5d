// ============================================================================
// Dashboard - Rendu de la page de conversion
// ============================================================================
// Dessine la page : formulaire, résultat, taux populaires, favoris
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage en zones (header / contenu / footer, puis colonnes)
// 3. Widgets : Block, Paragraph, List
// 4. Style : couleurs fournies par la Palette du thème actif
//
// Le rendu est une fonction pure de &App : aucune modification d'état ici.
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{App, RatesPanel, Screen};
use crate::models::rates::RATES_UNAVAILABLE_MESSAGE;
use crate::ui::{chart, palette::Palette, picker};

/// Message quand la liste des favoris est vide
pub const NO_FAVORITES_MESSAGE: &str = "No favorites saved.";

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le picker se dessine PAR-DESSUS la page
/// - La vue graphique remplace la page
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Converter | Screen::AmountInput => render_page(frame, app),
        Screen::Picker(target) => {
            render_page(frame, app);
            picker::render_picker(frame, app, target);
        }
        Screen::ChartView => chart::render_history_chart(frame, app, frame.size()),
    }
}

/// Dessine la page principale
fn render_page(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme());
    let chunks = create_layout(frame.size());

    render_header(frame, app, &palette, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(5)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(3)])
        .split(columns[1]);

    render_converter_form(frame, app, &palette, left[0]);
    render_result_panel(frame, app, &palette, left[1]);
    render_rates_panel(frame, app, &palette, right[0]);
    render_favorites(frame, app, &palette, right[1]);

    render_footer(frame, app, &palette, chunks[2]);
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Contenu
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : titre + libellé du bouton de thème
// ============================================================================

fn render_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.base())
        .title(" LazyFX ")
        .title_alignment(Alignment::Center);

    let line = Line::from(vec![
        Span::styled("Currency Converter", palette.title_style()),
        Span::raw("    "),
        Span::styled("[m] ", palette.key_style()),
        Span::raw(app.theme().toggle_label()),
    ]);

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Formulaire de conversion
// ============================================================================

fn render_converter_form(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let editing = app.is_in_input_mode();

    let border_style = if editing {
        Style::default().fg(palette.positive)
    } else {
        palette.border_style()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(palette.base())
        .title(" Convert ");

    let amount_line = if editing {
        Line::from(vec![
            Span::styled("Amount: ", palette.title_style()),
            Span::raw(app.input_buffer.clone()),
            Span::styled("█", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else {
        Line::from(vec![
            Span::styled("Amount: ", palette.title_style()),
            Span::raw(app.amount_input.clone()),
        ])
    };

    let mut text = vec![
        amount_line,
        Line::from(vec![
            Span::styled("From:   ", palette.title_style()),
            Span::raw(selected_label(&app.from_select)),
        ]),
        Line::from(vec![
            Span::styled("To:     ", palette.title_style()),
            Span::raw(selected_label(&app.to_select)),
        ]),
    ];

    if app.converting {
        text.push(Line::from(Span::styled("Converting...", palette.muted_style())));
    }

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn selected_label(select: &crate::app::CurrencySelect) -> String {
    select
        .options
        .get(select.selected)
        .map(|o| o.label.clone())
        .unwrap_or_default()
}

// ============================================================================
// Panneau résultat / erreur
// ============================================================================
// Un seul des deux est visible : l'erreur masque le résultat.
// ============================================================================

fn render_result_panel(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.base());

    let (block, text) = if let Some(message) = &app.error_message {
        (
            block.title(" ⚠ Error ").border_style(palette.error_style()),
            vec![Line::from(Span::styled(message.clone(), palette.error_style()))],
        )
    } else if let Some(display) = &app.result {
        (
            block.title(" Result "),
            vec![
                Line::from(Span::styled(
                    display.result_line.clone(),
                    Style::default().fg(palette.positive).add_modifier(Modifier::BOLD),
                )),
                Line::from(display.rate_line.clone()),
                Line::from(Span::styled(display.updated_line.clone(), palette.muted_style())),
            ],
        )
    } else {
        (
            block.title(" Result "),
            vec![Line::from(Span::styled(
                "Press [Enter] to convert",
                palette.muted_style(),
            ))],
        )
    };

    frame.render_widget(Paragraph::new(text).block(block), area);
}

// ============================================================================
// Taux populaires
// ============================================================================

fn render_rates_panel(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let base = app.base_currency();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.base())
        .title(format!(" Base: {} ", base));

    match &app.rates_panel {
        RatesPanel::Loading => {
            let paragraph = Paragraph::new(Span::styled("Loading rates...", palette.muted_style()))
                .block(block);
            frame.render_widget(paragraph, area);
        }
        RatesPanel::Unavailable => {
            let paragraph = Paragraph::new(Span::styled(RATES_UNAVAILABLE_MESSAGE, palette.error_style()))
                .block(block);
            frame.render_widget(paragraph, area);
        }
        RatesPanel::Cards(cards) => {
            let items: Vec<ListItem> = cards
                .iter()
                .map(|card| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!(" {:<4}", card.currency.code), palette.title_style()),
                        Span::styled(
                            format!("{:>12}", card.headline()),
                            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                        ),
                        Span::raw("  "),
                        Span::styled(card.detail(base), palette.muted_style()),
                    ]))
                })
                .collect();

            frame.render_widget(List::new(items).block(block), area);
        }
    }
}

// ============================================================================
// Favoris
// ============================================================================

fn render_favorites(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.base())
        .title(" ★ Favorites ");

    if app.favorites.is_empty() {
        let paragraph = Paragraph::new(Span::styled(NO_FAVORITES_MESSAGE, palette.muted_style()))
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .favorites
        .iter()
        .enumerate()
        .map(|(index, favorite)| {
            let item = ListItem::new(format!(" {}", favorite.display()));
            if index == app.selected_favorite {
                item.style(palette.title_style().add_modifier(Modifier::REVERSED))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

// ============================================================================
// Footer : raccourcis ou confirmations
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_style())
        .style(palette.base());

    let warning = Style::default().fg(palette.key).add_modifier(Modifier::BOLD);
    let blinking = palette.error_style().add_modifier(Modifier::SLOW_BLINK);

    let line = if app.is_in_input_mode() {
        Line::from(vec![
            Span::styled("[Enter]", palette.key_style()),
            Span::raw(" Convert  "),
            Span::styled("[ESC]", palette.key_style()),
            Span::raw(" Cancel"),
        ])
    } else if app.is_awaiting_delete_confirmation() {
        let label = app
            .selected_favorite()
            .map(|f| f.display())
            .unwrap_or_else(|| "?".to_string());
        Line::from(vec![
            Span::styled("⚠  Press ", warning),
            Span::styled("[d]", blinking),
            Span::styled(format!(" again to remove {}, any other key to cancel ⚠", label), warning),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Press ", warning),
            Span::styled("[q]", blinking),
            Span::styled(" again to quit, any other key to cancel ⚠", warning),
        ])
    } else {
        let mut spans = Vec::new();
        for (key, label) in [
            ("[Enter]", " Convert  "),
            ("[e]", " Amount  "),
            ("[f/t]", " From/To  "),
            ("[x]", " Swap  "),
            ("[b]", " Base  "),
            ("[v]", " Save  "),
            ("[j/k o d]", " Favorites  "),
            ("[c]", " Chart  "),
            ("[q]", " Quit"),
        ] {
            spans.push(Span::styled(key, palette.key_style()));
            spans.push(Span::raw(label));
        }
        Line::from(spans)
    };

    let paragraph = Paragraph::new(line).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests de rendu (TestBackend)
// ============================================================================
