// ============================================================================
// Picker : sélecteur de devise en surimpression
// ============================================================================
// CONCEPTS RATATUI :
// 1. Clear : efface la zone avant de dessiner par-dessus la page
// 2. List + ListState : liste avec sélection et défilement automatique
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    widgets::{Block, Borders, Clear, List, ListItem, ListState},
    Frame,
};

use crate::app::{App, SelectTarget};
use crate::ui::palette::Palette;

/// Dessine la liste des devises pour le sélecteur visé
pub fn render_picker(frame: &mut Frame, app: &App, target: SelectTarget) {
    let palette = Palette::for_theme(app.theme());
    let area = centered_rect(50, 70, frame.size());

    let select = match target {
        SelectTarget::From => &app.from_select,
        SelectTarget::To => &app.to_select,
        SelectTarget::Base => &app.base_select,
    };

    let items: Vec<ListItem> = select
        .options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let marker = if index == select.selected { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, option.label))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border_style())
                .style(palette.base())
                .title(format!(" {} [Enter] Select  [ESC] Cancel ", target.title())),
        )
        .highlight_style(palette.title_style().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    state.select(Some(app.picker_index));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

/// Rectangle centré, en pourcentage de la zone
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
