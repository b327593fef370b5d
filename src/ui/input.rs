// ============================================================================
// Routage clavier : événement -> opérations de App
// ============================================================================
// Vit dans la bibliothèque (et non dans main.rs) pour être testable sans
// terminal : les tests construisent des Event::Key à la main.
// ============================================================================

use tracing::{debug, info};

use crate::app::{App, SelectTarget};
use crate::ui::events::Event;
use crate::worker::AppCommand;

// CONCEPT RUST : Pattern matching avec guards
// - L'écran courant décide de ce que fait une touche
// - Les modes (saisie, picker) sont testés AVANT les raccourcis globaux

/// Traite un événement ; retourne les commandes à envoyer au worker
pub fn handle_event(app: &mut App, event: Event) -> Vec<AppCommand> {
    use crate::ui::events::{
        get_amount_char_from_event, is_apply_favorite_event, is_backspace_event, is_chart_event,
        is_delete_event, is_down_event, is_edit_amount_event, is_enter_event, is_escape_event,
        is_next_window_event, is_pick_base_event, is_pick_from_event, is_pick_to_event,
        is_previous_window_event, is_quit_event, is_reload_event, is_save_favorite_event,
        is_swap_event, is_theme_event, is_up_event,
    };

    if !matches!(event, Event::Key(_)) {
        return Vec::new();
    }

    // ========================================
    // Saisie du montant
    // ========================================
    if app.is_in_input_mode() {
        if is_escape_event(&event) {
            debug!("User cancelled amount input");
            app.cancel_input();
        } else if is_enter_event(&event) {
            return app.submit_amount_input().into_iter().collect();
        } else if is_backspace_event(&event) {
            app.backspace();
        } else if let Some(c) = get_amount_char_from_event(&event) {
            app.append_char(c);
        }
        return Vec::new();
    }

    // ========================================
    // Picker ouvert
    // ========================================
    if app.picker_target().is_some() {
        if is_escape_event(&event) {
            app.cancel_picker();
        } else if is_enter_event(&event) {
            return app.confirm_picker().into_iter().collect();
        } else if is_up_event(&event) {
            app.picker_up();
        } else if is_down_event(&event) {
            app.picker_down();
        }
        return Vec::new();
    }

    // 'q' : quit confirmation two-step, depuis n'importe quel écran
    if is_quit_event(&event) {
        app.cancel_delete();
        if app.is_awaiting_quit_confirmation() {
            info!("User confirmed quit");
            app.quit();
        } else {
            info!("User requested quit (awaiting confirmation)");
            app.request_quit();
        }
        return Vec::new();
    }

    // 'd' : suppression two-step du favori sélectionné
    if is_delete_event(&event) && app.is_on_converter() {
        app.cancel_quit();
        if app.selected_favorite().is_some() {
            if app.is_awaiting_delete_confirmation() {
                info!("User confirmed favorite removal");
                app.remove_selected_favorite();
            } else {
                app.request_delete();
            }
        }
        return Vec::new();
    }

    // Toute autre touche annule les confirmations en attente
    app.cancel_quit();
    app.cancel_delete();

    // ========================================
    // Vue graphique
    // ========================================
    if app.is_on_chart() {
        if is_escape_event(&event) || is_chart_event(&event) {
            app.show_converter();
        } else if is_next_window_event(&event) {
            let command = app.next_history_window();
            info!(window = %app.chart_window.label(), "History window changed");
            return vec![command];
        } else if is_previous_window_event(&event) {
            let command = app.previous_history_window();
            info!(window = %app.chart_window.label(), "History window changed");
            return vec![command];
        } else if is_theme_event(&event) {
            app.toggle_theme();
        }
        return Vec::new();
    }

    // ========================================
    // Page de conversion
    // ========================================
    if is_enter_event(&event) {
        app.submit_conversion().into_iter().collect()
    } else if is_edit_amount_event(&event) {
        app.start_amount_input();
        Vec::new()
    } else if is_pick_from_event(&event) {
        app.open_picker(SelectTarget::From);
        Vec::new()
    } else if is_pick_to_event(&event) {
        app.open_picker(SelectTarget::To);
        Vec::new()
    } else if is_pick_base_event(&event) {
        app.open_picker(SelectTarget::Base);
        Vec::new()
    } else if is_swap_event(&event) {
        vec![app.swap_currencies()]
    } else if is_save_favorite_event(&event) {
        app.save_current_as_favorite();
        Vec::new()
    } else if is_apply_favorite_event(&event) {
        app.apply_selected_favorite().into_iter().collect()
    } else if is_up_event(&event) {
        app.navigate_favorites_up();
        Vec::new()
    } else if is_down_event(&event) {
        app.navigate_favorites_down();
        Vec::new()
    } else if is_chart_event(&event) {
        app.show_chart();
        Vec::new()
    } else if is_theme_event(&event) {
        app.toggle_theme();
        Vec::new()
    } else if is_reload_event(&event) {
        vec![app.reload_rates()]
    } else if is_escape_event(&event) {
        app.error_message = None;
        Vec::new()
    } else {
        Vec::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
