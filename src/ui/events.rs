// ============================================================================
// Gestion des événements
// ============================================================================
// Lecture du clavier (crossterm) + correspondance touches → actions
//
// CONCEPTS RUST :
// 1. Enums avec données : Event::Key(KeyEvent)
// 2. Non-blocking I/O : poll avec timeout, Tick si rien ne se passe
// 3. Fonctions prédicats : une fonction par raccourci, testable seule
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier : permet de vider le channel des résultats
    Tick,

    /// Erreur survenue
    Error,
}

/// Gestionnaire d'événements (sans état)
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Lit le prochain événement, Tick après 100ms sans activité
    ///
    /// Le timeout est court : les réponses réseau arrivent entre deux
    /// événements et doivent s'afficher sans attendre une touche.
    pub fn next(&self) -> Result<Event> {
        if !event::poll(Duration::from_millis(100))? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            // Sur certains OS on reçoit Press ET Release : on ne garde que Press
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),
            // Resize, souris, Release : un redraw suffit
            _ => Ok(Event::Tick),
        }
    }
}

// ============================================================================
// Correspondance touches → actions
// ============================================================================

fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        _ => None,
    }
}

/// Vrai si l'événement est un des caractères donnés (casse ignorée)
fn is_char_in(event: &Event, chars: &[char]) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Char(c)) if chars.iter().any(|x| x.eq_ignore_ascii_case(&c))
    )
}

/// 'q' : quitter (deux pressions)
pub fn is_quit_event(event: &Event) -> bool {
    is_char_in(event, &['q'])
}

pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

/// Entrée : soumettre le formulaire / valider
pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

/// Flèche haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Up)) || is_char_in(event, &['k'])
}

/// Flèche bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Down)) || is_char_in(event, &['j'])
}

/// 'e' ou 'i' : éditer le montant
pub fn is_edit_amount_event(event: &Event) -> bool {
    is_char_in(event, &['e', 'i'])
}

/// 'f' : sélecteur de la devise source
pub fn is_pick_from_event(event: &Event) -> bool {
    is_char_in(event, &['f'])
}

/// 't' : sélecteur de la devise cible
pub fn is_pick_to_event(event: &Event) -> bool {
    is_char_in(event, &['t'])
}

/// 'b' : sélecteur de la base des taux populaires
pub fn is_pick_base_event(event: &Event) -> bool {
    is_char_in(event, &['b'])
}

/// 'x' : inverser les devises
pub fn is_swap_event(event: &Event) -> bool {
    is_char_in(event, &['x'])
}

/// 'v' : sauvegarder la paire en favori
pub fn is_save_favorite_event(event: &Event) -> bool {
    is_char_in(event, &['v'])
}

/// 'o' : appliquer le favori sélectionné
pub fn is_apply_favorite_event(event: &Event) -> bool {
    is_char_in(event, &['o'])
}

/// 'd' : supprimer le favori sélectionné (deux pressions)
pub fn is_delete_event(event: &Event) -> bool {
    is_char_in(event, &['d'])
}

/// 'c' : vue graphique
pub fn is_chart_event(event: &Event) -> bool {
    is_char_in(event, &['c'])
}

/// 'm' : basculer le thème
pub fn is_theme_event(event: &Event) -> bool {
    is_char_in(event, &['m'])
}

/// 'r' : recharger les taux populaires
pub fn is_reload_event(event: &Event) -> bool {
    is_char_in(event, &['r'])
}

/// 'l' : fenêtre d'historique suivante
pub fn is_next_window_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Right)) || is_char_in(event, &['l'])
}

/// 'h' : fenêtre d'historique précédente
pub fn is_previous_window_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Left)) || is_char_in(event, &['h'])
}

pub fn is_backspace_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Backspace))
}

/// Caractère acceptable dans un montant : chiffres, point, signe, exposant
///
/// Le filtrage reste large : la validation du montant se fait à la
/// soumission, pas à la frappe.
pub fn get_amount_char_from_event(event: &Event) -> Option<char> {
    match key_code(event)? {
        KeyCode::Char(c) if c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E') => Some(c),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(is_quit_event(&key(KeyCode::Char('Q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_navigation_accepts_arrows_and_vim_keys() {
        assert!(is_up_event(&key(KeyCode::Up)));
        assert!(is_up_event(&key(KeyCode::Char('k'))));
        assert!(is_down_event(&key(KeyCode::Char('J'))));
        assert!(is_next_window_event(&key(KeyCode::Right)));
        assert!(!is_previous_window_event(&key(KeyCode::Char('l'))));
    }

    #[test]
    fn test_amount_chars() {
        assert_eq!(get_amount_char_from_event(&key(KeyCode::Char('7'))), Some('7'));
        assert_eq!(get_amount_char_from_event(&key(KeyCode::Char('.'))), Some('.'));
        assert_eq!(get_amount_char_from_event(&key(KeyCode::Char('z'))), None);
        assert_eq!(get_amount_char_from_event(&key(KeyCode::Enter)), None);
    }
}
