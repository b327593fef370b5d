// ============================================================================
// Palette : couleurs dérivées du thème actif
// ============================================================================
// Le thème (clair / sombre) choisit une palette ; tout le rendu lit ses
// couleurs ici plutôt que d'écrire Color::X en dur.
// ============================================================================

use ratatui::style::{Color, Modifier, Style};

use crate::models::Theme;

/// Couleurs d'un thème
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub key: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::White,
                text: Color::Black,
                muted: Color::DarkGray,
                border: Color::Blue,
                accent: Color::Blue,
                positive: Color::Green,
                negative: Color::Red,
                key: Color::Magenta,
            },
            Theme::Dark => Self {
                background: Color::Black,
                text: Color::White,
                muted: Color::Gray,
                border: Color::Cyan,
                accent: Color::Cyan,
                positive: Color::LightGreen,
                negative: Color::LightRed,
                key: Color::Yellow,
            },
        }
    }

    /// Style de base : texte sur fond
    pub fn base(&self) -> Style {
        Style::default().fg(self.text).bg(self.background)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn title_style(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style des raccourcis clavier dans le footer
    pub fn key_style(&self) -> Style {
        Style::default().fg(self.key).add_modifier(Modifier::BOLD)
    }

    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.negative).add_modifier(Modifier::BOLD)
    }
}
