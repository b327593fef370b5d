// ============================================================================
// Structures : HistoryWindow / RateHistory
// ============================================================================
// Historique des taux d'une paire, utilisé par la vue graphique
//
// CONCEPTS RUST :
// 1. Enum Copy : fenêtre d'historique cyclable avec next()/previous()
// 2. NaiveDate : date sans fuseau (le serveur renvoie "YYYY-MM-DD")
// 3. Iterator::fold : min/max en un seul passage
// ============================================================================

use chrono::NaiveDate;

use crate::models::conversion::CurrencyPair;

/// Le serveur plafonne l'historique à 30 jours
pub const MAX_HISTORY_DAYS: u32 = 30;

/// Fenêtre d'historique affichée dans la vue graphique
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryWindow {
    /// 7 jours (valeur par défaut du serveur)
    #[default]
    OneWeek,
    /// 14 jours
    TwoWeeks,
    /// 30 jours (maximum accepté)
    OneMonth,
}

impl HistoryWindow {
    pub fn days(&self) -> u32 {
        match self {
            HistoryWindow::OneWeek => 7,
            HistoryWindow::TwoWeeks => 14,
            HistoryWindow::OneMonth => MAX_HISTORY_DAYS,
        }
    }

    /// Fenêtre la plus proche pour un nombre de jours configuré
    pub fn from_days(days: u32) -> Self {
        match days {
            0..=7 => HistoryWindow::OneWeek,
            8..=14 => HistoryWindow::TwoWeeks,
            _ => HistoryWindow::OneMonth,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryWindow::OneWeek => "7D",
            HistoryWindow::TwoWeeks => "14D",
            HistoryWindow::OneMonth => "30D",
        }
    }

    /// Cycle : 7D → 14D → 30D → 7D
    pub fn next(&self) -> Self {
        match self {
            HistoryWindow::OneWeek => HistoryWindow::TwoWeeks,
            HistoryWindow::TwoWeeks => HistoryWindow::OneMonth,
            HistoryWindow::OneMonth => HistoryWindow::OneWeek,
        }
    }

    /// Cycle inverse : 30D → 14D → 7D → 30D
    pub fn previous(&self) -> Self {
        match self {
            HistoryWindow::OneWeek => HistoryWindow::OneMonth,
            HistoryWindow::TwoWeeks => HistoryWindow::OneWeek,
            HistoryWindow::OneMonth => HistoryWindow::TwoWeeks,
        }
    }
}

/// Un point de l'historique : taux de clôture d'une journée
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub rate: f64,
}

/// Historique d'une paire, trié par date croissante
#[derive(Debug, Clone, PartialEq)]
pub struct RateHistory {
    pub pair: CurrencyPair,
    pub points: Vec<HistoryPoint>,
}

impl RateHistory {
    /// Construit l'historique en triant les points par date
    ///
    /// Le serveur renvoie le jour le plus récent en premier.
    pub fn new(pair: CurrencyPair, mut points: Vec<HistoryPoint>) -> Self {
        points.sort_by_key(|p| p.date);
        Self { pair, points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn latest(&self) -> Option<&HistoryPoint> {
        self.points.last()
    }

    /// (min, max) des taux, None si vide
    pub fn bounds(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().fold((f64::MAX, f64::MIN), |(min, max), p| {
            (min.min(p.rate), max.max(p.rate))
        }))
    }

    /// Variation en % entre le premier et le dernier point
    pub fn change_percent(&self) -> Option<f64> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if first.rate == 0.0 {
            return None;
        }
        Some((last.rate - first.rate) / first.rate * 100.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
