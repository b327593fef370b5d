// ============================================================================
// Structure : App
// ============================================================================
// État complet de la page de conversion + toutes ses opérations
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Effets explicites : les opérations qui ont besoin du réseau ne
//    l'appellent pas, elles RETOURNENT des AppCommand. La boucle principale
//    les envoie au worker, les tests les inspectent directement.
// 3. Jetons de requête : seule la réponse à la dernière requête émise
//    d'un type donné est appliquée
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App (rendu pur sur &App)
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::error::FxError;
use crate::models::currency::{currency_index, CURRENCIES};
use crate::models::rates::build_rate_cards;
use crate::models::{
    ConversionDisplay, ConversionRequest, CurrencyPair, Favorite, HistoryWindow, RateCard,
    RateHistory, Theme,
};
use crate::storage::{FavoritesStore, MemoryStore};
use crate::worker::{AppCommand, AppResult, RequestToken};

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Page principale : formulaire, taux populaires, favoris
    Converter,

    /// Sélecteur de devise ouvert par-dessus la page
    Picker(SelectTarget),

    /// Saisie du montant (Vim-like : Enter valide, ESC annule)
    AmountInput,

    /// Vue graphique de l'historique de la paire
    ChartView,
}

/// Sélecteur visé par le picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectTarget {
    From,
    To,
    Base,
}

impl SelectTarget {
    pub fn title(&self) -> &'static str {
        match self {
            SelectTarget::From => "From",
            SelectTarget::To => "To",
            SelectTarget::Base => "Base currency",
        }
    }
}

// ============================================================================
// Sélecteur de devise
// ============================================================================

/// Une option d'un sélecteur : valeur = code, libellé = "USD - US Dollar"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: String,
}

/// Widget de sélection d'une devise, peuplé depuis la table statique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencySelect {
    pub options: Vec<SelectOption>,
    pub selected: usize,
}

impl CurrencySelect {
    /// Une option par devise, dans l'ordre de la table
    pub fn populate(initial: &str) -> Self {
        let options = CURRENCIES
            .iter()
            .map(|c| SelectOption {
                value: c.code,
                label: c.option_label(),
            })
            .collect();

        Self {
            options,
            selected: currency_index(initial).unwrap_or(0),
        }
    }

    /// Code de la devise sélectionnée
    pub fn value(&self) -> &'static str {
        self.options
            .get(self.selected)
            .map(|o| o.value)
            .unwrap_or(CURRENCIES[0].code)
    }

    /// Sélectionne une devise par son code ; false si code inconnu
    pub fn select(&mut self, code: &str) -> bool {
        match self.options.iter().position(|o| o.value == code) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Panneaux
// ============================================================================

/// État du panneau des taux populaires
#[derive(Debug, Clone, PartialEq)]
pub enum RatesPanel {
    Loading,
    Cards(Vec<RateCard>),
    /// Échec total : un seul avertissement, aucune carte
    Unavailable,
}

/// État de la vue graphique
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPanel {
    Loading,
    Ready(RateHistory),
    Failed(String),
}

/// Jetons des requêtes en cours, par type
#[derive(Debug, Default, Clone)]
struct RequestTracker {
    conversion: RequestToken,
    rates: RequestToken,
    history: RequestToken,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Two-step quit : première pression de 'q' = demande de confirmation
    pub confirm_quit: bool,

    /// Two-step delete : première pression de 'd' = demande de confirmation
    pub confirm_delete: bool,

    // --- Formulaire de conversion ---
    /// Montant tel que saisi
    pub amount_input: String,

    /// Buffer du mode saisie (copié dans amount_input à la validation)
    pub input_buffer: String,

    pub from_select: CurrencySelect,
    pub to_select: CurrencySelect,

    /// Conversion en cours (indicateur de chargement)
    pub converting: bool,

    /// Panneau de résultat ; None = panneau masqué
    pub result: Option<ConversionDisplay>,

    /// Panneau d'erreur ; None = panneau masqué
    pub error_message: Option<String>,

    // --- Taux populaires ---
    pub base_select: CurrencySelect,
    pub rates_panel: RatesPanel,

    // --- Favoris ---
    pub favorites: Vec<Favorite>,
    pub selected_favorite: usize,
    favorites_store: FavoritesStore,

    // --- Thème ---
    /// Feuille de style active : le thème s'en déduit
    pub active_stylesheet: &'static str,

    // --- Graphique ---
    pub chart_pair: CurrencyPair,
    pub chart_window: HistoryWindow,
    pub chart_panel: ChartPanel,

    /// Index surligné dans le picker ouvert
    pub picker_index: usize,

    requests: RequestTracker,
}

impl App {
    /// Crée l'application avec les valeurs initiales de la configuration
    pub fn new(settings: &Settings, favorites_store: FavoritesStore) -> Self {
        let from_select = CurrencySelect::populate(&settings.default_from);
        let to_select = CurrencySelect::populate(&settings.default_to);
        let chart_pair = CurrencyPair::new(from_select.value(), to_select.value());

        Self {
            running: true,
            current_screen: Screen::Converter,
            confirm_quit: false,
            confirm_delete: false,
            amount_input: "1".to_string(),
            input_buffer: String::new(),
            from_select,
            to_select,
            converting: false,
            result: None,
            error_message: None,
            base_select: CurrencySelect::populate(&settings.default_base),
            rates_panel: RatesPanel::Loading,
            favorites: Vec::new(),
            selected_favorite: 0,
            favorites_store,
            active_stylesheet: settings.theme.stylesheet(),
            chart_pair,
            chart_window: settings.history_window(),
            chart_panel: ChartPanel::Loading,
            picker_index: 0,
            requests: RequestTracker::default(),
        }
    }

    /// Initialisation de la page : favoris, taux de la base, graphique
    pub fn start(&mut self) -> Vec<AppCommand> {
        info!(
            from = %self.from_select.value(),
            to = %self.to_select.value(),
            base = %self.base_select.value(),
            "Initializing conversion page"
        );
        self.reload_favorites();
        vec![self.reload_rates(), self.refresh_chart()]
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Paire actuellement sélectionnée dans le formulaire
    pub fn current_pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from_select.value(), self.to_select.value())
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Soumission du formulaire
    ///
    /// Retourne None (aucun appel réseau) si le montant est invalide.
    pub fn submit_conversion(&mut self) -> Option<AppCommand> {
        self.error_message = None;

        let request = match ConversionRequest::from_form(&self.amount_input, self.current_pair()) {
            Ok(request) => request,
            Err(e) => {
                debug!(amount = %self.amount_input, "Rejected conversion input");
                // Le rejet remplace toute conversion encore en vol
                self.requests.conversion += 1;
                self.converting = false;
                self.show_error(e.to_string());
                return None;
            }
        };

        self.requests.conversion += 1;
        self.converting = true;
        info!(
            token = self.requests.conversion,
            amount = request.amount,
            pair = %request.pair.label(),
            "Submitting conversion"
        );

        Some(AppCommand::Convert {
            token: self.requests.conversion,
            request,
        })
    }

    /// Affiche une erreur et masque le panneau de résultat
    fn show_error(&mut self, message: String) {
        self.error_message = Some(message);
        self.result = None;
    }

    // ========================================================================
    // Résultats du worker
    // ========================================================================

    /// Applique un résultat du worker
    ///
    /// Les réponses périmées (jeton plus ancien que la dernière requête du
    /// même type) sont ignorées. Peut retourner des commandes de suivi
    /// (une conversion réussie rafraîchit le graphique).
    pub fn apply_result(&mut self, result: AppResult) -> Vec<AppCommand> {
        match result {
            AppResult::Converted {
                token,
                request,
                outcome,
            } => {
                if token != self.requests.conversion {
                    debug!(token, latest = self.requests.conversion, "Dropping stale conversion response");
                    return Vec::new();
                }
                self.converting = false;

                match outcome {
                    Ok(result) => {
                        self.error_message = None;
                        self.result = Some(ConversionDisplay::new(&request, &result));
                        vec![self.refresh_chart_for(request.pair)]
                    }
                    Err(e) => {
                        error!(kind = e.kind(), error = %e, "Conversion failed");
                        self.show_error(format!("Conversion failed: {}", e));
                        Vec::new()
                    }
                }
            }

            AppResult::RatesLoaded {
                token,
                base,
                outcome,
            } => {
                if token != self.requests.rates {
                    debug!(token, base = %base, "Dropping stale rates response");
                    return Vec::new();
                }

                self.rates_panel = match outcome {
                    Ok(snapshot) => RatesPanel::Cards(build_rate_cards(&snapshot)),
                    Err(e) => {
                        error!(kind = e.kind(), error = %e, base = %base, "Failed to load popular rates");
                        RatesPanel::Unavailable
                    }
                };
                Vec::new()
            }

            AppResult::HistoryLoaded {
                token,
                pair,
                outcome,
            } => {
                if token != self.requests.history {
                    debug!(token, pair = %pair.label(), "Dropping stale history response");
                    return Vec::new();
                }

                self.chart_panel = match outcome {
                    Ok(history) => ChartPanel::Ready(history),
                    Err(e) => {
                        error!(kind = e.kind(), error = %e, pair = %pair.label(), "Failed to load history");
                        ChartPanel::Failed(history_error_message(&e))
                    }
                };
                Vec::new()
            }
        }
    }

    // ========================================================================
    // Sélecteurs
    // ========================================================================

    /// Inverse source et cible, puis rafraîchit le graphique (une fois)
    pub fn swap_currencies(&mut self) -> AppCommand {
        let pair = self.current_pair().swapped();
        self.from_select.select(&pair.from);
        self.to_select.select(&pair.to);
        debug!(pair = %pair.label(), "Currencies swapped");
        self.refresh_chart()
    }

    /// Change la devise d'un sélecteur
    ///
    /// From/To : rafraîchit le graphique. Base : recharge les taux.
    /// None si le code est inconnu ou inchangé.
    pub fn select_currency(&mut self, target: SelectTarget, code: &str) -> Option<AppCommand> {
        let select = match target {
            SelectTarget::From => &mut self.from_select,
            SelectTarget::To => &mut self.to_select,
            SelectTarget::Base => &mut self.base_select,
        };

        if select.value() == code {
            return None;
        }
        if !select.select(code) {
            warn!(code = %code, "Ignoring unknown currency selection");
            return None;
        }

        match target {
            SelectTarget::Base => Some(self.reload_rates()),
            SelectTarget::From | SelectTarget::To => Some(self.refresh_chart()),
        }
    }

    /// Recharge les taux populaires pour la base sélectionnée
    pub fn reload_rates(&mut self) -> AppCommand {
        self.requests.rates += 1;
        self.rates_panel = RatesPanel::Loading;
        AppCommand::LoadRates {
            token: self.requests.rates,
            base: self.base_select.value().to_string(),
        }
    }

    pub fn base_currency(&self) -> &'static str {
        self.base_select.value()
    }

    // ========================================================================
    // Graphique
    // ========================================================================

    /// Rafraîchit le graphique pour la paire sélectionnée
    pub fn refresh_chart(&mut self) -> AppCommand {
        self.refresh_chart_for(self.current_pair())
    }

    fn refresh_chart_for(&mut self, pair: CurrencyPair) -> AppCommand {
        self.requests.history += 1;
        self.chart_pair = pair.clone();
        self.chart_panel = ChartPanel::Loading;
        AppCommand::LoadHistory {
            token: self.requests.history,
            pair,
            days: self.chart_window.days(),
        }
    }

    pub fn next_history_window(&mut self) -> AppCommand {
        self.chart_window = self.chart_window.next();
        self.refresh_chart_for(self.chart_pair.clone())
    }

    pub fn previous_history_window(&mut self) -> AppCommand {
        self.chart_window = self.chart_window.previous();
        self.refresh_chart_for(self.chart_pair.clone())
    }

    pub fn show_chart(&mut self) {
        self.current_screen = Screen::ChartView;
    }

    pub fn show_converter(&mut self) {
        self.current_screen = Screen::Converter;
    }

    pub fn is_on_converter(&self) -> bool {
        self.current_screen == Screen::Converter
    }

    pub fn is_on_chart(&self) -> bool {
        self.current_screen == Screen::ChartView
    }

    // ========================================================================
    // Favoris
    // ========================================================================

    /// Relit les favoris depuis le stockage
    pub fn reload_favorites(&mut self) {
        self.favorites = self.favorites_store.load();
        self.clamp_favorite_selection();
    }

    /// Sauvegarde la paire courante en favori
    pub fn save_current_as_favorite(&mut self) {
        let pair = self.current_pair();
        match self.favorites_store.append(&pair) {
            Ok(_) => self.reload_favorites(),
            Err(e) => {
                error!(error = ?e, pair = %pair.label(), "Failed to save favorite");
                self.error_message = Some(format!("Unable to save favorite {}.", pair.label()));
            }
        }
    }

    pub fn selected_favorite(&self) -> Option<&Favorite> {
        self.favorites.get(self.selected_favorite)
    }

    /// Supprime le favori sélectionné (et ses doublons de même paire)
    pub fn remove_selected_favorite(&mut self) {
        self.confirm_delete = false;

        let Some(pair) = self.selected_favorite().map(Favorite::pair) else {
            return;
        };

        match self.favorites_store.remove(&pair) {
            Ok(_) => self.reload_favorites(),
            Err(e) => {
                error!(error = ?e, pair = %pair.label(), "Failed to remove favorite");
                self.error_message = Some(format!("Unable to remove favorite {}.", pair.label()));
            }
        }
    }

    /// Resélectionne la paire du favori choisi
    pub fn apply_selected_favorite(&mut self) -> Option<AppCommand> {
        let pair = self.selected_favorite()?.pair();
        if !self.from_select.select(&pair.from) || !self.to_select.select(&pair.to) {
            warn!(pair = %pair.label(), "Favorite references unknown currency");
            return None;
        }
        info!(pair = %pair.label(), "Favorite applied");
        Some(self.refresh_chart())
    }

    pub fn navigate_favorites_up(&mut self) {
        self.selected_favorite = self.selected_favorite.saturating_sub(1);
    }

    pub fn navigate_favorites_down(&mut self) {
        let max_index = self.favorites.len().saturating_sub(1);
        self.selected_favorite = (self.selected_favorite + 1).min(max_index);
    }

    fn clamp_favorite_selection(&mut self) {
        let max_index = self.favorites.len().saturating_sub(1);
        self.selected_favorite = self.selected_favorite.min(max_index);
    }

    // ========================================================================
    // Thème
    // ========================================================================

    pub fn theme(&self) -> Theme {
        Theme::from_stylesheet(self.active_stylesheet)
    }

    /// Bascule la feuille de style active
    pub fn toggle_theme(&mut self) {
        self.active_stylesheet = self.theme().toggled().stylesheet();
        debug!(stylesheet = %self.active_stylesheet, "Theme toggled");
    }

    // ========================================================================
    // Picker
    // ========================================================================

    fn select_for(&self, target: SelectTarget) -> &CurrencySelect {
        match target {
            SelectTarget::From => &self.from_select,
            SelectTarget::To => &self.to_select,
            SelectTarget::Base => &self.base_select,
        }
    }

    /// Ouvre le picker positionné sur la valeur courante
    pub fn open_picker(&mut self, target: SelectTarget) {
        self.picker_index = self.select_for(target).selected;
        self.current_screen = Screen::Picker(target);
    }

    pub fn picker_target(&self) -> Option<SelectTarget> {
        match self.current_screen {
            Screen::Picker(target) => Some(target),
            _ => None,
        }
    }

    pub fn picker_up(&mut self) {
        self.picker_index = self.picker_index.saturating_sub(1);
    }

    pub fn picker_down(&mut self) {
        self.picker_index = (self.picker_index + 1).min(CURRENCIES.len() - 1);
    }

    /// Valide le choix du picker et revient à la page
    pub fn confirm_picker(&mut self) -> Option<AppCommand> {
        let target = self.picker_target()?;
        self.current_screen = Screen::Converter;
        let code = CURRENCIES.get(self.picker_index)?.code;
        self.select_currency(target, code)
    }

    pub fn cancel_picker(&mut self) {
        self.current_screen = Screen::Converter;
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode saisie du montant, prérempli avec la valeur actuelle
    pub fn start_amount_input(&mut self) {
        self.input_buffer = self.amount_input.clone();
        self.current_screen = Screen::AmountInput;
    }

    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Converter;
        self.input_buffer.clear();
    }

    /// Valide la saisie et soumet le formulaire
    pub fn submit_amount_input(&mut self) -> Option<AppCommand> {
        self.amount_input = std::mem::take(&mut self.input_buffer);
        self.current_screen = Screen::Converter;
        self.submit_conversion()
    }

    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::AmountInput
    }

    // ========================================================================
    // Confirmations two-step
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn request_delete(&mut self) {
        self.confirm_delete = true;
    }

    pub fn cancel_delete(&mut self) {
        self.confirm_delete = false;
    }

    pub fn is_awaiting_delete_confirmation(&self) -> bool {
        self.confirm_delete
    }
}

/// Message affiché dans la vue graphique après un échec
fn history_error_message(error: &FxError) -> String {
    format!("Unable to load rate history: {}", error)
}

// ============================================================================
// Trait Default
// ============================================================================
// Convention Rust : si new() a des valeurs par défaut évidentes, implémenter
// Default. Ici : configuration par défaut + favoris en mémoire.
// ============================================================================

impl Default for App {
    fn default() -> Self {
        Self::new(
            &Settings::default(),
            FavoritesStore::new(Box::new(MemoryStore::new())),
        )
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use crate::models::{ConversionResult, RatesSnapshot};
    use crate::storage::{FileStore, KeyValueStore};

    fn convert_token(command: &AppCommand) -> RequestToken {
        match command {
            AppCommand::Convert { token, .. } => *token,
            other => panic!("expected Convert, got {:?}", other),
        }
    }

    fn converted(command: &AppCommand, outcome: Result<ConversionResult, FxError>) -> AppResult {
        match command {
            AppCommand::Convert { token, request } => AppResult::Converted {
                token: *token,
                request: request.clone(),
                outcome,
            },
            other => panic!("expected Convert, got {:?}", other),
        }
    }

    #[test]
    fn test_app_creation() {
        let app = App::default();
        assert!(app.is_running());
        assert_eq!(app.current_pair(), CurrencyPair::new("USD", "EUR"));
        assert_eq!(app.base_currency(), "USD");
        assert!(app.result.is_none());
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn test_selectors_list_every_currency_in_order() {
        let app = App::default();
        for select in [&app.from_select, &app.to_select, &app.base_select] {
            let values: Vec<&str> = select.options.iter().map(|o| o.value).collect();
            let expected: Vec<&str> = CURRENCIES.iter().map(|c| c.code).collect();
            assert_eq!(values, expected);
        }
        assert_eq!(app.from_select.options[0].label, "USD - US Dollar");
    }

    #[test]
    fn test_start_loads_rates_and_chart() {
        let mut app = App::default();
        let commands = app.start();

        assert_eq!(commands.len(), 2);
        assert!(matches!(&commands[0], AppCommand::LoadRates { base, .. } if base == "USD"));
        assert!(matches!(
            &commands[1],
            AppCommand::LoadHistory { pair, days: 7, .. } if *pair == CurrencyPair::new("USD", "EUR")
        ));
    }

    #[test]
    fn test_invalid_amount_issues_no_request() {
        for input in ["", "abc", "0", "-3"] {
            let mut app = App::default();
            app.amount_input = input.to_string();

            assert!(app.submit_conversion().is_none());
            assert_eq!(
                app.error_message.as_deref(),
                Some("Please enter a valid amount greater than zero.")
            );
            assert!(app.result.is_none());
            assert!(!app.converting);
        }
    }

    #[test]
    fn test_successful_conversion_renders_and_refreshes_chart() {
        let mut app = App::default();
        app.amount_input = "100".to_string();

        let command = app.submit_conversion().unwrap();
        let follow_up = app.apply_result(converted(&command, Ok(ConversionResult::new(88.23, 0.88))));

        let display = app.result.as_ref().unwrap();
        assert_eq!(display.result_line, "100 USD = €88.23 EUR");
        assert_eq!(display.rate_line, "1 USD = €0.8800 EUR");
        assert!(app.error_message.is_none());

        assert_eq!(follow_up.len(), 1);
        assert!(matches!(
            &follow_up[0],
            AppCommand::LoadHistory { pair, .. } if *pair == CurrencyPair::new("USD", "EUR")
        ));
    }

    #[test]
    fn test_failed_conversion_hides_result() {
        let mut app = App::default();
        let first = app.submit_conversion().unwrap();
        app.apply_result(converted(&first, Ok(ConversionResult::new(0.88, 0.88))));
        assert!(app.result.is_some());

        let second = app.submit_conversion().unwrap();
        let follow_up = app.apply_result(converted(
            &second,
            Err(FxError::Api("Unsupported currency".to_string())),
        ));

        assert!(follow_up.is_empty());
        assert!(app.result.is_none());
        assert_eq!(
            app.error_message.as_deref(),
            Some("Conversion failed: Unsupported currency")
        );
    }

    #[test]
    fn test_stale_conversion_response_is_dropped() {
        let mut app = App::default();

        app.amount_input = "1".to_string();
        let first = app.submit_conversion().unwrap();
        app.amount_input = "2".to_string();
        let second = app.submit_conversion().unwrap();
        assert!(convert_token(&second) > convert_token(&first));

        // La seconde requête répond en premier, la première arrive ensuite
        app.apply_result(converted(&second, Ok(ConversionResult::new(1.76, 0.88))));
        let follow_up = app.apply_result(converted(&first, Ok(ConversionResult::new(0.5, 0.5))));

        assert!(follow_up.is_empty());
        assert_eq!(
            app.result.as_ref().unwrap().result_line,
            "2 USD = €1.76 EUR"
        );
    }

    #[test]
    fn test_rejected_submission_supersedes_pending_conversion() {
        let mut app = App::default();
        app.amount_input = "100".to_string();
        let pending = app.submit_conversion().unwrap();

        app.amount_input = "-5".to_string();
        assert!(app.submit_conversion().is_none());
        assert!(!app.converting);

        let follow_up = app.apply_result(converted(&pending, Ok(ConversionResult::new(88.23, 0.88))));

        assert!(follow_up.is_empty());
        assert!(app.result.is_none());
        assert_eq!(
            app.error_message.as_deref(),
            Some("Please enter a valid amount greater than zero.")
        );
    }

    #[test]
    fn test_unreadable_favorites_are_not_overwritten() {
        let mut store = MemoryStore::new();
        let future = r#"{"version":2,"favorites":[]}"#;
        store.set("favorites", future).unwrap();

        let mut app = App::new(&Settings::default(), FavoritesStore::new(Box::new(store)));
        app.start();
        app.save_current_as_favorite();

        assert_eq!(
            app.error_message.as_deref(),
            Some("Unable to save favorite USD → EUR.")
        );
        assert!(app.favorites.is_empty());
    }

    #[test]
    fn test_rates_panel_states() {
        let mut app = App::default();
        let command = app.reload_rates();
        let AppCommand::LoadRates { token, base } = command else {
            panic!("expected LoadRates");
        };
        assert_eq!(app.rates_panel, RatesPanel::Loading);

        app.apply_result(AppResult::RatesLoaded {
            token,
            base: base.clone(),
            outcome: Err(FxError::malformed()),
        });
        assert_eq!(app.rates_panel, RatesPanel::Unavailable);

        let rates: HashMap<String, f64> = CURRENCIES
            .iter()
            .filter(|c| c.code != "GBP")
            .map(|c| (c.code.to_string(), 2.0))
            .collect();
        let AppCommand::LoadRates { token, base } = app.reload_rates() else {
            panic!("expected LoadRates");
        };
        app.apply_result(AppResult::RatesLoaded {
            token,
            base: base.clone(),
            outcome: Ok(RatesSnapshot::new(base, rates)),
        });

        match &app.rates_panel {
            RatesPanel::Cards(cards) => assert_eq!(cards.len(), 7),
            other => panic!("expected cards, got {:?}", other),
        }
    }

    #[test]
    fn test_swap_triggers_exactly_one_chart_refresh() {
        let mut app = App::default();
        let command = app.swap_currencies();

        assert_eq!(app.current_pair(), CurrencyPair::new("EUR", "USD"));
        match command {
            AppCommand::LoadHistory { pair, .. } => assert_eq!(pair, CurrencyPair::new("EUR", "USD")),
            other => panic!("expected LoadHistory, got {:?}", other),
        }
        assert_eq!(app.chart_panel, ChartPanel::Loading);
    }

    #[test]
    fn test_select_currency_routes_by_target() {
        let mut app = App::default();

        assert!(app.select_currency(SelectTarget::From, "USD").is_none());
        assert!(app.select_currency(SelectTarget::To, "XXX").is_none());

        let command = app.select_currency(SelectTarget::To, "JPY").unwrap();
        assert!(matches!(command, AppCommand::LoadHistory { .. }));

        let command = app.select_currency(SelectTarget::Base, "GBP").unwrap();
        assert!(matches!(command, AppCommand::LoadRates { ref base, .. } if base == "GBP"));
        assert_eq!(app.base_currency(), "GBP");
    }

    #[test]
    fn test_picker_selects_highlighted_currency() {
        let mut app = App::default();
        app.open_picker(SelectTarget::From);
        assert_eq!(app.picker_index, 0);

        app.picker_down();
        app.picker_down();
        let command = app.confirm_picker();

        assert!(app.is_on_converter());
        assert_eq!(app.from_select.value(), "GBP");
        assert!(command.is_some());
    }

    #[test]
    fn test_all_favorites_are_listed() {
        let mut app = App::default();
        app.save_current_as_favorite();
        app.swap_currencies();
        app.save_current_as_favorite();
        app.select_currency(SelectTarget::To, "JPY");
        app.save_current_as_favorite();

        let listed: Vec<String> = app.favorites.iter().map(Favorite::display).collect();
        assert_eq!(listed, vec!["USD to EUR", "EUR to USD", "EUR to JPY"]);
    }

    #[test]
    fn test_remove_and_apply_favorite() {
        let mut app = App::default();
        app.save_current_as_favorite();
        app.swap_currencies();
        app.save_current_as_favorite();

        app.selected_favorite = 0;
        let command = app.apply_selected_favorite().unwrap();
        assert_eq!(app.current_pair(), CurrencyPair::new("USD", "EUR"));
        assert!(matches!(command, AppCommand::LoadHistory { .. }));

        app.remove_selected_favorite();
        assert_eq!(app.favorites, vec![Favorite::new("EUR", "USD")]);
        assert_eq!(app.selected_favorite, 0);
    }

    #[test]
    fn test_favorites_survive_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        let settings = Settings::default();

        let mut app = App::new(&settings, FavoritesStore::new(Box::new(FileStore::new(&path))));
        app.save_current_as_favorite();

        let mut reloaded = App::new(&settings, FavoritesStore::new(Box::new(FileStore::new(&path))));
        reloaded.start();
        assert_eq!(reloaded.favorites, vec![Favorite::new("USD", "EUR")]);
    }

    #[test]
    fn test_theme_toggle() {
        let mut app = App::default();
        app.toggle_theme();
        assert_eq!(app.active_stylesheet, "dark-mode.css");
        assert_eq!(app.theme().toggle_label(), "☀ Light Mode");

        app.toggle_theme();
        assert_eq!(app.theme(), Theme::Light);
    }

    #[test]
    fn test_amount_input_submits_form() {
        let mut app = App::default();
        app.start_amount_input();
        assert!(app.is_in_input_mode());
        assert_eq!(app.input_buffer, "1");

        app.backspace();
        for c in "250".chars() {
            app.append_char(c);
        }
        let command = app.submit_amount_input().unwrap();

        assert!(app.is_on_converter());
        assert_eq!(app.amount_input, "250");
        assert!(matches!(command, AppCommand::Convert { ref request, .. } if request.amount == 250.0));
    }

    #[test]
    fn test_history_window_cycle_refetches_same_pair() {
        let mut app = App::default();
        app.start();

        let command = app.next_history_window();
        assert!(matches!(
            command,
            AppCommand::LoadHistory { days: 14, ref pair, .. } if *pair == CurrencyPair::new("USD", "EUR")
        ));
    }
}
