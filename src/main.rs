// ============================================================================
// LazyFX - Convertisseur de devises en terminal
// ============================================================================
// Programme TUI : conversion, taux populaires, favoris, historique
// Les données viennent du serveur de conversion (/api/convert, /api/rates,
// /api/history), les favoris d'un stockage clé/valeur local.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : résultats → rendu → événement
// 3. Worker thread : runtime tokio hors de la boucle UI
// 4. Command pattern : App retourne des AppCommand, main les envoie
// ============================================================================

use std::io;
use std::path::Path;
use std::sync::{mpsc, Arc};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use lazyfx::api::{HttpRatesClient, RatesApi};
use lazyfx::app::App;
use lazyfx::config::Settings;
use lazyfx::storage::{FavoritesStore, FileStore};
use lazyfx::ui::{handle_event, render, EventHandler};
use lazyfx::worker::{spawn_background_worker, AppCommand, AppResult, ResultInbox};

// ============================================================================
// Initialisation du logging
// ============================================================================
// Les println! ne fonctionnent pas une fois le TUI lancé : on log vers un
// fichier avec rotation quotidienne.
// ============================================================================

/// Initialise le logging vers `<log_dir>/lazyfx.log`
///
/// # Contrôler le niveau de log
/// ```bash
/// RUST_LOG=debug lazyfx
/// RUST_LOG=lazyfx=trace lazyfx
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazyfx.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true)
                .with_thread_ids(true) // Worker et UI dans des threads différents
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyfx=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    // La configuration d'abord : elle donne le répertoire des logs
    let settings = Settings::load()?;

    init_logging(&settings.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(
        api = %settings.api_base_url,
        storage = %settings.storage_path.display(),
        "LazyFX starting up"
    );

    let favorites = FavoritesStore::new(Box::new(FileStore::new(&settings.storage_path)));
    let mut app = App::new(&settings, favorites);

    // CONCEPT RUST : Arc<dyn Trait>
    // - Le worker ne connaît que le trait RatesApi
    // - Arc : chaque tâche tokio garde sa propre référence
    let api: Arc<dyn RatesApi> = Arc::new(HttpRatesClient::new(&settings.api_base_url)?);

    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    let worker = spawn_background_worker(api, command_rx, result_tx)?;

    // Chargement initial : favoris, taux de la base, graphique
    dispatch(&command_tx, app.start());

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let mut inbox = ResultInbox::new(result_rx);
    let result = run(&mut terminal, &mut app, &events, &command_tx, &mut inbox);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Fermer le channel arrête le worker
    drop(command_tx);
    if worker.join().is_err() {
        warn!("Worker thread panicked");
    }

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

/// Envoie des commandes au worker
fn dispatch(command_tx: &mpsc::Sender<AppCommand>, commands: impl IntoIterator<Item = AppCommand>) {
    for command in commands {
        if command_tx.send(command).is_err() {
            error!("Worker channel closed, command dropped");
        }
    }
}

// ============================================================================
// Event loop
// ============================================================================
// CONCEPT : App appartient à la boucle UI
// - Pas de Mutex : le worker ne touche jamais App
// - Les résultats arrivent par channel (ResultInbox) et sont appliqués ici
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    inbox: &mut ResultInbox,
) -> Result<()> {
    while app.is_running() {
        // 0. RÉSULTATS : vide le channel sans bloquer
        for result in inbox.drain() {
            let follow_up = app.apply_result(result);
            dispatch(command_tx, follow_up);
        }

        // 1. RENDER
        terminal.draw(|frame| render(frame, app))?;

        // 2. INPUT
        match events.next() {
            Ok(event) => {
                let commands = handle_event(app, event);
                dispatch(command_tx, commands);
            }
            Err(e) => warn!(error = ?e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
