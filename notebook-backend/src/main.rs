use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod config;
mod controllers;
mod error;
mod notes;
mod search;
mod storage;
mod templates;

use config::Config;
use notes::NoteStore;
use search::{ResultSet, SearchEngine};
use storage::{FsStorage, Storage};
use templates::Templates;

pub struct AppState {
    pub notes: Arc<NoteStore>,
    /// Copies of the notes matched by the last search, shared by search and browse
    pub results: Arc<ResultSet>,
    pub search: Arc<SearchEngine>,
    pub templates: Arc<Templates>,
}

impl AppState {
    pub fn new(
        config: &Config,
        note_storage: Arc<dyn Storage>,
        result_storage: Arc<dyn Storage>,
        templates: Templates,
    ) -> Self {
        let notes = Arc::new(NoteStore::new(note_storage));
        let results = Arc::new(ResultSet::new(result_storage));
        let search = Arc::new(SearchEngine::new(
            Arc::clone(&notes),
            Arc::clone(&results),
            config.match_mode,
        ));

        Self {
            notes,
            results,
            search,
            templates: Arc::new(templates),
        }
    }

    /// State backed by in-memory storage labelled `note` and `search`
    #[cfg(test)]
    pub fn in_memory(match_mode: search::MatchMode) -> Self {
        use storage::MemoryStorage;

        let config = Config {
            port: config::defaults::PORT,
            bind_addr: config::defaults::BIND_ADDR.to_string(),
            notes_dir: config::defaults::NOTES_DIR.into(),
            results_dir: config::defaults::RESULTS_DIR.into(),
            static_dir: config::defaults::STATIC_DIR.into(),
            match_mode,
            create_dirs: false,
        };
        Self::new(
            &config,
            Arc::new(MemoryStorage::new("note")),
            Arc::new(MemoryStorage::new("search")),
            Templates::default(),
        )
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    log::info!("Notebook v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Notes directory: {}", config.notes_dir.display());
    log::info!("Results directory: {}", config.results_dir.display());
    log::info!("Search match mode: {}", config.match_mode.as_str());

    if config.create_dirs {
        if let Err(e) = config.initialize_dirs() {
            log::error!("Failed to create note directories: {}", e);
        }
    } else {
        for dir in [&config.notes_dir, &config.results_dir] {
            if !dir.is_dir() {
                log::warn!("{} does not exist; requests using it will fail", dir.display());
            }
        }
    }

    let templates = Templates::load(&config.templates_dir())?;

    let bind_addr = config.bind_addr.clone();
    let port = config.port;
    let static_dir = config.static_dir.clone();
    let serve_static = static_dir.is_dir();
    if !serve_static {
        log::warn!("Static directory {} not found, /static is disabled", static_dir.display());
    }

    let state = web::Data::new(AppState::new(
        &config,
        Arc::new(FsStorage::new(&config.notes_dir)),
        Arc::new(FsStorage::new(&config.results_dir)),
        templates,
    ));

    log::info!("Listening on http://{}:{}", bind_addr, port);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::notes::config)
            .configure(controllers::pages::config);

        if serve_static {
            app = app.service(Files::new("/static", static_dir.clone()));
        }

        app
    })
    .bind((bind_addr.as_str(), port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            log::warn!("Failed to listen for Ctrl+C");
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(std::time::Duration::from_secs(5), server_stop)
            .await
            .is_err()
        {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
