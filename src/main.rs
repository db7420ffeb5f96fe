mod api;
mod app;
mod config;
mod context;
mod error;
mod event;
mod feed;
mod forms;
mod modal;
mod models;
mod notify;
mod session;
mod signal;
mod theme;
mod ui;

use api::http::HttpTransport;
use api::ApiClient;
use app::InstaDevApp;
use config::ClientConfig;
use context::AppContext;
use eframe::egui;
use session::storage::{CredentialStorage, FileStorage, MemoryStorage};
use session::store::SessionStore;
use signal::SignalBus;
use std::sync::{mpsc, Arc};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_LOG_FILTER: &str = "instadev=debug,info";

fn init_tracing(config: &ClientConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    let (file_layer, guard) = match config.log_dir() {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "instadev.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();

    guard
}

fn open_storage(config: &ClientConfig) -> Arc<dyn CredentialStorage> {
    match config.session_file() {
        Some(path) => {
            let storage = FileStorage::new(path);
            tracing::debug!(path = %storage.path().display(), "using session file");
            Arc::new(storage)
        }
        None => {
            tracing::warn!("no data directory; session will not survive a restart");
            Arc::new(MemoryStorage::new())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    let _log_guard = init_tracing(&config);
    tracing::info!(api = %config.api_base_url, "starting InstaDev");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("instadev-runtime")
        .build()?;

    let (tx, rx) = mpsc::channel();
    let api = ApiClient::new(Arc::new(HttpTransport::new(&config)?));
    let session = Arc::new(SessionStore::new(api, open_storage(&config), tx.clone()));
    session.bootstrap();

    let bus = SignalBus::default();
    let app_context = AppContext::new(session, bus, runtime.handle().clone(), tx);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("InstaDev")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "InstaDev",
        native_options,
        Box::new(move |creation_context| {
            let egui_ctx = creation_context.egui_ctx.clone();
            let app_context = app_context.with_repaint(egui_ctx.clone());
            Ok(Box::new(InstaDevApp::new(&egui_ctx, rx, app_context, &config)))
        }),
    )?;

    drop(runtime);
    Ok(())
}
