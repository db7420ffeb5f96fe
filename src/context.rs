use crate::api::ApiClient;
use crate::event::AppEvent;
use crate::session::store::SessionStore;
use crate::signal::SignalBus;
use eframe::egui;
use std::future::Future;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Application-scoped services handed to every view.
#[derive(Clone)]
pub struct AppContext {
    pub session: Arc<SessionStore>,
    pub bus: SignalBus,
    runtime: Handle,
    events: Sender<AppEvent>,
    repaint: Option<egui::Context>,
}

impl AppContext {
    pub fn new(
        session: Arc<SessionStore>,
        bus: SignalBus,
        runtime: Handle,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            session,
            bus,
            runtime,
            events,
            repaint: None,
        }
    }

    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn api(&self) -> &ApiClient {
        self.session.api()
    }

    /// Runs `task` on the runtime, forwards its event to the UI thread and
    /// wakes the UI so the result is drawn.
    pub fn spawn<F>(&self, task: F)
    where
        F: Future<Output = Option<AppEvent>> + Send + 'static,
    {
        let events = self.events.clone();
        let repaint = self.repaint.clone();
        self.runtime.spawn(async move {
            if let Some(event) = task.await {
                if events.send(event).is_err() {
                    tracing::debug!("event dropped: ui is gone");
                }
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }
}
