use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::event::AppEvent;
use crate::notify::Toasts;
use crate::theme::Theme;
use crate::ui::dashboard::Dashboard;
use crate::ui::modals::AuthModal;
use crate::ui::{landing, toast};
use eframe::egui::{self, RichText};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::{Duration, Instant};

pub struct InstaDevApp {
    rx: Receiver<AppEvent>,
    app: AppContext,
    theme: Theme,
    toasts: Toasts,
    auth: AuthModal,
    dashboard: Option<Dashboard>,
    switch_delay: Duration,
}

impl InstaDevApp {
    pub fn new(
        ctx: &egui::Context,
        rx: Receiver<AppEvent>,
        app: AppContext,
        config: &ClientConfig,
    ) -> Self {
        let theme = Theme::default();
        theme.apply_visuals(ctx);

        Self {
            auth: AuthModal::new(&app.bus, config.modal_switch_delay),
            rx,
            app,
            theme,
            toasts: Toasts::new(config.notification_ttl),
            dashboard: None,
            switch_delay: config.modal_switch_delay,
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::warn!("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Notify(notification) => {
                tracing::debug!(message = %notification.message, "notification");
                self.toasts.push(notification, Instant::now());
            }
            AppEvent::AuthFinished { kind, success } => self.auth.on_finished(kind, success),
            AppEvent::LoggedOut => {
                self.dashboard = None;
            }
            other => match self.dashboard.as_mut() {
                Some(dashboard) => dashboard.apply_event(other, &self.app),
                None => tracing::debug!(?other, "dropping event for unmounted dashboard"),
            },
        }
    }

    fn render_loading(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.centered_and_justified(|ui| {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(RichText::new("Loading...").color(self.theme.text_muted));
                });
            });
        });
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let switch = self.auth.has_pending_switch().then_some(self.switch_delay);
        let expiry = self.toasts.next_expiry(now);
        let next = match (switch, expiry) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        if let Some(delay) = next {
            ctx.request_repaint_after(delay);
        }
    }
}

impl eframe::App for InstaDevApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        let now = Instant::now();
        self.auth.poll(now);

        if self.app.session.is_loading() {
            self.render_loading(ctx);
        } else if self.app.session.is_authenticated() {
            let dashboard = self
                .dashboard
                .get_or_insert_with(|| Dashboard::new(&self.app, self.switch_delay));
            dashboard.poll(&self.app, now);
            dashboard.show(ctx, &self.theme, &self.app);
        } else {
            self.dashboard = None;
            landing::show(ctx, &self.theme, &self.app.bus);
        }

        self.auth.show(ctx, &self.theme, &self.app);
        toast::show(ctx, &self.theme, &mut self.toasts, now);
        self.schedule_repaint(ctx, now);
    }
}
