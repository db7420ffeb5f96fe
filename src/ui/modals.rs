//! Dialog hosts. [`AuthModal`] is mounted at the root and owns the login and
//! registration dialogs; [`ComposeModals`] lives inside the dashboard and
//! owns the project and story dialogs. Each host draws only its own kinds.

use crate::context::AppContext;
use crate::event::AppEvent;
use crate::feed::{projects, stories};
use crate::forms::{self, LoginForm, ProjectForm, RegistrationForm, StoryForm};
use crate::modal::{ModalCoordinator, ModalKind};
use crate::models::{SkillLevel, Stack};
use crate::signal::SignalBus;
use crate::theme::Theme;
use eframe::egui::{self, Id, RichText};
use std::time::{Duration, Instant};

const FORM_WIDTH: f32 = 360.0;

enum Action {
    Submit,
    Switch(ModalKind),
}

fn field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(value).desired_width(FORM_WIDTH));
}

fn secret_field(ui: &mut egui::Ui, label: &str, value: &mut String) {
    ui.label(label);
    ui.add(
        egui::TextEdit::singleline(value)
            .password(true)
            .desired_width(FORM_WIDTH),
    );
}

fn submit_button(ui: &mut egui::Ui, theme: &Theme, idle: &str, busy: &str, submitting: bool) -> bool {
    let label = if submitting { busy } else { idle };
    ui.add_enabled(
        !submitting,
        theme
            .primary_button(label)
            .min_size(egui::vec2(FORM_WIDTH, 36.0)),
    )
    .clicked()
}

fn switch_link(ui: &mut egui::Ui, prompt: &str, link: &str) -> bool {
    ui.horizontal(|ui| {
        ui.label(prompt);
        ui.link(link).clicked()
    })
    .inner
}

pub struct AuthModal {
    coordinator: ModalCoordinator,
    login: LoginForm,
    register: RegistrationForm,
    submitting: bool,
}

impl AuthModal {
    pub fn new(bus: &SignalBus, switch_delay: Duration) -> Self {
        Self {
            coordinator: ModalCoordinator::new(bus, switch_delay),
            login: LoginForm::default(),
            register: RegistrationForm::default(),
            submitting: false,
        }
    }

    pub fn poll(&mut self, now: Instant) {
        self.coordinator.poll(now);
    }

    pub fn has_pending_switch(&self) -> bool {
        self.coordinator.has_pending_switch()
    }

    pub fn on_finished(&mut self, kind: ModalKind, success: bool) {
        self.submitting = false;
        if !success {
            return;
        }
        match kind {
            ModalKind::Login => self.login = LoginForm::default(),
            ModalKind::Register => self.register = RegistrationForm::default(),
            _ => return,
        }
        if self.coordinator.is_showing(kind) {
            self.coordinator.close();
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme, app: &AppContext) {
        let kind = match self.coordinator.request().kind() {
            Some(kind @ (ModalKind::Login | ModalKind::Register)) => kind,
            _ => return,
        };

        let submitting = self.submitting;
        let login = &mut self.login;
        let register = &mut self.register;
        let response = egui::Modal::new(Id::new("auth_modal"))
            .frame(theme.card_frame())
            .show(ctx, |ui| {
                ui.set_width(FORM_WIDTH);
                match kind {
                    ModalKind::Login => login_body(ui, theme, login, submitting),
                    _ => register_body(ui, theme, register, submitting),
                }
            });

        let dismissed = response.should_close();
        match response.inner {
            Some(Action::Submit) => self.submit(kind, app),
            Some(Action::Switch(target)) => self.coordinator.switch_to(target, Instant::now()),
            None if dismissed && !self.submitting => self.coordinator.close(),
            None => {}
        }
    }

    fn submit(&mut self, kind: ModalKind, app: &AppContext) {
        self.submitting = true;
        let session = app.session.clone();
        match kind {
            ModalKind::Login => {
                let form = self.login.clone();
                app.spawn(async move {
                    let success = forms::submit_login(&session, &form).await;
                    Some(AppEvent::AuthFinished { kind, success })
                });
            }
            _ => {
                let form = self.register.clone();
                app.spawn(async move {
                    let success = forms::submit_registration(&session, &form).await;
                    Some(AppEvent::AuthFinished { kind, success })
                });
            }
        }
    }
}

fn login_body(
    ui: &mut egui::Ui,
    theme: &Theme,
    form: &mut LoginForm,
    submitting: bool,
) -> Option<Action> {
    ui.heading("Welcome Back!");
    ui.add_space(theme.spacing_8);
    field(ui, "Username", &mut form.username);
    secret_field(ui, "Password", &mut form.password);
    ui.add_space(theme.spacing_8);

    if submit_button(ui, theme, "Login", "Logging in...", submitting) {
        return Some(Action::Submit);
    }
    if switch_link(ui, "Don't have an account?", "Sign up") {
        return Some(Action::Switch(ModalKind::Register));
    }
    None
}

fn register_body(
    ui: &mut egui::Ui,
    theme: &Theme,
    form: &mut RegistrationForm,
    submitting: bool,
) -> Option<Action> {
    ui.heading("Join InstaDev");
    ui.add_space(theme.spacing_8);
    field(ui, "Username", &mut form.username);
    field(ui, "Email", &mut form.email);
    secret_field(ui, "Password", &mut form.password);
    secret_field(ui, "Confirm Password", &mut form.confirm_password);

    ui.label("Skill Level");
    egui::ComboBox::from_id_salt("register_skill_level")
        .width(FORM_WIDTH)
        .selected_text(form.skill_level.map_or("Select skill level", SkillLevel::label))
        .show_ui(ui, |ui| {
            for level in SkillLevel::ALL {
                ui.selectable_value(&mut form.skill_level, Some(level), level.label());
            }
        });

    ui.label("Primary Stack");
    egui::ComboBox::from_id_salt("register_primary_stack")
        .width(FORM_WIDTH)
        .selected_text(form.primary_stack.map_or("Select your stack", Stack::display_name))
        .show_ui(ui, |ui| {
            for stack in Stack::ALL {
                ui.selectable_value(&mut form.primary_stack, Some(stack), stack.display_name());
            }
        });
    ui.add_space(theme.spacing_8);

    if submit_button(ui, theme, "Create Account", "Creating account...", submitting) {
        return Some(Action::Submit);
    }
    if switch_link(ui, "Already have an account?", "Login") {
        return Some(Action::Switch(ModalKind::Login));
    }
    None
}

/// Project and story dialogs, mounted with the dashboard.
pub struct ComposeModals {
    coordinator: ModalCoordinator,
    project: ProjectForm,
    story: StoryForm,
    submitting: bool,
}

impl ComposeModals {
    pub fn new(bus: &SignalBus, switch_delay: Duration) -> Self {
        Self {
            coordinator: ModalCoordinator::new(bus, switch_delay),
            project: ProjectForm::default(),
            story: StoryForm::default(),
            submitting: false,
        }
    }

    pub fn poll(&mut self, now: Instant) {
        self.coordinator.poll(now);
    }

    pub fn on_submitted(&mut self, kind: ModalKind, success: bool) {
        self.submitting = false;
        if !success {
            return;
        }
        match kind {
            ModalKind::AddProject => self.project = ProjectForm::default(),
            ModalKind::ShareStory => self.story = StoryForm::default(),
            _ => return,
        }
        if self.coordinator.is_showing(kind) {
            self.coordinator.close();
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme, app: &AppContext) {
        let kind = match self.coordinator.request().kind() {
            Some(kind @ (ModalKind::AddProject | ModalKind::ShareStory)) => kind,
            _ => return,
        };

        let submitting = self.submitting;
        let project = &mut self.project;
        let story = &mut self.story;
        let response = egui::Modal::new(Id::new("compose_modal"))
            .frame(theme.card_frame())
            .show(ctx, |ui| {
                ui.set_width(FORM_WIDTH);
                let body = match kind {
                    ModalKind::AddProject => project_body(ui, theme, project, submitting),
                    _ => story_body(ui, theme, story, submitting),
                };
                let cancelled = ui.button("Cancel").clicked();
                (body, cancelled)
            });

        let dismissed = response.should_close();
        let (submit, cancelled) = response.inner;
        if submit {
            self.submit(kind, app);
        } else if (cancelled || dismissed) && !self.submitting {
            self.coordinator.close();
        }
    }

    fn submit(&mut self, kind: ModalKind, app: &AppContext) {
        self.submitting = true;
        let session = app.session.clone();
        let bus = app.bus.clone();
        match kind {
            ModalKind::AddProject => {
                let form = self.project.clone();
                app.spawn(async move {
                    let success = projects::submit_project(&session, &bus, &form).await;
                    Some(AppEvent::FormSubmitted { kind, success })
                });
            }
            _ => {
                let form = self.story.clone();
                app.spawn(async move {
                    let success = stories::submit_story(&session, &bus, &form).await;
                    Some(AppEvent::FormSubmitted { kind, success })
                });
            }
        }
    }
}

fn project_body(ui: &mut egui::Ui, theme: &Theme, form: &mut ProjectForm, submitting: bool) -> bool {
    ui.heading("Add New Project");
    ui.add_space(theme.spacing_8);
    field(ui, "Project Title", &mut form.title);
    ui.label("Description");
    ui.add(
        egui::TextEdit::multiline(&mut form.description)
            .desired_rows(4)
            .desired_width(FORM_WIDTH),
    );
    field(ui, "Technologies (comma-separated)", &mut form.technologies);
    field(ui, "Project Link (optional)", &mut form.project_link);
    field(ui, "Demo Link (optional)", &mut form.demo_link);
    ui.add_space(theme.spacing_8);
    submit_button(ui, theme, "Add Project", "Adding...", submitting)
}

fn story_body(ui: &mut egui::Ui, theme: &Theme, form: &mut StoryForm, submitting: bool) -> bool {
    ui.heading("Share Your Story");
    ui.add_space(theme.spacing_8);
    ui.add(
        egui::TextEdit::multiline(&mut form.content)
            .hint_text("What's on your mind? Share your coding journey...")
            .desired_rows(6)
            .desired_width(FORM_WIDTH),
    );

    let remaining = form.remaining();
    let color = if remaining < 0 {
        theme.danger
    } else {
        theme.text_muted
    };
    ui.label(
        RichText::new(format!("{remaining} characters remaining"))
            .small()
            .color(color),
    );
    field(ui, "Tags (comma-separated)", &mut form.tags);
    ui.add_space(theme.spacing_8);
    submit_button(ui, theme, "Share Story", "Sharing...", submitting)
}
