//! Signed-in view. Built when a session is present and dropped on logout, so
//! its feeds, forms and bus subscriptions all start fresh for the next user.

use super::modals::ComposeModals;
use crate::api::routes::DeveloperFilter;
use crate::context::AppContext;
use crate::event::AppEvent;
use crate::feed::developers::{self, DevelopersFeed};
use crate::feed::friends::{self, FriendsFeed, Response};
use crate::feed::projects::ProjectsFeed;
use crate::feed::stories::{self, Reaction, StoriesFeed};
use crate::modal::ModalKind;
use crate::models::{self, Developer, Project, SkillLevel, Stack, Story, User};
use crate::signal::{Resource, Signal, Subscription};
use crate::theme::Theme;
use chrono::Utc;
use eframe::egui::{self, Align, Layout, RichText, ScrollArea};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Developers,
    Projects,
    Stories,
    Friends,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Self::Developers, Self::Projects, Self::Stories, Self::Friends];

    pub fn label(self) -> &'static str {
        match self {
            Self::Developers => "Developers",
            Self::Projects => "Projects",
            Self::Stories => "Stories",
            Self::Friends => "Friends",
        }
    }

    fn resource(self) -> Resource {
        match self {
            Self::Developers => Resource::Developers,
            Self::Projects => Resource::Projects,
            Self::Stories => Resource::Stories,
            Self::Friends => Resource::Friends,
        }
    }
}

/// Work requested while drawing, run once the frame's borrows are released.
enum Command {
    SelectTab(Tab),
    SetFilter(DeveloperFilter),
    Connect(String),
    React(String, Reaction),
    Respond(String, Response),
    Message(String),
    Open(ModalKind),
    Logout,
}

pub struct Dashboard {
    tab: Tab,
    developers: DevelopersFeed,
    projects: ProjectsFeed,
    stories: StoriesFeed,
    friends: FriendsFeed,
    refresh: Subscription,
    modals: ComposeModals,
    logging_out: bool,
}

impl Dashboard {
    pub fn new(app: &AppContext, switch_delay: Duration) -> Self {
        let mut dashboard = Self {
            tab: Tab::Developers,
            developers: DevelopersFeed::default(),
            projects: ProjectsFeed::default(),
            stories: StoriesFeed::default(),
            friends: FriendsFeed::default(),
            refresh: app.bus.subscribe(),
            modals: ComposeModals::new(&app.bus, switch_delay),
            logging_out: false,
        };
        dashboard.reload(Tab::Developers, app);
        dashboard
    }

    fn reload(&mut self, tab: Tab, app: &AppContext) {
        match tab {
            Tab::Developers => self.developers.reload(app),
            Tab::Projects => self.projects.reload(app),
            Tab::Stories => self.stories.reload(app),
            Tab::Friends => self.friends.reload(app),
        }
    }

    /// Applies due modal switches and refresh requests. Only the visible tab
    /// re-fetches; the others reload when they are next selected.
    pub fn poll(&mut self, app: &AppContext, now: Instant) {
        self.modals.poll(now);
        for signal in self.refresh.drain() {
            if signal == Signal::Refresh(self.tab.resource()) {
                self.reload(self.tab, app);
            }
        }
    }

    /// Routes a completion to the feed or dialog that requested it.
    pub fn apply_event(&mut self, event: AppEvent, app: &AppContext) {
        let session = &app.session;
        match event {
            AppEvent::DevelopersLoaded { seq, result } => {
                self.developers.on_loaded(seq, result, session)
            }
            AppEvent::ProjectsLoaded { seq, result } => self.projects.on_loaded(seq, result, session),
            AppEvent::StoriesLoaded { seq, result } => self.stories.on_loaded(seq, result, session),
            AppEvent::FriendsLoaded { seq, result } => self.friends.on_loaded(seq, result, session),
            AppEvent::FormSubmitted { kind, success } => self.modals.on_submitted(kind, success),
            other => tracing::debug!(?other, "event not handled by dashboard"),
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme, app: &AppContext) {
        let user = app.session.user();
        let mut commands = Vec::new();

        egui::TopBottomPanel::top("nav_bar")
            .frame(theme.nav_frame())
            .show(ctx, |ui| {
                self.render_nav(ui, theme, user.as_ref(), &mut commands);
            });

        egui::SidePanel::left("profile_sidebar")
            .resizable(false)
            .exact_width(260.0)
            .show(ctx, |ui| {
                ui.add_space(theme.spacing_16);
                render_sidebar(ui, theme, user.as_ref(), &mut commands);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_tab_bar(ui, theme, &mut commands);
            ui.separator();
            ScrollArea::vertical()
                .id_salt("tab_body")
                .auto_shrink([false, false])
                .show(ui, |ui| match self.tab {
                    Tab::Developers => {
                        render_developers(ui, theme, &self.developers, &mut commands)
                    }
                    Tab::Projects => render_projects(ui, theme, &self.projects, &mut commands),
                    Tab::Stories => {
                        let user_id = user.as_ref().and_then(|user| user.id.as_deref());
                        render_stories(ui, theme, &self.stories, user_id, &mut commands)
                    }
                    Tab::Friends => render_friends(ui, theme, &self.friends, &mut commands),
                });
        });

        self.modals.show(ctx, theme, app);

        for command in commands {
            self.run(command, app);
        }
    }

    fn run(&mut self, command: Command, app: &AppContext) {
        let session = app.session.clone();
        let bus = app.bus.clone();
        match command {
            Command::SelectTab(tab) => {
                self.tab = tab;
                self.reload(tab, app);
            }
            Command::SetFilter(filter) => {
                if self.developers.set_filter(filter) {
                    self.developers.reload(app);
                }
            }
            Command::Connect(user_id) => app.spawn(async move {
                developers::connect(&session, &bus, &user_id).await;
                None
            }),
            Command::React(story_id, reaction) => app.spawn(async move {
                stories::toggle(&session, &bus, &story_id, reaction).await;
                None
            }),
            Command::Respond(request_id, response) => app.spawn(async move {
                friends::respond(&session, &bus, &request_id, response).await;
                None
            }),
            Command::Message(username) => friends::message_user(&session, &username),
            Command::Open(kind) => {
                app.bus.open_modal(kind);
            }
            Command::Logout => {
                if self.logging_out {
                    return;
                }
                self.logging_out = true;
                app.spawn(async move {
                    session.logout().await;
                    Some(AppEvent::LoggedOut)
                });
            }
        }
    }

    fn render_nav(
        &self,
        ui: &mut egui::Ui,
        theme: &Theme,
        user: Option<&User>,
        commands: &mut Vec<Command>,
    ) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("InstaDev")
                    .size(24.0)
                    .strong()
                    .color(theme.text_on_accent),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = if self.logging_out { "Logging out..." } else { "Logout" };
                if ui
                    .add_enabled(!self.logging_out, egui::Button::new(label))
                    .clicked()
                {
                    commands.push(Command::Logout);
                }
                if let Some(user) = user {
                    ui.label(
                        RichText::new(format!("Welcome, {}!", user.username))
                            .color(theme.text_on_accent),
                    );
                }
            });
        });
    }

    fn render_tab_bar(&self, ui: &mut egui::Ui, theme: &Theme, commands: &mut Vec<Command>) {
        ui.horizontal(|ui| {
            for tab in Tab::ALL {
                let selected = self.tab == tab;
                let text = if selected {
                    RichText::new(tab.label()).strong().color(theme.accent_primary)
                } else {
                    RichText::new(tab.label()).color(theme.text_muted)
                };
                if ui.selectable_label(selected, text).clicked() && !selected {
                    commands.push(Command::SelectTab(tab));
                }
            }
        });
    }
}

fn initial(username: &str) -> String {
    username
        .chars()
        .next()
        .map(|first| first.to_uppercase().collect())
        .unwrap_or_default()
}

fn avatar(ui: &mut egui::Ui, theme: &Theme, username: &str, size: f32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(size, size), egui::Sense::hover());
    ui.painter()
        .circle_filled(rect.center(), size / 2.0, theme.accent_primary);
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initial(username),
        egui::FontId::proportional(size * 0.45),
        theme.text_on_accent,
    );
}

fn render_sidebar(
    ui: &mut egui::Ui,
    theme: &Theme,
    user: Option<&User>,
    commands: &mut Vec<Command>,
) {
    if let Some(user) = user {
        theme.card_frame().show(ui, |ui| {
            ui.vertical_centered(|ui| {
                avatar(ui, theme, &user.username, 64.0);
                ui.strong(&user.username);
                if let Some(level) = user.skill_level.as_deref() {
                    ui.label(RichText::new(models::capitalize_first(level)).color(theme.text_muted));
                }
                ui.label(
                    RichText::new(models::stack_name(user.primary_stack.as_deref()))
                        .color(theme.accent_secondary),
                );
            });
        });
    }

    ui.add_space(theme.spacing_16);
    theme.card_frame().show(ui, |ui| {
        ui.strong("Quick Actions");
        let width = ui.available_width();
        if ui
            .add(theme.primary_button("Add Project").min_size(egui::vec2(width, 32.0)))
            .clicked()
        {
            commands.push(Command::Open(ModalKind::AddProject));
        }
        if ui
            .add(theme.primary_button("Share Story").min_size(egui::vec2(width, 32.0)))
            .clicked()
        {
            commands.push(Command::Open(ModalKind::ShareStory));
        }
    });
}

fn loading(ui: &mut egui::Ui, what: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(format!("Loading {what}..."));
    });
}

fn empty(ui: &mut egui::Ui, theme: &Theme, message: &str) {
    ui.add_space(theme.spacing_24);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new(message).color(theme.text_muted));
    });
}

fn render_developers(
    ui: &mut egui::Ui,
    theme: &Theme,
    feed: &DevelopersFeed,
    commands: &mut Vec<Command>,
) {
    let mut filter = feed.filter().clone();
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("filter_skill_level")
            .selected_text(
                filter
                    .skill_level
                    .as_deref()
                    .map_or("All Skill Levels".to_string(), models::capitalize_first),
            )
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.skill_level, None, "All Skill Levels");
                for level in SkillLevel::ALL {
                    ui.selectable_value(
                        &mut filter.skill_level,
                        Some(level.as_str().to_string()),
                        level.label(),
                    );
                }
            });
        egui::ComboBox::from_id_salt("filter_primary_stack")
            .selected_text(match filter.primary_stack.as_deref() {
                Some(stack) => models::stack_name(Some(stack)),
                None => "All Stacks",
            })
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut filter.primary_stack, None, "All Stacks");
                for stack in Stack::ALL {
                    ui.selectable_value(
                        &mut filter.primary_stack,
                        Some(stack.as_str().to_string()),
                        stack.display_name(),
                    );
                }
            });
    });
    if &filter != feed.filter() {
        commands.push(Command::SetFilter(filter));
    }
    ui.add_space(theme.spacing_8);

    if feed.is_loading() {
        return loading(ui, "developers");
    }
    if feed.developers().is_empty() {
        return empty(ui, theme, "No developers online right now.");
    }
    for developer in feed.developers() {
        developer_card(ui, theme, developer, commands);
        ui.add_space(theme.spacing_8);
    }
}

fn developer_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    developer: &Developer,
    commands: &mut Vec<Command>,
) {
    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            avatar(ui, theme, &developer.username, 44.0);
            ui.vertical(|ui| {
                ui.strong(&developer.username);
                ui.label(
                    RichText::new(format!("{} • {}", developer.level_label(), developer.stack_name()))
                        .color(theme.text_muted),
                );
            });
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.add(theme.primary_button("Connect")).clicked() {
                    commands.push(Command::Connect(developer.id.clone()));
                }
            });
        });
    });
}

fn render_projects(
    ui: &mut egui::Ui,
    theme: &Theme,
    feed: &ProjectsFeed,
    commands: &mut Vec<Command>,
) {
    ui.horizontal(|ui| {
        ui.heading("Community Projects");
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.add(theme.primary_button("Add Project")).clicked() {
                commands.push(Command::Open(ModalKind::AddProject));
            }
        });
    });

    if feed.is_loading() {
        return loading(ui, "projects");
    }
    if feed.projects().is_empty() {
        return empty(ui, theme, "No projects yet. Be the first to share one!");
    }
    for project in feed.projects() {
        project_card(ui, theme, project);
        ui.add_space(theme.spacing_8);
    }
}

fn project_card(ui: &mut egui::Ui, theme: &Theme, project: &Project) {
    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.strong(RichText::new(&project.title).size(16.0));
        ui.label(RichText::new(format!("by {}", project.author.username)).color(theme.text_muted));
        ui.label(&project.description);
        ui.horizontal_wrapped(|ui| {
            for technology in &project.technologies {
                theme.tag(ui, technology);
            }
        });
        ui.horizontal(|ui| {
            if let Some(link) = project.project_link.as_deref() {
                ui.hyperlink_to("View Code", link);
            }
            if let Some(link) = project.demo_link.as_deref() {
                ui.hyperlink_to("Live Demo", link);
            }
        });
    });
}

fn render_stories(
    ui: &mut egui::Ui,
    theme: &Theme,
    feed: &StoriesFeed,
    user_id: Option<&str>,
    commands: &mut Vec<Command>,
) {
    ui.horizontal(|ui| {
        ui.heading("Developer Stories");
        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            if ui.add(theme.primary_button("Share Story")).clicked() {
                commands.push(Command::Open(ModalKind::ShareStory));
            }
        });
    });

    if feed.is_loading() {
        return loading(ui, "stories");
    }
    if feed.stories().is_empty() {
        return empty(ui, theme, "No stories yet. Share what you're working on!");
    }
    let now = Utc::now();
    for story in feed.stories() {
        story_card(ui, theme, story, user_id, now, commands);
        ui.add_space(theme.spacing_8);
    }
}

fn story_card(
    ui: &mut egui::Ui,
    theme: &Theme,
    story: &Story,
    user_id: Option<&str>,
    now: chrono::DateTime<Utc>,
    commands: &mut Vec<Command>,
) {
    theme.card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            avatar(ui, theme, &story.author.username, 36.0);
            ui.strong(&story.author.username);
            ui.label(
                RichText::new(models::time_ago(story.created_at, now))
                    .small()
                    .color(theme.text_muted),
            );
        });
        ui.label(&story.content);
        if !story.tags.is_empty() {
            ui.horizontal_wrapped(|ui| {
                for tag in &story.tags {
                    theme.tag(ui, &format!("#{tag}"));
                }
            });
        }

        ui.horizontal(|ui| {
            let liked = story.is_liked_by(user_id);
            let heart = if liked { "♥" } else { "♡" };
            let like = RichText::new(format!("{heart} {}", story.likes.len()))
                .color(if liked { theme.like } else { theme.text_muted });
            if ui.button(like).clicked() {
                commands.push(Command::React(story.id.clone(), Reaction::Like));
            }

            let retweeted = story.is_retweeted_by(user_id);
            let retweet = RichText::new(format!("⟲ {}", story.retweets.len()))
                .color(if retweeted { theme.success } else { theme.text_muted });
            if ui.button(retweet).clicked() {
                commands.push(Command::React(story.id.clone(), Reaction::Retweet));
            }
        });
    });
}

fn render_friends(
    ui: &mut egui::Ui,
    theme: &Theme,
    feed: &FriendsFeed,
    commands: &mut Vec<Command>,
) {
    if feed.is_loading() {
        return loading(ui, "friends");
    }
    let network = feed.network();

    if !network.requests.is_empty() {
        ui.heading(format!("Friend Requests ({})", network.requests.len()));
        for request in &network.requests {
            theme.card_frame().show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    avatar(ui, theme, &request.from.username, 40.0);
                    ui.vertical(|ui| {
                        ui.strong(&request.from.username);
                        ui.label(RichText::new(request.from.stack_name()).color(theme.text_muted));
                    });
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.button("Decline").clicked() {
                            commands.push(Command::Respond(request.id.clone(), Response::Decline));
                        }
                        if ui.add(theme.primary_button("Accept")).clicked() {
                            commands.push(Command::Respond(request.id.clone(), Response::Accept));
                        }
                    });
                });
            });
            ui.add_space(theme.spacing_8);
        }
        ui.add_space(theme.spacing_16);
    }

    ui.heading(format!("My Friends ({})", network.friends.len()));
    if network.friends.is_empty() {
        return empty(ui, theme, "No friends yet. Connect with developers to grow your network!");
    }
    for friend in &network.friends {
        theme.card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                avatar(ui, theme, &friend.username, 40.0);
                ui.vertical(|ui| {
                    ui.strong(&friend.username);
                    ui.label(
                        RichText::new(format!("{} • {}", friend.level_label(), friend.stack_name()))
                            .color(theme.text_muted),
                    );
                });
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("Message").clicked() {
                        commands.push(Command::Message(friend.username.clone()));
                    }
                });
            });
        });
        ui.add_space(theme.spacing_8);
    }
}
