use super::FeedState;
use crate::context::AppContext;
use crate::error::ClientError;
use crate::event::AppEvent;
use crate::forms::ProjectForm;
use crate::models::Project;
use crate::notify::Severity;
use crate::session::store::SessionStore;
use crate::signal::{Resource, SignalBus};

const LOAD_FAILED: &str = "Failed to load projects";
const ADDED: &str = "Project added successfully!";
const ADD_FAILED: &str = "Failed to add project";

#[derive(Debug, Default)]
pub struct ProjectsFeed {
    state: FeedState<Vec<Project>>,
}

impl ProjectsFeed {
    pub fn projects(&self) -> &[Project] {
        self.state.data()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn reload(&mut self, ctx: &AppContext) {
        let seq = self.state.begin();
        let api = ctx.api().clone();
        ctx.spawn(async move {
            let result = api.projects().await;
            Some(AppEvent::ProjectsLoaded { seq, result })
        });
    }

    pub fn on_loaded(
        &mut self,
        seq: u64,
        result: Result<Vec<Project>, ClientError>,
        session: &SessionStore,
    ) {
        self.state.settle(seq, result, session, LOAD_FAILED);
    }
}

pub async fn submit_project(session: &SessionStore, bus: &SignalBus, form: &ProjectForm) -> bool {
    let project = match form.validate() {
        Ok(project) => project,
        Err(err) => {
            session.notify(err.to_string(), Severity::Error);
            return false;
        }
    };

    match session.api().create_project(&project).await {
        Ok(()) => {
            tracing::info!(title = %project.title, "project added");
            session.notify(ADDED, Severity::Success);
            bus.refresh(Resource::Projects);
            true
        }
        Err(err) => {
            tracing::warn!(%err, "failed to add project");
            session.notify(err.user_message(ADD_FAILED), Severity::Error);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::submit_project;
    use crate::feed::fixtures::Harness;
    use crate::forms::ProjectForm;
    use crate::notify::Notification;
    use crate::signal::{Resource, Signal};
    use serde_json::json;

    fn form() -> ProjectForm {
        ProjectForm {
            title: "InstaDev".to_string(),
            description: "A community client".to_string(),
            technologies: "Rust, egui".to_string(),
            project_link: String::new(),
            demo_link: String::new(),
        }
    }

    #[tokio::test]
    async fn submit_posts_raw_technologies_and_refreshes() {
        let mut h = Harness::new();
        h.transport.respond(201, json!({ "_id": "p1" }));

        assert!(submit_project(&h.session, &h.bus, &form()).await);

        let requests = h.transport.requests();
        assert_eq!(requests[0].path, "/projects");
        assert_eq!(
            requests[0].body,
            Some(json!({
                "title": "InstaDev",
                "description": "A community client",
                "technologies": "Rust, egui"
            }))
        );
        assert_eq!(
            h.notifications(),
            vec![Notification::success("Project added successfully!")]
        );
        assert_eq!(h.signals(), vec![Signal::Refresh(Resource::Projects)]);
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        let h = Harness::new();
        let mut incomplete = form();
        incomplete.description.clear();

        assert!(!submit_project(&h.session, &h.bus, &incomplete).await);

        assert!(h.transport.requests().is_empty());
        assert_eq!(
            h.notifications(),
            vec![Notification::error("Description is required")]
        );
    }

    #[tokio::test]
    async fn server_rejection_is_reported() {
        let mut h = Harness::new();
        h.transport.respond(500, json!({}));

        assert!(!submit_project(&h.session, &h.bus, &form()).await);

        assert_eq!(
            h.notifications(),
            vec![Notification::error("Failed to add project")]
        );
        assert!(h.signals().is_empty());
    }
}
