use super::FeedState;
use crate::context::AppContext;
use crate::error::ClientError;
use crate::event::AppEvent;
use crate::forms::StoryForm;
use crate::models::Story;
use crate::notify::Severity;
use crate::session::store::SessionStore;
use crate::signal::{Resource, SignalBus};

const LOAD_FAILED: &str = "Failed to load stories";
const SHARED: &str = "Story shared successfully!";
const SHARE_FAILED: &str = "Failed to share story";
const LIKE_FAILED: &str = "Failed to update like";
const RETWEET_FAILED: &str = "Failed to update retweet";

#[derive(Debug, Default)]
pub struct StoriesFeed {
    state: FeedState<Vec<Story>>,
}

impl StoriesFeed {
    pub fn stories(&self) -> &[Story] {
        self.state.data()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn reload(&mut self, ctx: &AppContext) {
        let seq = self.state.begin();
        let api = ctx.api().clone();
        ctx.spawn(async move {
            let result = api.stories().await;
            Some(AppEvent::StoriesLoaded { seq, result })
        });
    }

    pub fn on_loaded(
        &mut self,
        seq: u64,
        result: Result<Vec<Story>, ClientError>,
        session: &SessionStore,
    ) {
        self.state.settle(seq, result, session, LOAD_FAILED);
    }
}

/// Over-long content is rejected here and never sent.
pub async fn submit_story(session: &SessionStore, bus: &SignalBus, form: &StoryForm) -> bool {
    let story = match form.validate() {
        Ok(story) => story,
        Err(err) => {
            session.notify(err.to_string(), Severity::Error);
            return false;
        }
    };

    match session.api().create_story(&story).await {
        Ok(()) => {
            session.notify(SHARED, Severity::Success);
            bus.refresh(Resource::Stories);
            true
        }
        Err(err) => {
            tracing::warn!(%err, "failed to share story");
            session.notify(err.user_message(SHARE_FAILED), Severity::Error);
            false
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaction {
    Like,
    Retweet,
}

impl Reaction {
    fn failure(self) -> &'static str {
        match self {
            Self::Like => LIKE_FAILED,
            Self::Retweet => RETWEET_FAILED,
        }
    }
}

/// Flips the current user's like or retweet on a story. The server owns the
/// toggle; the list is refreshed rather than patched locally.
pub async fn toggle(
    session: &SessionStore,
    bus: &SignalBus,
    story_id: &str,
    reaction: Reaction,
) -> bool {
    let api = session.api();
    let result = match reaction {
        Reaction::Like => api.toggle_like(story_id).await,
        Reaction::Retweet => api.toggle_retweet(story_id).await,
    };

    match result {
        Ok(()) => {
            bus.refresh(Resource::Stories);
            true
        }
        Err(err) => {
            tracing::warn!(%err, story_id, ?reaction, "reaction failed");
            session.notify(reaction.failure(), Severity::Error);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{submit_story, toggle, Reaction};
    use crate::feed::fixtures::Harness;
    use crate::forms::StoryForm;
    use crate::notify::Notification;
    use crate::signal::{Resource, Signal};
    use serde_json::json;

    #[tokio::test]
    async fn over_long_story_is_rejected_without_request() {
        let mut h = Harness::new();
        let form = StoryForm {
            content: "x".repeat(501),
            tags: String::new(),
        };

        assert!(!submit_story(&h.session, &h.bus, &form).await);

        assert!(h.transport.requests().is_empty());
        assert_eq!(
            h.notifications(),
            vec![Notification::error("Story must be 500 characters or less!")]
        );
        assert!(h.signals().is_empty());
    }

    #[tokio::test]
    async fn shared_story_refreshes_feed() {
        let mut h = Harness::new();
        h.transport.respond(201, json!({ "_id": "s1" }));
        let form = StoryForm {
            content: "Shipped it".to_string(),
            tags: "rust, release".to_string(),
        };

        assert!(submit_story(&h.session, &h.bus, &form).await);

        let requests = h.transport.requests();
        assert_eq!(
            requests[0].body,
            Some(json!({ "content": "Shipped it", "tags": "rust, release" }))
        );
        assert_eq!(
            h.notifications(),
            vec![Notification::success("Story shared successfully!")]
        );
        assert_eq!(h.signals(), vec![Signal::Refresh(Resource::Stories)]);
    }

    #[tokio::test]
    async fn reactions_hit_their_endpoints() {
        let mut h = Harness::new();
        h.transport.respond(200, json!({}));
        h.transport.respond(200, json!({}));

        assert!(toggle(&h.session, &h.bus, "s1", Reaction::Like).await);
        assert!(toggle(&h.session, &h.bus, "s1", Reaction::Retweet).await);

        assert_eq!(
            h.transport.paths(),
            vec!["POST /stories/s1/like", "POST /stories/s1/retweet"]
        );
        assert_eq!(h.signals().len(), 2);
        assert!(h.notifications().is_empty());
    }

    #[tokio::test]
    async fn failed_retweet_reports_fixed_message() {
        let h = Harness::new();
        h.transport.respond(500, json!({ "message": "boom" }));

        assert!(!toggle(&h.session, &h.bus, "s1", Reaction::Retweet).await);
        assert_eq!(
            h.notifications(),
            vec![Notification::error("Failed to update retweet")]
        );
    }
}
