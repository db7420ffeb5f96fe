use super::FeedState;
use crate::api::routes::DeveloperFilter;
use crate::context::AppContext;
use crate::error::ClientError;
use crate::event::AppEvent;
use crate::models::Developer;
use crate::notify::Severity;
use crate::session::store::SessionStore;
use crate::signal::{Resource, SignalBus};

const LOAD_FAILED: &str = "Failed to load developers";
const REQUEST_SENT: &str = "Friend request sent!";
const REQUEST_FAILED: &str = "Failed to send friend request";

/// The online-developer directory and its filters.
#[derive(Debug, Default)]
pub struct DevelopersFeed {
    state: FeedState<Vec<Developer>>,
    filter: DeveloperFilter,
}

impl DevelopersFeed {
    pub fn developers(&self) -> &[Developer] {
        self.state.data()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn filter(&self) -> &DeveloperFilter {
        &self.filter
    }

    /// Replaces the filter; returns true when it changed and a reload is due.
    pub fn set_filter(&mut self, filter: DeveloperFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        true
    }

    pub fn reload(&mut self, ctx: &AppContext) {
        let seq = self.state.begin();
        let api = ctx.api().clone();
        let filter = self.filter.clone();
        ctx.spawn(async move {
            let result = api.online_developers(&filter).await;
            Some(AppEvent::DevelopersLoaded { seq, result })
        });
    }

    #[cfg(test)]
    pub(crate) fn latest_seq(&self) -> u64 {
        self.state.latest()
    }

    pub fn on_loaded(
        &mut self,
        seq: u64,
        result: Result<Vec<Developer>, ClientError>,
        session: &SessionStore,
    ) {
        self.state.settle(seq, result, session, LOAD_FAILED);
    }
}

pub async fn connect(session: &SessionStore, bus: &SignalBus, user_id: &str) -> bool {
    match session.api().send_friend_request(user_id).await {
        Ok(()) => {
            session.notify(REQUEST_SENT, Severity::Success);
            bus.refresh(Resource::Developers);
            true
        }
        Err(err) => {
            tracing::warn!(%err, user_id, "friend request failed");
            session.notify(err.user_message(REQUEST_FAILED), Severity::Error);
            false
        }
    }
}
