use super::FeedState;
use crate::api::ApiClient;
use crate::context::AppContext;
use crate::error::{ClientError, Result};
use crate::event::AppEvent;
use crate::models::{Developer, FriendRequest};
use crate::notify::Severity;
use crate::session::store::SessionStore;
use crate::signal::{Resource, SignalBus};

const LOAD_FAILED: &str = "Failed to load friends";
const ACCEPTED: &str = "Friend request accepted!";
const DECLINED: &str = "Friend request declined";
const ACCEPT_FAILED: &str = "Failed to accept request";
const DECLINE_FAILED: &str = "Failed to decline request";

/// Pending requests addressed to the current user and their friends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    pub requests: Vec<FriendRequest>,
    pub friends: Vec<Developer>,
}

/// Both lists are fetched concurrently; either failing fails the load.
pub async fn load_network(api: &ApiClient) -> Result<Network> {
    let (requests, friends) = tokio::try_join!(api.friend_requests(), api.friends())?;
    Ok(Network { requests, friends })
}

#[derive(Debug, Default)]
pub struct FriendsFeed {
    state: FeedState<Network>,
}

impl FriendsFeed {
    pub fn network(&self) -> &Network {
        self.state.data()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn reload(&mut self, ctx: &AppContext) {
        let seq = self.state.begin();
        let api = ctx.api().clone();
        ctx.spawn(async move {
            let result = load_network(&api).await;
            Some(AppEvent::FriendsLoaded { seq, result })
        });
    }

    pub fn on_loaded(
        &mut self,
        seq: u64,
        result: std::result::Result<Network, ClientError>,
        session: &SessionStore,
    ) {
        self.state.settle(seq, result, session, LOAD_FAILED);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Accept,
    Decline,
}

pub async fn respond(
    session: &SessionStore,
    bus: &SignalBus,
    request_id: &str,
    response: Response,
) -> bool {
    let api = session.api();
    let (result, done, failed) = match response {
        Response::Accept => (
            api.accept_friend_request(request_id).await,
            ACCEPTED,
            ACCEPT_FAILED,
        ),
        Response::Decline => (
            api.decline_friend_request(request_id).await,
            DECLINED,
            DECLINE_FAILED,
        ),
    };

    match result {
        Ok(()) => {
            session.notify(done, Severity::Success);
            bus.refresh(Resource::Friends);
            true
        }
        Err(err) => {
            tracing::warn!(%err, request_id, ?response, "friend request response failed");
            session.notify(err.user_message(failed), Severity::Error);
            false
        }
    }
}

/// Chat is not available yet; the user is told so.
pub fn message_user(session: &SessionStore, username: &str) {
    session.notify(
        format!("Opening chat with {username}... (Feature coming soon!)"),
        Severity::Success,
    );
}
