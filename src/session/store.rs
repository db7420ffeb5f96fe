//! The single authority over the signed-in session.
//!
//! Every auth-related network call goes through [`SessionStore`]. It is the
//! only writer of the in-memory [`Session`], of the persisted
//! `authToken`/`currentUser` pair and of the API client's bearer header, and
//! it keeps the three in step: populated together on login, register or
//! bootstrap, cleared together on logout or when the persisted snapshot is
//! unreadable. Failures never escape as errors; they become a `false` result
//! plus an error notification.

use super::storage::CredentialStorage;
use super::{Session, AUTH_TOKEN_KEY, CURRENT_USER_KEY};
use crate::api::ApiClient;
use crate::error::{ClientError, Result};
use crate::event::AppEvent;
use crate::models::{AuthResponse, Credentials, RegisterProfile, User};
use crate::notify::{Notification, Severity};
use parking_lot::RwLock;
use std::sync::mpsc::Sender;
use std::sync::Arc;

const LOGIN_FAILED: &str = "Login failed";
const LOGIN_SUCCEEDED: &str = "Welcome back!";
const REGISTER_FAILED: &str = "Registration failed";
const REGISTER_SUCCEEDED: &str = "Account created!";

pub struct SessionStore {
    session: RwLock<Session>,
    api: ApiClient,
    storage: Arc<dyn CredentialStorage>,
    events: Sender<AppEvent>,
}

impl SessionStore {
    pub fn new(
        api: ApiClient,
        storage: Arc<dyn CredentialStorage>,
        events: Sender<AppEvent>,
    ) -> Self {
        Self {
            session: RwLock::new(Session::default()),
            api,
            storage,
            events,
        }
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> Session {
        self.session.read().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.session.read().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn is_loading(&self) -> bool {
        self.session.read().is_loading()
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Restores the persisted session. Runs once, before the first frame.
    /// The stored token is trusted as-is; a stale one surfaces on the next
    /// authorized call.
    pub fn bootstrap(&self) {
        match self.read_persisted() {
            Ok(Some((credential, user))) => {
                tracing::info!(username = %user.username, "restored persisted session");
                self.api.set_bearer(Some(credential.clone()));
                self.session.write().populate(user, credential);
            }
            Ok(None) => tracing::debug!("no persisted session"),
            Err(err) => {
                tracing::warn!(%err, "discarding unreadable persisted session");
                self.clear_persisted();
            }
        }
        self.session.write().is_loading = false;
    }

    pub async fn login(&self, username: &str, password: &str) -> bool {
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        match self.api.login(&credentials).await {
            Ok(response) => {
                self.establish(response, LOGIN_SUCCEEDED);
                true
            }
            Err(err) => {
                tracing::warn!(%err, username, "login failed");
                self.notify(err.user_message(LOGIN_FAILED), Severity::Error);
                false
            }
        }
    }

    /// Submits an already validated profile.
    pub async fn register(&self, profile: &RegisterProfile) -> bool {
        match self.api.register(profile).await {
            Ok(response) => {
                self.establish(response, REGISTER_SUCCEEDED);
                true
            }
            Err(err) => {
                tracing::warn!(%err, username = %profile.username, "registration failed");
                self.notify(err.user_message(REGISTER_FAILED), Severity::Error);
                false
            }
        }
    }

    /// Always ends signed out, whatever the server says.
    pub async fn logout(&self) {
        if self.api.has_bearer() {
            if let Err(err) = self.api.logout().await {
                tracing::warn!(%err, "server logout failed");
            }
        }

        self.session.write().clear();
        self.clear_persisted();
        self.api.set_bearer(None);
        tracing::info!("signed out");
    }

    pub fn notify(&self, message: impl Into<String>, severity: Severity) {
        let notification = Notification {
            message: message.into(),
            severity,
        };
        if self.events.send(AppEvent::Notify(notification)).is_err() {
            tracing::debug!("notification dropped: ui is gone");
        }
    }

    fn establish(&self, response: AuthResponse, fallback_message: &str) {
        let AuthResponse {
            token,
            user,
            message,
        } = response;

        match serde_json::to_string(&user) {
            Ok(snapshot) => {
                if let Err(err) = self.storage.set_all(&[
                    (AUTH_TOKEN_KEY, token.as_str()),
                    (CURRENT_USER_KEY, snapshot.as_str()),
                ]) {
                    tracing::warn!(%err, "failed to persist session");
                }
            }
            Err(err) => tracing::warn!(%err, "failed to serialize user snapshot"),
        }

        tracing::info!(username = %user.username, "signed in");
        self.api.set_bearer(Some(token.clone()));
        self.session.write().populate(user, token);

        let message = message
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| fallback_message.to_string());
        self.notify(message, Severity::Success);
    }

    fn read_persisted(&self) -> Result<Option<(String, User)>> {
        let credential = self.storage.get(AUTH_TOKEN_KEY)?.filter(|v| !v.is_empty());
        let snapshot = self.storage.get(CURRENT_USER_KEY)?.filter(|v| !v.is_empty());
        let (Some(credential), Some(snapshot)) = (credential, snapshot) else {
            return Ok(None);
        };

        let user: User = serde_json::from_str(&snapshot).map_err(|err| {
            ClientError::storage(format!("corrupt {CURRENT_USER_KEY} snapshot: {err}"))
        })?;
        Ok(Some((credential, user)))
    }

    fn clear_persisted(&self) {
        if let Err(err) = self.storage.remove_all(&[AUTH_TOKEN_KEY, CURRENT_USER_KEY]) {
            tracing::warn!(%err, "failed to clear persisted session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::SessionStore;
    use crate::api::testing::{self, FakeTransport};
    use crate::error::ClientError;
    use crate::event::AppEvent;
    use crate::models::{RegisterProfile, SkillLevel, Stack};
    use crate::notify::{Notification, Severity};
    use crate::session::storage::{CredentialStorage, MemoryStorage};
    use crate::session::{AUTH_TOKEN_KEY, CURRENT_USER_KEY};
    use serde_json::json;
    use std::sync::mpsc::{self, Receiver};
    use std::sync::Arc;

    struct Harness {
        store: SessionStore,
        transport: Arc<FakeTransport>,
        storage: Arc<MemoryStorage>,
        rx: Receiver<AppEvent>,
    }

    impl Harness {
        fn new(storage: MemoryStorage) -> Self {
            let (api, transport) = testing::client();
            let storage = Arc::new(storage);
            let (tx, rx) = mpsc::channel();
            let store = SessionStore::new(api, storage.clone(), tx);
            Self {
                store,
                transport,
                storage,
                rx,
            }
        }

        fn notifications(&self) -> Vec<Notification> {
            self.rx
                .try_iter()
                .filter_map(|event| match event {
                    AppEvent::Notify(notification) => Some(notification),
                    _ => None,
                })
                .collect()
        }

        fn persisted(&self, key: &str) -> Option<String> {
            self.storage.get(key).expect("memory storage never fails")
        }
    }

    fn profile(password: &str) -> RegisterProfile {
        RegisterProfile {
            username: "kim".to_string(),
            email: "kim@example.test".to_string(),
            password: password.to_string(),
            skill_level: SkillLevel::Intermediate,
            primary_stack: Stack::Rails,
        }
    }

    #[tokio::test]
    async fn login_populates_session_storage_and_header() {
        let harness = Harness::new(MemoryStorage::new());
        harness.store.bootstrap();
        harness.transport.respond(
            200,
            json!({
                "token": "t1",
                "user": { "id": "u1", "username": "kim", "primaryStack": "rails" },
                "message": "Login successful"
            }),
        );

        assert!(harness.store.login("kim", "secret").await);

        let session = harness.store.snapshot();
        assert_eq!(session.credential(), Some("t1"));
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("kim"));
        assert_eq!(harness.store.api().bearer().as_deref(), Some("t1"));
        assert_eq!(harness.persisted(AUTH_TOKEN_KEY).as_deref(), Some("t1"));
        assert!(harness
            .persisted(CURRENT_USER_KEY)
            .expect("user should be persisted")
            .contains("\"username\":\"kim\""));
        assert_eq!(
            harness.notifications(),
            vec![Notification::success("Login successful")]
        );

        let requests = harness.transport.requests();
        assert_eq!(requests[0].path, "/auth/login");
        assert_eq!(requests[0].bearer, None);
        assert_eq!(
            requests[0].body,
            Some(json!({ "username": "kim", "password": "secret" }))
        );
    }

    #[tokio::test]
    async fn failed_login_leaves_existing_session_untouched() {
        let harness = Harness::new(MemoryStorage::new());
        harness.store.bootstrap();
        harness.transport.respond(
            200,
            json!({ "token": "t1", "user": { "username": "kim" } }),
        );
        assert!(harness.store.login("kim", "secret").await);
        let before = harness.store.snapshot();
        let _ = harness.notifications();

        harness
            .transport
            .respond(401, json!({ "message": "Invalid credentials" }));
        assert!(!harness.store.login("kim", "wrong").await);

        assert_eq!(harness.store.snapshot(), before);
        assert_eq!(harness.persisted(AUTH_TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(
            harness.notifications(),
            vec![Notification::error("Invalid credentials")]
        );
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_message() {
        let harness = Harness::new(MemoryStorage::new());
        harness.store.bootstrap();
        harness
            .transport
            .fail(ClientError::Transport("connection refused".to_string()));

        assert!(!harness.store.login("kim", "secret").await);

        assert!(!harness.store.is_authenticated());
        assert!(harness.storage.is_empty());
        assert_eq!(harness.notifications(), vec![Notification::error("Login failed")]);
    }

    #[tokio::test]
    async fn register_success_establishes_session() {
        let harness = Harness::new(MemoryStorage::new());
        harness.store.bootstrap();
        harness.transport.respond(
            201,
            json!({ "token": "t1", "user": { "username": "kim" } }),
        );

        assert!(harness.store.register(&profile("abcdef")).await);

        let session = harness.store.snapshot();
        assert_eq!(session.credential(), Some("t1"));
        assert_eq!(session.user().map(|u| u.username.as_str()), Some("kim"));
        assert_eq!(harness.persisted(AUTH_TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(
            harness.persisted(CURRENT_USER_KEY).as_deref(),
            Some(r#"{"username":"kim"}"#)
        );
        let notifications = harness.notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].severity, Severity::Success);
        assert_eq!(harness.transport.paths(), vec!["POST /auth/register"]);
    }

    #[tokio::test]
    async fn failed_register_reports_fallback_message() {
        let harness = Harness::new(MemoryStorage::new());
        harness.store.bootstrap();
        harness.transport.respond(500, json!(null));

        assert!(!harness.store.register(&profile("abcdef")).await);

        assert!(!harness.store.is_authenticated());
        assert_eq!(
            harness.notifications(),
            vec![Notification::error("Registration failed")]
        );
    }

    #[tokio::test]
    async fn logout_clears_everything_even_when_server_fails() {
        let harness = Harness::new(MemoryStorage::with_entries(&[
            (AUTH_TOKEN_KEY, "t1"),
            (CURRENT_USER_KEY, r#"{"username":"kim"}"#),
        ]));
        harness.store.bootstrap();
        assert!(harness.store.is_authenticated());
        harness
            .transport
            .fail(ClientError::Transport("connection reset".to_string()));

        harness.store.logout().await;

        assert!(!harness.store.is_authenticated());
        assert!(harness.store.user().is_none());
        assert!(harness.storage.is_empty());
        assert_eq!(harness.store.api().bearer(), None);
        let requests = harness.transport.requests();
        assert_eq!(requests[0].path, "/auth/logout");
        assert_eq!(requests[0].bearer.as_deref(), Some("t1"));
        assert!(harness.notifications().is_empty());
    }

    #[tokio::test]
    async fn logout_without_credential_skips_the_server() {
        let harness = Harness::new(MemoryStorage::new());
        harness.store.bootstrap();

        harness.store.logout().await;

        assert!(harness.transport.requests().is_empty());
        assert!(!harness.store.is_authenticated());
    }

    #[tokio::test]
    async fn bootstrap_matches_a_fresh_login() {
        let logged_in = Harness::new(MemoryStorage::new());
        logged_in.store.bootstrap();
        logged_in.transport.respond(
            200,
            json!({ "token": "t1", "user": { "id": "u1", "username": "kim" } }),
        );
        assert!(logged_in.store.login("kim", "secret").await);

        let restored = Harness::new(MemoryStorage::with_entries(&[
            (AUTH_TOKEN_KEY, "t1"),
            (CURRENT_USER_KEY, r#"{"id":"u1","username":"kim"}"#),
        ]));
        assert!(restored.store.is_loading());
        restored.store.bootstrap();

        assert!(!restored.store.is_loading());
        assert_eq!(restored.store.snapshot(), logged_in.store.snapshot());
        assert_eq!(restored.store.api().bearer().as_deref(), Some("t1"));
        assert!(restored.transport.requests().is_empty());
    }

    #[test]
    fn bootstrap_discards_corrupt_snapshot() {
        let harness = Harness::new(MemoryStorage::with_entries(&[
            (AUTH_TOKEN_KEY, "t1"),
            (CURRENT_USER_KEY, "{not json"),
        ]));

        harness.store.bootstrap();

        assert!(!harness.store.is_loading());
        assert!(!harness.store.is_authenticated());
        assert!(harness.storage.is_empty());
        assert_eq!(harness.store.api().bearer(), None);
    }

    #[test]
    fn bootstrap_ignores_a_lone_token() {
        let harness = Harness::new(MemoryStorage::with_entries(&[(AUTH_TOKEN_KEY, "t1")]));

        harness.store.bootstrap();

        assert!(!harness.store.is_loading());
        assert!(!harness.store.is_authenticated());
        assert_eq!(harness.persisted(AUTH_TOKEN_KEY).as_deref(), Some("t1"));
    }
}
