use crate::error::ClientError;
use crate::feed::friends::Network;
use crate::modal::ModalKind;
use crate::models::{Developer, Project, Story};
use crate::notify::Notification;

/// Messages sent from runtime tasks to the UI thread.
#[derive(Debug, Clone)]
pub enum AppEvent {
    Notify(Notification),
    /// A login or register attempt finished; `kind` says which form sent it.
    AuthFinished {
        kind: ModalKind,
        success: bool,
    },
    LoggedOut,
    DevelopersLoaded {
        seq: u64,
        result: Result<Vec<Developer>, ClientError>,
    },
    ProjectsLoaded {
        seq: u64,
        result: Result<Vec<Project>, ClientError>,
    },
    StoriesLoaded {
        seq: u64,
        result: Result<Vec<Story>, ClientError>,
    },
    FriendsLoaded {
        seq: u64,
        result: Result<Network, ClientError>,
    },
    /// A project or story form finished submitting.
    FormSubmitted {
        kind: ModalKind,
        success: bool,
    },
}
