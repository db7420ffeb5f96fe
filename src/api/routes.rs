//! Typed calls for every endpoint the client uses.

use super::ApiClient;
use crate::error::Result;
use crate::models::{
    AuthResponse, Credentials, Developer, FriendRequest, NewProject, NewStory, Project,
    RegisterProfile, Story,
};
use serde_json::Value;

/// Directory filters; empty values are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeveloperFilter {
    pub skill_level: Option<String>,
    pub primary_stack: Option<String>,
}

impl DeveloperFilter {
    pub fn query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(level) = self.skill_level.as_deref().filter(|v| !v.is_empty()) {
            query.push(("skillLevel".to_string(), level.to_string()));
        }
        if let Some(stack) = self.primary_stack.as_deref().filter(|v| !v.is_empty()) {
            query.push(("primaryStack".to_string(), stack.to_string()));
        }
        query
    }
}

impl ApiClient {
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        self.post("/auth/login", credentials).await
    }

    pub async fn register(&self, profile: &RegisterProfile) -> Result<AuthResponse> {
        self.post("/auth/register", profile).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.post_empty("/auth/logout", None).await
    }

    pub async fn online_developers(&self, filter: &DeveloperFilter) -> Result<Vec<Developer>> {
        self.get("/users/online", filter.query()).await
    }

    pub async fn send_friend_request(&self, user_id: &str) -> Result<()> {
        self.post_empty(&format!("/friends/request/{user_id}"), None).await
    }

    pub async fn friend_requests(&self) -> Result<Vec<FriendRequest>> {
        self.get("/friends/requests", Vec::new()).await
    }

    pub async fn accept_friend_request(&self, request_id: &str) -> Result<()> {
        self.post_empty(&format!("/friends/accept/{request_id}"), None).await
    }

    pub async fn decline_friend_request(&self, request_id: &str) -> Result<()> {
        self.post_empty(&format!("/friends/decline/{request_id}"), None).await
    }

    pub async fn friends(&self) -> Result<Vec<Developer>> {
        self.get("/friends", Vec::new()).await
    }

    pub async fn projects(&self) -> Result<Vec<Project>> {
        self.get("/projects", Vec::new()).await
    }

    pub async fn create_project(&self, project: &NewProject) -> Result<()> {
        let _: Value = self.post("/projects", project).await?;
        Ok(())
    }

    pub async fn stories(&self) -> Result<Vec<Story>> {
        self.get("/stories", Vec::new()).await
    }

    pub async fn create_story(&self, story: &NewStory) -> Result<()> {
        let _: Value = self.post("/stories", story).await?;
        Ok(())
    }

    pub async fn toggle_like(&self, story_id: &str) -> Result<()> {
        self.post_empty(&format!("/stories/{story_id}/like"), None).await
    }

    pub async fn toggle_retweet(&self, story_id: &str) -> Result<()> {
        self.post_empty(&format!("/stories/{story_id}/retweet"), None).await
    }
}
