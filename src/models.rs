//! Records exchanged with the InstaDev API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity of the signed-in user. Only `username` is required; unknown
/// fields are kept so a persisted snapshot round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_stack: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterProfile {
    pub username: String,
    pub email: String,
    pub password: String,
    pub skill_level: SkillLevel,
    pub primary_stack: Stack,
}

/// A developer as listed in the directory and the friends list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub skill_level: Option<String>,
    #[serde(default)]
    pub primary_stack: Option<String>,
}

impl Developer {
    pub fn stack_name(&self) -> &'static str {
        stack_name(self.primary_stack.as_deref())
    }

    pub fn level_label(&self) -> String {
        capitalize_first(self.skill_level.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FriendRequest {
    #[serde(alias = "_id")]
    pub id: String,
    pub from: Developer,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub author: Author,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub project_link: Option<String>,
    #[serde(default)]
    pub demo_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    /// Comma-separated, split by the server.
    pub technologies: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    #[serde(alias = "_id")]
    pub id: String,
    pub author: Author,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub retweets: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Story {
    pub fn is_liked_by(&self, user_id: Option<&str>) -> bool {
        user_id.is_some_and(|id| self.likes.iter().any(|like| like == id))
    }

    pub fn is_retweeted_by(&self, user_id: Option<&str>) -> bool {
        user_id.is_some_and(|id| self.retweets.iter().any(|retweet| retweet == id))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewStory {
    pub content: String,
    pub tags: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub const ALL: [SkillLevel; 4] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stack {
    Mern,
    Mean,
    Django,
    Rails,
    Php,
    Dotnet,
    Java,
    Other,
}

impl Stack {
    pub const ALL: [Stack; 8] = [
        Self::Mern,
        Self::Mean,
        Self::Django,
        Self::Rails,
        Self::Php,
        Self::Dotnet,
        Self::Java,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mern => "mern",
            Self::Mean => "mean",
            Self::Django => "django",
            Self::Rails => "rails",
            Self::Php => "php",
            Self::Dotnet => "dotnet",
            Self::Java => "java",
            Self::Other => "other",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Mern => "MERN Stack",
            Self::Mean => "MEAN Stack",
            Self::Django => "Django/Python",
            Self::Rails => "Ruby on Rails",
            Self::Php => "PHP/Laravel",
            Self::Dotnet => ".NET",
            Self::Java => "Java/Spring",
            Self::Other => "Other",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|stack| stack.as_str() == raw)
    }
}

/// Display name for a stack identifier; anything unrecognised is "Other".
pub fn stack_name(raw: Option<&str>) -> &'static str {
    raw.and_then(Stack::parse)
        .unwrap_or(Stack::Other)
        .display_name()
}

pub fn capitalize_first(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Coarse relative time used on story cards.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - then).num_seconds().max(0);
    match seconds {
        0..=59 => "Just now".to_string(),
        60..=3599 => format!("{}m ago", seconds / 60),
        3600..=86399 => format!("{}h ago", seconds / 3600),
        _ => format!("{}d ago", seconds / 86400),
    }
}
