//! Form state for the modals and the checks that run before anything is sent.

use crate::error::ValidationError;
use crate::models::{NewProject, NewStory, RegisterProfile, SkillLevel, Stack};
use crate::notify::Severity;
use crate::session::store::SessionStore;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MAX_STORY_LEN: usize = 500;

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let username = required(&self.username, "Username")?;
        if self.password.is_empty() {
            return Err(ValidationError::Missing("Password"));
        }
        Ok((username, self.password.clone()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub skill_level: Option<SkillLevel>,
    pub primary_stack: Option<Stack>,
}

impl RegistrationForm {
    /// Password checks come first, mirroring what the user sees next to the
    /// password fields.
    pub fn validate(&self) -> Result<RegisterProfile, ValidationError> {
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }

        Ok(RegisterProfile {
            username: required(&self.username, "Username")?,
            email: required(&self.email, "Email")?,
            password: self.password.clone(),
            skill_level: self
                .skill_level
                .ok_or(ValidationError::Missing("Skill level"))?,
            primary_stack: self
                .primary_stack
                .ok_or(ValidationError::Missing("Primary stack"))?,
        })
    }
}

/// Validates and submits a registration. A rejected form is reported as an
/// error notification and never reaches the network.
pub async fn submit_registration(store: &SessionStore, form: &RegistrationForm) -> bool {
    match form.validate() {
        Ok(profile) => store.register(&profile).await,
        Err(err) => {
            store.notify(err.to_string(), Severity::Error);
            false
        }
    }
}

pub async fn submit_login(store: &SessionStore, form: &LoginForm) -> bool {
    match form.validate() {
        Ok((username, password)) => store.login(&username, &password).await,
        Err(err) => {
            store.notify(err.to_string(), Severity::Error);
            false
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub technologies: String,
    pub project_link: String,
    pub demo_link: String,
}

impl ProjectForm {
    pub fn validate(&self) -> Result<NewProject, ValidationError> {
        Ok(NewProject {
            title: required(&self.title, "Title")?,
            description: required(&self.description, "Description")?,
            technologies: required(&self.technologies, "Technologies")?,
            project_link: optional(&self.project_link),
            demo_link: optional(&self.demo_link),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryForm {
    pub content: String,
    pub tags: String,
}

impl StoryForm {
    pub fn remaining(&self) -> isize {
        MAX_STORY_LEN as isize - self.content.chars().count() as isize
    }

    pub fn validate(&self) -> Result<NewStory, ValidationError> {
        if self.content.chars().count() > MAX_STORY_LEN {
            return Err(ValidationError::StoryTooLong { max: MAX_STORY_LEN });
        }
        Ok(NewStory {
            content: required(&self.content, "Story")?,
            tags: self.tags.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing;
    use crate::event::AppEvent;
    use crate::notify::Notification;
    use crate::session::storage::MemoryStorage;
    use std::sync::mpsc;
    use std::sync::Arc;

    fn registration(password: &str, confirm: &str) -> RegistrationForm {
        RegistrationForm {
            username: "kim".to_string(),
            email: "kim@example.test".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
            skill_level: Some(SkillLevel::Beginner),
            primary_stack: Some(Stack::Mern),
        }
    }

    #[test]
    fn registration_rejects_mismatched_passwords() {
        assert_eq!(
            registration("abc", "xyz").validate(),
            Err(ValidationError::PasswordMismatch)
        );
    }

    #[test]
    fn registration_rejects_short_passwords() {
        assert_eq!(
            registration("abc", "abc").validate(),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn registration_requires_pickers() {
        let mut form = registration("abcdef", "abcdef");
        form.primary_stack = None;
        assert_eq!(
            form.validate(),
            Err(ValidationError::Missing("Primary stack"))
        );
    }

    #[test]
    fn registration_builds_profile() {
        let profile = registration("abcdef", "abcdef")
            .validate()
            .expect("valid form should pass");
        assert_eq!(profile.username, "kim");
        assert_eq!(profile.skill_level, SkillLevel::Beginner);
    }

    #[tokio::test]
    async fn rejected_registration_sends_nothing() {
        let (api, transport) = testing::client();
        let (tx, rx) = mpsc::channel();
        let store = SessionStore::new(api, Arc::new(MemoryStorage::new()), tx);
        store.bootstrap();

        assert!(!submit_registration(&store, &registration("abc", "xyz")).await);

        assert!(transport.requests().is_empty());
        let events: Vec<_> = rx.try_iter().collect();
        assert!(matches!(
            events.as_slice(),
            [AppEvent::Notify(n)] if *n == Notification::error("Passwords don't match!")
        ));
    }

    #[tokio::test]
    async fn accepted_registration_reaches_the_server() {
        let (api, transport) = testing::client();
        let (tx, _rx) = mpsc::channel();
        let store = SessionStore::new(api, Arc::new(MemoryStorage::new()), tx);
        store.bootstrap();
        transport.respond(
            201,
            serde_json::json!({ "token": "t1", "user": { "username": "kim" } }),
        );

        assert!(submit_registration(&store, &registration("abcdef", "abcdef")).await);
        assert_eq!(transport.paths(), vec!["POST /auth/register"]);
        assert_eq!(store.snapshot().credential(), Some("t1"));
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            username: "  ".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(form.validate(), Err(ValidationError::Missing("Username")));
    }

    #[test]
    fn story_length_limit_is_inclusive() {
        let at_limit = StoryForm {
            content: "a".repeat(500),
            tags: String::new(),
        };
        assert!(at_limit.validate().is_ok());
        assert_eq!(at_limit.remaining(), 0);

        let over = StoryForm {
            content: "a".repeat(501),
            tags: String::new(),
        };
        assert_eq!(
            over.validate(),
            Err(ValidationError::StoryTooLong { max: 500 })
        );
        assert_eq!(over.remaining(), -1);
    }

    #[test]
    fn project_links_are_optional() {
        let form = ProjectForm {
            title: "Crate".to_string(),
            description: "A crate".to_string(),
            technologies: "Rust, egui".to_string(),
            project_link: "  ".to_string(),
            demo_link: "https://demo.example.test".to_string(),
        };
        let project = form.validate().expect("valid project");
        assert_eq!(project.project_link, None);
        assert_eq!(project.demo_link.as_deref(), Some("https://demo.example.test"));

        let missing = ProjectForm::default().validate();
        assert_eq!(missing, Err(ValidationError::Missing("Title")));
    }
}
