use crate::models::User;

pub mod storage;
pub mod store;

pub const AUTH_TOKEN_KEY: &str = "authToken";
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Who is signed in. `user` and `credential` are always both set or both
/// empty; only [`store::SessionStore`] can change them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: Option<User>,
    credential: Option<String>,
    is_loading: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            user: None,
            credential: None,
            is_loading: true,
        }
    }
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[cfg(test)]
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    fn populate(&mut self, user: User, credential: String) {
        self.user = Some(user);
        self.credential = Some(credential);
    }

    fn clear(&mut self) {
        self.user = None;
        self.credential = None;
    }
}
