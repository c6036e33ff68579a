//! The single simulated browser session.

/// Tracks which user (by id) is logged in. The user store owns the record;
/// the session only remembers who to look up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, user_id: impl Into<String>) {
        self.user_id = Some(user_id.into());
    }

    /// Clear the session, returning who was logged in (if anyone).
    pub fn logout(&mut self) -> Option<String> {
        self.user_id.take()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_active(&self) -> bool {
        self.user_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_logout() {
        let mut session = Session::new();
        assert!(!session.is_active());

        session.login("3");
        assert_eq!(session.user_id(), Some("3"));

        assert_eq!(session.logout().as_deref(), Some("3"));
        assert!(!session.is_active());
        assert!(session.logout().is_none());
    }
}
