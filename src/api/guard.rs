//! Authorization checks consulted by handlers.

use tracing::warn;

use super::error::ApiError;
use crate::db::{Simulator, User};

pub fn is_admin(user: Option<&User>) -> bool {
    user.is_some_and(User::is_admin)
}

/// Only admins may pass.
pub fn require_admin(sim: &Simulator) -> Result<(), ApiError> {
    let user = sim.current_user();
    if is_admin(user) {
        return Ok(());
    }

    warn!(
        user_id = user.map(|u| u.id.as_str()),
        "Admin role required"
    );
    Err(ApiError::forbidden())
}

/// The target user themselves, or any admin, may pass.
pub fn require_self_or_admin(sim: &Simulator, target_id: &str) -> Result<(), ApiError> {
    let user = sim.current_user();
    if user.is_some_and(|u| u.id == target_id) || is_admin(user) {
        return Ok(());
    }

    warn!(
        user_id = user.map(|u| u.id.as_str()),
        target_id, "Only the user or an admin may edit this profile"
    );
    Err(ApiError::forbidden())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ErrorCode;
    use crate::config::SimulatorConfig;

    fn sim_as(user_id: Option<&str>) -> Simulator {
        let mut sim = Simulator::new(&SimulatorConfig::default());
        if let Some(id) = user_id {
            sim.session.login(id);
        }
        sim
    }

    #[test]
    fn test_require_admin() {
        assert!(require_admin(&sim_as(Some("1"))).is_ok());

        let err = require_admin(&sim_as(Some("3"))).unwrap_err();
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert!(require_admin(&sim_as(None)).is_err());
    }

    #[test]
    fn test_require_self_or_admin() {
        assert!(require_self_or_admin(&sim_as(Some("3")), "3").is_ok());
        assert!(require_self_or_admin(&sim_as(Some("1")), "3").is_ok());
        assert!(require_self_or_admin(&sim_as(Some("4")), "3").is_err());
        assert!(require_self_or_admin(&sim_as(None), "3").is_err());
    }

    #[test]
    fn test_stale_session_is_not_admin() {
        let mut sim = sim_as(Some("1"));
        sim.users.remove_by_id("1");
        assert!(require_admin(&sim).is_err());
    }
}
