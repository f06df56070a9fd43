// Session state.
// The signed-in user as loaded by the background worker, plus logout progress.

use crate::api::{LoginUser, Role};

use super::loading::LoadingState;

#[derive(Debug, Default)]
pub struct SessionState {
    /// `Loaded(None)` means the server reported no session.
    pub user: LoadingState<Option<LoginUser>>,
    pub logout_in_flight: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user(&self) -> Option<&LoginUser> {
        self.user.data().and_then(Option::as_ref)
    }

    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.admin)
    }

    /// Signed in, and not the single-user desktop role.
    pub fn user_menu_visible(&self) -> bool {
        self.user()
            .is_some_and(|user| user.role_code != Role::Desktop)
    }

    pub fn set_user(&mut self, user: Option<LoginUser>) {
        self.user = LoadingState::Loaded(user);
    }

    pub fn clear(&mut self) {
        self.user = LoadingState::Loaded(None);
        self.logout_in_flight = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(admin: bool, role_code: Role) -> LoginUser {
        LoginUser {
            id: Some(1),
            nick_name: Some("dba".to_string()),
            admin,
            role_code,
        }
    }

    #[test]
    fn test_logged_out_has_no_menu() {
        let mut session = SessionState::new();
        assert!(!session.user_menu_visible());
        session.set_user(None);
        assert!(!session.user_menu_visible());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_desktop_role_never_gets_menu() {
        let mut session = SessionState::new();
        session.set_user(Some(user(true, Role::Desktop)));
        assert!(session.is_admin());
        assert!(!session.user_menu_visible());

        session.set_user(Some(user(false, Role::Desktop)));
        assert!(!session.user_menu_visible());
    }

    #[test]
    fn test_regular_users_get_menu() {
        let mut session = SessionState::new();
        session.set_user(Some(user(false, Role::User)));
        assert!(session.user_menu_visible());

        session.set_user(Some(user(true, Role::Admin)));
        assert!(session.user_menu_visible());

        session.clear();
        assert!(session.user().is_none());
    }
}
