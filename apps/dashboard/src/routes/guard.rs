use crate::session::SessionState;

/// Guard decision for nested dashboard routes, derived from the session alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Authenticated,
    Unauthenticated,
}

impl GuardState {
    pub fn evaluate(session: &SessionState) -> GuardState {
        if session.is_loading {
            GuardState::Loading
        } else if session.user.is_some() {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        }
    }
}
