use serde::{Deserialize, Serialize};

use crate::state::app::AppState;
use crate::storage::{migration, Namespace};

/// Who the current actor is. Anonymous data lives in the global namespace;
/// an identified user's data lives under their own key family. The
/// transition is one-directional per login event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserSession {
    Anonymous,
    Identified { user_id: String },
}

impl UserSession {
    pub fn namespace(&self) -> Namespace {
        match self {
            UserSession::Anonymous => Namespace::Global,
            UserSession::Identified { user_id } => Namespace::User(user_id.clone()),
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            UserSession::Anonymous => None,
            UserSession::Identified { user_id } => Some(user_id.as_str()),
        }
    }
}

/// Resolve the current actor to a namespace. Consulted before every
/// diagnosis read/write.
pub fn resolve_namespace(state: &AppState) -> Namespace {
    state.resolve_namespace()
}

/// Login/registration hook: mark the session identified and reparent any
/// anonymous data onto the user. Returns whether this call performed the
/// anonymous-to-identified transition; migration itself is idempotent, so a
/// repeated login for the same user is harmless.
pub async fn identify(state: &AppState, user_id: &str) -> bool {
    let transitioned = {
        let mut session = state.session.write();
        let was_anonymous = matches!(*session, UserSession::Anonymous);
        *session = UserSession::Identified {
            user_id: user_id.to_string(),
        };
        was_anonymous
    };

    if transitioned {
        tracing::info!(user_id = user_id, "Session identified, migrating anonymous data");
    }
    migration::migrate(&state.store, user_id).await;

    transitioned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_resolves_to_global() {
        assert_eq!(UserSession::Anonymous.namespace(), Namespace::Global);
        assert!(UserSession::Anonymous.user_id().is_none());
    }

    #[test]
    fn identified_resolves_to_user_namespace() {
        let session = UserSession::Identified {
            user_id: "u1".to_string(),
        };
        assert_eq!(session.namespace(), Namespace::User("u1".to_string()));
        assert_eq!(session.user_id(), Some("u1"));
    }
}
