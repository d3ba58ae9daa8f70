use parking_lot::RwLock;
use std::sync::Arc;

use crate::catalog::BlockCatalog;
use crate::state::session::UserSession;
use crate::storage::store::KvStore;
use crate::storage::Namespace;

/// Application-wide state container.
/// All mutable state is centralized here and passed explicitly to functions.
#[derive(Clone)]
pub struct AppState {
    /// Immutable diagnosis catalog, loaded once.
    pub catalog: Arc<BlockCatalog>,
    /// Backing key-value store.
    pub store: KvStore,
    /// Who the current actor is; decides which namespace storage targets.
    pub session: Arc<RwLock<UserSession>>,
}

impl AppState {
    /// State over the built-in catalog, starting anonymous.
    pub fn new(store: KvStore) -> Self {
        Self::with_catalog(store, BlockCatalog::builtin())
    }

    /// State over an explicit catalog.
    pub fn with_catalog(store: KvStore, catalog: BlockCatalog) -> Self {
        AppState {
            catalog: Arc::new(catalog),
            store,
            session: Arc::new(RwLock::new(UserSession::Anonymous)),
        }
    }

    pub fn current_session(&self) -> UserSession {
        self.session.read().clone()
    }

    pub fn set_session(&self, session: UserSession) {
        *self.session.write() = session;
    }

    /// Namespace every storage read/write should currently target.
    pub fn resolve_namespace(&self) -> Namespace {
        self.current_session().namespace()
    }
}
