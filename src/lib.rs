pub mod answers;
pub mod catalog;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod logging;
pub mod progress;
pub mod recommend;
pub mod scoring;
pub mod state;
pub mod storage;
pub mod sync;

use crate::state::app::AppState;
use crate::storage::store::KvStore;

/// Initialize structured logging and build the application state backed by
/// the default on-disk store. Screens call this once at startup and thread
/// the returned state through every engine call.
pub fn bootstrap() -> AppState {
    logging::init_logging();
    tracing::info!("restocheck core starting");

    AppState::new(KvStore::open_default())
}
