use std::sync::Arc;

use crate::ai::CompletionClient;
use crate::db::Database;

/// Shared application state for the API server.
///
/// Both members are constructed once at startup and reused for the process
/// lifetime; handlers never build their own connections or clients.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub ai: Arc<CompletionClient>,
}

impl AppState {
    pub fn new(db: Arc<Database>, ai: Arc<CompletionClient>) -> Self {
        Self { db, ai }
    }
}
