use std::sync::Arc;

use slidecraft_generation::ContentGenerator;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: slidecraft_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Drafts slide content for create, insert and regenerate.
    pub generator: Arc<dyn ContentGenerator>,
}
