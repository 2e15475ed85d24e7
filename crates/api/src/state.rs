use std::sync::Arc;

use reporter_db::stores::Stores;

use crate::config::ServerConfig;
use crate::storage::StorageService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// One store per aggregate (PostgreSQL in production, in memory in tests).
    pub stores: Stores,
    /// Signed URL issuer for client uploads.
    pub storage: Arc<dyn StorageService>,
}
