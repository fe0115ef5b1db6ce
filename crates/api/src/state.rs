use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable (inner data is behind `Arc`). The workspace root and
/// generator binary are carried here as explicit configuration rather than
/// read from ambient globals, so tests can construct isolated instances.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (bind address, workspace root, generator binary).
    pub config: Arc<ServerConfig>,
}
