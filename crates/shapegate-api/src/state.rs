//! # Application State
//!
//! Shared state handed to every handler through `State<AppState>`. Cloning
//! is cheap: the registry is reference-counted and the config is small.

use std::sync::Arc;

use shapegate_schema::SchemaRegistry;

use crate::config::AppConfig;

/// State shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration the server was started with.
    pub config: Arc<AppConfig>,
    /// Compiled validators for every served type.
    pub schemas: SchemaRegistry,
}

impl AppState {
    /// Create state with an empty registry. Use
    /// [`bootstrap`](crate::bootstrap::bootstrap) to get one with the served
    /// types registered.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            schemas: SchemaRegistry::new(),
        }
    }
}
