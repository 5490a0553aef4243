use std::sync::Arc;

use boom_cloud::MediaStore;
use boom_db::DbPool;

use crate::config::ServerConfig;

/// Handler state. Every field is a shared handle, so cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub config: Arc<ServerConfig>,
    /// Destination for short-form video files and thumbnails.
    pub media: Arc<dyn MediaStore>,
}
