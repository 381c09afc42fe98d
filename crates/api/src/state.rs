use std::sync::Arc;

use crate::config::ServerConfig;

/// Handler state: the Postgres pool every repository call runs on, plus the
/// loaded server settings.
#[derive(Clone)]
pub struct AppState {
    pub pool: placement_db::DbPool,
    pub config: Arc<ServerConfig>,
}
