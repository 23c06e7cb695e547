// Application state module
// Everything a request needs, built once at startup and shared read-only

use std::sync::Arc;

use super::types::Config;
use crate::content::ContentSource;
use crate::pipeline::Pipeline;
use crate::routing::{RouteTable, RouteTableError};

/// Application state
pub struct AppState {
    pub config: Config,
    pub routes: RouteTable,
    pub pipeline: Pipeline,
    pub content: Arc<dyn ContentSource>,
}

impl AppState {
    /// Build the route table and request pipeline from `config`
    pub fn new(config: Config, content: Arc<dyn ContentSource>) -> Result<Self, RouteTableError> {
        let routes = RouteTable::new(config.routes.entries.clone())?;
        let pipeline = Pipeline::from_config(&config.site);

        Ok(Self {
            config,
            routes,
            pipeline,
            content,
        })
    }

    pub const fn access_log(&self) -> bool {
        self.config.logging.access_log
    }
}
