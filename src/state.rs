use std::sync::Arc;

use crate::{config::GatewayContext, db::MappingStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MappingStore>,
    pub base_url: String,
    pub gateway: GatewayContext,
}

impl AppState {
    pub fn new(store: Arc<dyn MappingStore>, base_url: String, gateway: GatewayContext) -> Self {
        Self {
            store,
            base_url,
            gateway,
        }
    }
}
