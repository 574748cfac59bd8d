use std::sync::Arc;

use ingrescan_core::application::GatewayService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: GatewayService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: GatewayService) -> Self {
        Self { args, service }
    }
}
