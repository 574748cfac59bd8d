use std::future::Future;

use crate::domain::health::entities::GatewayHealth;

pub trait HealthCheckService: Send + Sync {
    fn health(&self) -> impl Future<Output = GatewayHealth> + Send;
}
