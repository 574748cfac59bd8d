pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{GatewayHealth, HealthStatus};
pub use ports::HealthCheckService;
