pub mod detection;
pub mod forwarded;
pub mod health;
pub mod processed;
pub mod server;
