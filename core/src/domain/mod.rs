pub mod common;
pub mod detection;
pub mod health;
pub mod storage;
pub mod upload;
