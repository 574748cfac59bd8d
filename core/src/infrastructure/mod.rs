pub mod roboflow;
pub mod storage;
