pub mod credentials;
pub mod storage;
