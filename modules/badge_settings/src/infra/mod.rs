//! Infrastructure layer - store and HTTP implementations of domain traits

pub mod http;
pub mod storage;
