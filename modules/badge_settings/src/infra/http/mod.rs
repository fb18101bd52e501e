//! HTTP clients for remote collaborators

pub mod feed_client;

pub use feed_client::ReqwestFeedSource;
