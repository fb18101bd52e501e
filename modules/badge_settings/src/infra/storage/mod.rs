//! Storage layer - options and transient store implementations

pub mod json_file;
pub mod mapper;
pub mod memory;

pub use json_file::JsonFileOptionsStore;
pub use memory::{InMemoryOptionsStore, InMemoryTransientStore, TransientEntry};
