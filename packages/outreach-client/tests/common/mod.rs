// Common test utilities

pub mod backend;

pub use backend::*;
