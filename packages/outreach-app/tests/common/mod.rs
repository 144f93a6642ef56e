// Common test utilities

pub mod fakes;
pub mod fixtures;
pub mod harness;

pub use fakes::*;
pub use harness::*;
