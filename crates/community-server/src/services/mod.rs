//! Business logic services

pub mod interop;
pub mod operations;
pub mod wire;

pub use interop::{BusinessService, Director};
pub use operations::{EchoOperation, HttpForwardOperation};
