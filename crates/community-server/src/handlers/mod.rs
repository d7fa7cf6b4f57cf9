//! HTTP handlers

pub mod catalog;
pub mod comments;
pub mod health;
pub mod interop;
pub mod posts;

pub use health::health;
