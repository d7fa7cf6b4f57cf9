//! Port traits (interfaces) for dependency injection

pub mod interop;
pub mod storage;

pub use interop::BusinessOperation;
pub use storage::{CatalogStore, CommentStore, PostStore};
