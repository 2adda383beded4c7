//! Domain types and DTOs
//!
//! Records stored by this service and the request/response bodies around
//! them. Open key/value bags use `store::Record`.

pub mod documents;
pub mod extraction;
pub mod projects;
pub mod uploads;

// Re-export commonly used types
pub use documents::*;
pub use extraction::*;
pub use projects::*;
pub use uploads::*;
