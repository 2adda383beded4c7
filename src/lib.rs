//! Drawing intelligence backend.
//!
//! Projects, drawing uploads, filename tag extraction and draft document
//! generation over a schema-free record store.

pub mod app;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod store;
