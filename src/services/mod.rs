//! Service layer: file storage, tag extraction, upload ingestion and draft
//! generation. Route handlers stay thin and delegate here.

pub mod documents;
pub mod files;
pub mod tags;
pub mod uploads;

pub use files::FileStorage;
