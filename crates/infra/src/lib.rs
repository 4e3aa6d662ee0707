//! Infrastructure layer: documents on disk, people normalization, config.

pub mod config;
pub mod document;
pub mod error;
pub mod people;

pub use config::AppConfig;
pub use document::{Document, ExpenseRecord, NumericText, dump_document, load_document};
pub use error::{InfraError, InfraResult};
pub use people::normalize_people;
