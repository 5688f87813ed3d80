pub mod bulk;
pub mod export;
pub mod import;
pub mod merge;
pub mod types;

pub use bulk::BulkEditError;
pub use export::export_document;
pub use import::{import_document, ImportError};
pub use types::{ContentPatch, CourseScope, Target};
