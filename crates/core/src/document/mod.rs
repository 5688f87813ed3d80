pub mod model;
pub mod resolve;
pub mod route;
pub mod slug;
pub mod validate;

pub use model::*;
pub use resolve::{ResolvedPage, ResolvedRoute};
pub use route::{Mode, Route};
pub use slug::{is_valid_slug, sanitize_slug};
pub use validate::{validate_document, DocumentIssue};
