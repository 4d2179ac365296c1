pub mod catalog;
pub mod error;
pub mod filter;
pub mod models;
pub mod time;

pub use catalog::LanguageCatalog;
pub use error::FilterError;
pub use filter::{compute_visibility, FilterSummary, HideReason, Visibility};
pub use models::{Control, EventCard, FilterConfig, ALL_LANGUAGES};
