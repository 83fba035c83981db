//! medfeed-common: shared types, errors, and the sandboxed HTTP client used
//! across all medfeed crates.

pub mod error;
pub mod categories;
pub mod sandbox;

// Re-export commonly used types
pub use categories::{Category, CategorySlug};
pub use error::{MedfeedError, Result};
