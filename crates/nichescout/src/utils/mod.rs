//! Utility modules for common patterns.

pub mod formatting;

// Re-export commonly used items
pub use formatting::{format_created_at, format_elapsed};
