// Public modules
pub mod batch;
pub mod config;
pub mod entry;
pub mod error;
pub mod executor;
pub mod output;
pub mod secret;
pub mod vercel;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{BulkResult, BulkSummary, ItemOutcome};
