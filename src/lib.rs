// Modules for better organization

pub mod appwrite;
pub mod cache;
pub mod config;
pub mod logging;
pub mod server;

// Re-export commonly used types

pub use appwrite::AppwriteClient;
pub use cache::{CacheStore, ContentItem, ContentService, ContentState};
pub use config::Config;
