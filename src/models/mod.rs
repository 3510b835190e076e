pub mod tracked_item;

// Re-exports for convenience
pub use tracked_item::*;
