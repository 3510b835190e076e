pub mod decision;
pub mod price_store;
pub mod watcher;

pub use decision::{decide, Decision};
pub use price_store::PriceStore;
pub use watcher::{CheckOutcome, PriceWatcher};
