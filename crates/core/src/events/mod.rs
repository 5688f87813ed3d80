pub mod bus;
pub mod types;

pub use bus::SyncBus;
pub use types::{SyncEvent, SyncPolicy};
