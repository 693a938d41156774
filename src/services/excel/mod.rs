pub mod accessor;
pub mod cache;
pub mod catalog;
pub mod projector;
pub mod reader;
pub mod store;
pub mod summary;
pub mod types;

pub use store::WorkbookStore;
pub use types::StoreConfig;
