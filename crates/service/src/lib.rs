//! Service layer for the menu catalog.
//! - `catalog`: domain types, the item Storage Gateway and `MenuService`.
//! - `storage`: reusable file-backed stores.
//! - `runtime`: backend selection from configuration.

pub mod errors;
pub mod catalog;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;

pub use catalog::{DynMenuService, Item, ItemChanges, ItemRepository, MenuService, NewItem};
pub use errors::ServiceError;
