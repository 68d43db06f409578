//! Catalog module: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{Item, ItemChanges, NewItem};
pub use repository::ItemRepository;
pub use service::{DynMenuService, MenuService};
