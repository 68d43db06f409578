/// Item persistence against a live PostgreSQL
pub mod item_tests;
