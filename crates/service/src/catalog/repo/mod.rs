//! Persistent Storage Gateway implementations.

pub mod json_file;
pub mod seaorm;

pub use json_file::JsonFileItemRepository;
pub use seaorm::SeaOrmItemRepository;
