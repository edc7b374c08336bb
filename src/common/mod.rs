pub mod bit_utils;
pub(crate) mod config;
pub mod ec;
pub mod error;
pub mod iter;
pub(crate) mod macros;
pub mod mask;
pub mod metadata;
pub mod version_db;
