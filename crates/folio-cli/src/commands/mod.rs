//! Command implementations.

pub mod config;
pub mod entities;
pub mod fields;

pub use self::config::execute_config;
pub use self::entities::execute_entities;
pub use self::fields::execute_fields;
