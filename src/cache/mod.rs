//! Cache Module
//!
//! Stores opaque values under generated keys and reads them back with an
//! explicit decode strategy.

pub mod decode;
mod store;
mod value;


// Re-export public types
pub use store::Cache;
pub use value::Value;
