//! Value module - decoded reply values
//!
//! - Core variant and type tags (`types.rs`)
//! - Spatial point (`geography.rs`)
//! - Accessors and explicit coercions (`conversion.rs`)

pub mod conversion;
pub mod geography;
pub mod types;

pub use geography::*;
pub use types::*;
