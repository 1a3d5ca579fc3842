//! hoaxcheck Core
//!
//! Core types and error handling shared across hoaxcheck components.
//!
//! This crate provides:
//! - The text domains bundles are trained for and the REAL/HOAX label set
//! - Error types and result handling

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{Domain, Label};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{Domain, Label};
}
