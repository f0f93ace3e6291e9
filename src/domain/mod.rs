//! # Domain Layer
//!
//! Core models and errors. This layer is independent of external
//! frameworks and infrastructure.

pub mod models;

mod error;

pub use error::*;
pub use models::*;
