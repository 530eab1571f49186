//! Core types for Groundswell.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod id;
pub mod principal;

pub use category::Category;
pub use id::*;
pub use principal::Principal;
