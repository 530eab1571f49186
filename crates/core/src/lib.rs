//! Groundswell Core - Shared types library.
//!
//! This crate provides common types used across all Groundswell components:
//! - `client` - Headless client for the hosted document store
//! - `cli` - Command-line driver for browsing and backing projects
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no store
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the project category vocabulary, and the
//!   authenticated principal

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
