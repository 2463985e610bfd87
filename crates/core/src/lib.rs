//! Shopcart Core - Shared types library.
//!
//! This crate provides the domain types used across all Shopcart components:
//! - `store` - The cart state manager and its collaborator implementations
//! - `cli` - Command-line front end for driving a cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices, plus catalog
//!   metadata types
//! - [`cart`] - The cart itself: an ordered sequence of entries with pure
//!   mutation helpers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::*;
pub use types::*;
