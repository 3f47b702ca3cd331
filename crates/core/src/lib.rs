//! Shopfront Core - Shared types library.
//!
//! This crate provides the domain types used across all Shopfront components:
//! - `storefront` - State container, HTTP API and collaborator client
//! - `cli` - Command-line driver over the same state container
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! storage access, no HTTP clients. Persistence and identity lifecycle live in
//! the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, emails, identities, products, cart and wishlist

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
