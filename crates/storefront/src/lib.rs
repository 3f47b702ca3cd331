//! Shopfront storefront library.
//!
//! Session, shop, chat and catalog services over an injected key-value
//! store, a client for the recommendation/search collaborator, and the HTTP
//! API that exposes them. Split from the binary so the CLI and the
//! integration tests drive the same code.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
