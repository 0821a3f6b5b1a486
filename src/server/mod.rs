//! Server core functionality
//!
//! Prepares the on-disk layout, binds the listener, and serves the router.

pub mod core;

pub use core::Server;
