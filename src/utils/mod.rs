//! The `utils` module provides shared building blocks used across the
//! `snode_inbox` crate: the error types and the logging setup.

pub mod error;
pub mod logging;
