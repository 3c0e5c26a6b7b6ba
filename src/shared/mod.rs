//! Shared Utilities
//!
//! Common utilities used across modules.

pub mod error;
