//! HTTP transport layer.

pub mod handlers;
