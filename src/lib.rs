//! inkframe - photo frame server for seven-color e-paper panels
//!
//! Serves photos from an Immich album, converted to packed panel codes,
//! to an ESP32-driven frame. This library exposes modules for integration
//! testing.

pub mod api;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
