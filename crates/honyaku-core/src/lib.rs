//! # honyaku-core
//!
//! Core types, traits, configuration, and error handling for the honyaku relay.

pub mod config;
pub mod error;
pub mod message;
pub mod routing;
pub mod script;
pub mod traits;
