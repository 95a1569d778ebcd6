//! # honyaku-providers
//!
//! Translation provider implementations for honyaku.

pub mod deepl;
