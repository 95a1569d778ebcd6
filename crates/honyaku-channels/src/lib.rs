//! # honyaku-channels
//!
//! Messaging platform integrations for honyaku.

pub mod line;
pub mod utils;
