//! Utils Module - Helper Functions & Shared Constants

pub mod constants;

pub use constants::*;
