//! Core business logic abstractions

pub mod cache;
pub mod clock;
pub mod config;
pub mod currency;
pub mod date;
pub mod error;
pub mod log;
pub mod number;
