//! Data models for the pricetag library.

pub mod config;
pub mod price;
