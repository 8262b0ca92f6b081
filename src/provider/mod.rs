//! Remote market-data provider: fetch trait and HTTP client.

pub mod client;
pub mod source;

pub use client::*;
pub use source::*;
