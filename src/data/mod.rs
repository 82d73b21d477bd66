//! External data sources.

pub mod bcb;

pub use bcb::BcbClient;
