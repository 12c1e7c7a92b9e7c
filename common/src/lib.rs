pub mod config;
pub mod error;
pub mod interrupt;
pub mod service;

pub use error::MergeError;
pub use service::{ServiceKey, ServiceRecord};
