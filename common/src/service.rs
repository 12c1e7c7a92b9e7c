//! # Service Registry Model
//!
//! Types describing a single `services(5)` entry and how entries are ordered.
//!
//! * [`record`]: the [`ServiceRecord`] itself and the [`ServiceKey`] that identifies it.
//! * [`protocol`]: the protocol rank table used when sorting output.

pub mod protocol;
pub mod record;

pub use record::{ServiceKey, ServiceRecord};
